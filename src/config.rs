use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CrackError;

/// Default number of indices a worker claims at a time.
pub const DEFAULT_CHUNK_SIZE: u64 = 4096;
/// Default spacing between progress snapshots (at most twice per second).
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 500;
/// Default bound of the progress channel.
pub const DEFAULT_PROGRESS_CAPACITY: usize = 64;

/// Runtime configuration for the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of parallel workers.
    pub workers: usize,
    /// Indices claimed per work unit.
    pub chunk_size: u64,
    /// Minimum spacing between progress snapshots in milliseconds.
    pub progress_interval_ms: u64,
    /// Capacity of the progress channel. Snapshots are dropped when full.
    pub progress_capacity: usize,
    /// Largest search space the engine agrees to scan.
    pub max_space: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
            max_space: u64::MAX,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CrackError> {
        let text = fs::read_to_string(path)?;
        let cfg: EngineConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CrackError> {
        if self.workers == 0 {
            return Err(CrackError::Config("workers must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(CrackError::Config("chunk_size must be at least 1".into()));
        }
        if self.progress_capacity == 0 {
            return Err(CrackError::Config(
                "progress_capacity must be at least 1".into(),
            ));
        }
        if self.max_space == 0 {
            return Err(CrackError::Config("max_space must be at least 1".into()));
        }
        Ok(())
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}
