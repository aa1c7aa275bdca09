//! Brute-force recovery of passwords hashed with a salted two-stage SHA-256
//! scheme.
//!
//! Given a target digest, a salt, a candidate length and an alphabet, the
//! engine enumerates every candidate of that length in a fixed order, hashes
//! each one with [`transform`] and reports the first match in enumeration
//! order. Searches run on a pool of workers, can be cancelled at any time and
//! publish throttled progress snapshots.
//!
//! ```no_run
//! use hashcracker::{start_search, Alphabet, EngineConfig, SearchParameters};
//!
//! let target = hashcracker::transform("ab", "s");
//! let params = SearchParameters::new(&target, "s", 2, Alphabet::new("ab")?)?;
//! let handle = start_search(params, EngineConfig::default())?;
//! let result = handle.wait()?;
//! assert_eq!(result.candidate(), Some("ab"));
//! # Ok::<(), hashcracker::CrackError>(())
//! ```

pub mod cancel;
pub mod candidate;
pub mod charset;
pub mod config;
pub mod engine;
pub mod error;
pub mod handle;
pub mod io_utils;
pub mod params;
pub mod progress;
pub mod transform;

pub use cancel::CancellationToken;
pub use candidate::{decode, space_size, Cursor, SearchSpace};
pub use charset::Charset;
pub use config::EngineConfig;
pub use engine::{Engine, SearchResult};
pub use error::CrackError;
pub use handle::{start_search, SearchEvent, SearchHandle};
pub use params::{Alphabet, SearchParameters};
pub use progress::ProgressSnapshot;
pub use transform::{transform, DigestTransform, SaltedSha256, DIGEST_LEN};

/// Install the `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the default level. Output goes to stderr.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();
}
