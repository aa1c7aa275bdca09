//! Error reporting for the command-line front ends.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

type BoxedSource = Box<dyn Error + Send + Sync>;

/// Message shown to the user, with the underlying error kept as source.
#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<BoxedSource>,
}

impl CliError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            source: None,
        }
    }

    fn with_source(msg: String, source: impl Into<BoxedSource>) -> Self {
        Self {
            msg,
            source: Some(source.into()),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

/// Describe a failure to read the engine configuration file.
pub fn config_read_message(path: &Path, err: &io::Error) -> String {
    let advice = match err.kind() {
        io::ErrorKind::NotFound => "Check that the file exists or drop --config.",
        io::ErrorKind::PermissionDenied => "The file is not readable by this user.",
        _ => "Pass a readable JSON file to --config.",
    };
    format!("cannot read config '{}': {err}. {advice}", path.display())
}

pub fn config_read_error(path: &Path, err: io::Error) -> CliError {
    CliError::with_source(config_read_message(path, &err), err)
}

/// Convert a library error into a CLI error with a hint.
pub fn crack_cli_error(context: &str, err: crate::CrackError) -> CliError {
    CliError::with_source(format!("{context}: {}", cli_hint(&err)), err)
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &crate::CrackError) -> String {
    use crate::CrackError::*;
    match err {
        InvalidParameters(msg) => {
            format!("{msg}. Check --hash, --length and the character set.")
        }
        IndexOutOfRange { index, size } => {
            format!("index {index} is outside a space of {size} candidates. This is a bug.")
        }
        Config(msg) => format!("{msg}. Invalid configuration."),
        Worker(msg) => format!("{msg}. The search was aborted."),
        Io(io) => format!("{io}"),
        Json(e) => format!("{e}. Check the configuration file."),
        Internal(msg) => format!("{msg}. This is a bug."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CrackError;

    #[test]
    fn hint_mentions_flags_for_bad_parameters() {
        let err = crack_cli_error("search failed", CrackError::InvalidParameters("alphabet is empty".into()));
        assert!(err.to_string().starts_with("search failed: alphabet is empty."));
        assert!(err.to_string().contains("--hash"));
        assert!(Error::source(&err).is_some());
    }

    #[test]
    fn missing_config_names_the_file() {
        let err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let cli = config_read_error(Path::new("cfg.json"), err);
        assert!(cli.msg.starts_with("cannot read config 'cfg.json'"));
        assert!(cli.msg.ends_with("Check that the file exists or drop --config."));
        assert!(Error::source(&cli).is_some());
    }
}
