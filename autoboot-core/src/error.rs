//! Error types for autoboot-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a request or reading user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The project name cannot be turned into a repository name.
    #[error("'{name}' is not a usable repository name: {reason}")]
    InvalidRepoName { name: String, reason: &'static str },
}
