//! Error types for credsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from store-configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file did not exist at the expected path.
    #[error("store config not found at {path}")]
    NotFound { path: PathBuf },

    /// YAML parse error on load — includes file path and line context from
    /// serde_yaml.
    #[error("failed to parse store config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
