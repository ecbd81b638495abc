//! Error types for credsync-store.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from store access and provisioning.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unable to open the store, with annotated path for context.
    #[error("cannot open store at {path}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The config names a backend this build does not support.
    #[error("unsupported store backend '{name}'; expected: sqlite")]
    UnsupportedBackend { name: String },

    /// A query or statement failed mid-run.
    #[error("store query error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An update matched no row — the username came from this run's own
    /// snapshot, so the target store changed underneath us.
    #[error("no target row for user '{username}'; store changed since it was read")]
    Consistency { username: String },

    /// The external account-provisioning command failed.
    #[error("provisioning command `{command}` failed: {detail}")]
    Provisioning { command: String, detail: String },
}
