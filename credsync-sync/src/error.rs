//! Error types for credsync-sync.

use thiserror::Error;

use credsync_core::error::ConfigError;
use credsync_store::StoreError;

/// All errors that can arise from a sync run.
///
/// Every variant is fatal: the run aborts, actions already applied stay
/// applied (each one is independently safe), nothing else is attempted.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A source hash is not in the expected bcrypt encoding. This points at
    /// a misconfigured source store rather than per-record dirt, so the whole
    /// run aborts before any action is applied.
    #[error("unsupported password hash encoding: {hash}")]
    UnsupportedHashAlgorithm { hash: String },

    /// An error from store-configuration loading.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An error from store access or provisioning.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
