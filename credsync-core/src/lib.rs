//! Credsync core library — domain types, store configuration, errors.
//!
//! Public API surface:
//! - [`types`] — credential records, exclusion set, sync actions, report
//! - [`config`] — YAML store configuration loading
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{ProvisionConfig, StoreConfig};
pub use error::ConfigError;
pub use types::{Action, ExclusionSet, SourceUser, SyncReport, TargetUser, Username};
