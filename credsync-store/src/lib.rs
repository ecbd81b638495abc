//! # credsync-store
//!
//! Repository access to the two identity stores, plus the external
//! account-provisioning capability.
//!
//! Callers never branch on backend type: [`connect_source`] and
//! [`connect_target`] select an implementation from the store config and hand
//! back a trait object.

pub mod error;
pub mod provision;
pub mod repo;
pub mod sqlite;

pub use error::StoreError;
pub use provision::{provisioner_for, CommandProvisioner, Provisioner};
pub use repo::{SourceStore, TargetStore};
pub use sqlite::{connect_source, connect_target};
