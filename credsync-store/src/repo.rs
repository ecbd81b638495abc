//! Repository traits over the two identity stores.
//!
//! The reconciler and executor only ever see these traits; backend selection
//! happens once, in [`crate::sqlite::connect_source`] /
//! [`crate::sqlite::connect_target`].

use credsync_core::types::{SourceUser, TargetUser};

use crate::error::StoreError;

/// Read-only access to the source store's user table.
pub trait SourceStore {
    /// Snapshot every `(username, password_hash)` pair.
    fn list_all(&self) -> Result<Vec<SourceUser>, StoreError>;
}

/// Read/write access to the target store's user table.
pub trait TargetStore {
    /// Snapshot every `(username, password_hash)` pair.
    fn list_all(&self) -> Result<Vec<TargetUser>, StoreError>;

    /// Replace the stored hash for exactly one user, matched by exact
    /// username. Zero affected rows is [`StoreError::Consistency`].
    fn set_password_hash(&mut self, username: &str, hash: &str) -> Result<(), StoreError>;
}
