//! Domain types for credential synchronization.
//!
//! Records are read-only snapshots of a store's user table, fetched once at
//! the start of a run. Actions are derived from the snapshots, consumed once
//! by the executor and then discarded; nothing here is persisted.

use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A username as stored in one of the identity stores.
///
/// Equality is exact (case-sensitive); use [`Username::matches`] for the
/// cross-store comparison, which ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(pub String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match, used when pairing source and target records.
    pub fn matches(&self, other: &Username) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Credential records
// ---------------------------------------------------------------------------

/// A `(username, password_hash)` row from the source store.
///
/// `password_hash` is the source's dollar-delimited bcrypt composite,
/// e.g. `$2y$10$<22-char-salt><digest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUser {
    pub username: Username,
    pub password_hash: String,
}

/// A `(username, password_hash)` row from the target store.
///
/// `password_hash` is expected to be in the target's tagged form
/// (`:bcrypt:<cost>$<salt>$<digest>`); any other value means the record has
/// never been synced and will be overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUser {
    pub username: Username,
    pub password_hash: String,
}

// ---------------------------------------------------------------------------
// Exclusion set
// ---------------------------------------------------------------------------

/// Operator-specified usernames left out of synchronization entirely.
///
/// Membership is exact-match and case-sensitive: the operator names source
/// usernames as they are stored, typically `admin`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn contains(&self, username: &str) -> bool {
        self.0.contains(username)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Actions and report
// ---------------------------------------------------------------------------

/// One reconciliation decision for a single source user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The user does not exist in the target store. Provision the account
    /// with a throwaway random initial password; the real hash lands via an
    /// `Update` on the following run.
    Create {
        username: Username,
        initial_password: String,
    },
    /// The user exists but the stored hash differs from the transcoded
    /// source hash. `username` carries the **target's** stored casing so the
    /// update row matches exactly.
    Update {
        username: Username,
        new_password_hash: String,
    },
    /// Source and target hashes already agree.
    NoOp { username: Username },
}

impl Action {
    pub fn username(&self) -> &Username {
        match self {
            Action::Create { username, .. }
            | Action::Update { username, .. }
            | Action::NoOp { username } => username,
        }
    }
}

/// Counts of what a run did (or, in dry-run, would do).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl SyncReport {
    /// True when the run had nothing to write.
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
