//! Per-store YAML configuration.
//!
//! Each identity store is described by one small YAML file handed to the CLI:
//!
//! ```yaml
//! # source store
//! backend: sqlite
//! path: /srv/cms/users.sqlite
//! table_prefix: cms_
//! ```
//!
//! ```yaml
//! # target store
//! backend: sqlite
//! path: /srv/wiki/wiki.sqlite
//! provision:
//!   program: php
//!   args: ["/srv/wiki/maintenance/createAndPromote.php", "--conf", "/srv/wiki/LocalSettings.php"]
//! ```
//!
//! `backend` is a free-form string validated when the store is opened, so an
//! unsupported backend surfaces as a connection error rather than a parse
//! error — the config itself may be valid for a newer build.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// External account-provisioning command for the target store.
///
/// The executor appends the username and the plaintext initial password as
/// the final two arguments, mirroring the target system's own bootstrap
/// tooling convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Connection description for one identity store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend name; currently `sqlite`.
    pub backend: String,

    /// Location of the store (database file for sqlite).
    pub path: PathBuf,

    /// Prefix prepended to the source's `users` table name, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_prefix: Option<String>,

    /// Account-provisioning command; only meaningful for the target store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provision: Option<ProvisionConfig>,
}

impl StoreConfig {
    /// Load a store config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::load_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a store config from a YAML string — split out for tests.
    pub fn load_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
