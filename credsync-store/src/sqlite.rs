//! SQLite-backed store implementations.
//!
//! Schema expectations (matching the stores' own installers, not created
//! here):
//!
//! ```text
//! source:  <prefix>users (username TEXT, password TEXT, …)
//! target:  user          (user_name TEXT, user_password TEXT, …)
//! ```
//!
//! The source is opened read-only; the target read-write but never created —
//! a missing database file is a connection error, not an empty store.

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};

use credsync_core::config::StoreConfig;
use credsync_core::types::{SourceUser, TargetUser, Username};

use crate::error::StoreError;
use crate::repo::{SourceStore, TargetStore};

const SQLITE_BACKEND: &str = "sqlite";

/// Open the source store described by `config`.
///
/// Dispatches on `config.backend`; an unrecognized name is
/// [`StoreError::UnsupportedBackend`].
pub fn connect_source(config: &StoreConfig) -> Result<Box<dyn SourceStore>, StoreError> {
    match config.backend.as_str() {
        SQLITE_BACKEND => Ok(Box::new(SqliteSourceStore::open(config)?)),
        other => Err(StoreError::UnsupportedBackend {
            name: other.to_owned(),
        }),
    }
}

/// Open the target store described by `config`.
pub fn connect_target(config: &StoreConfig) -> Result<Box<dyn TargetStore>, StoreError> {
    match config.backend.as_str() {
        SQLITE_BACKEND => Ok(Box::new(SqliteTargetStore::open(config)?)),
        other => Err(StoreError::UnsupportedBackend {
            name: other.to_owned(),
        }),
    }
}

fn open_with_flags(path: &Path, flags: OpenFlags) -> Result<Connection, StoreError> {
    Connection::open_with_flags(path, flags).map_err(|source| StoreError::Connection {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Read-only view over the source store's user table.
pub struct SqliteSourceStore {
    conn: Connection,
    users_table: String,
}

impl SqliteSourceStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = open_with_flags(&config.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let prefix = config.table_prefix.as_deref().unwrap_or("");
        Ok(Self {
            conn,
            users_table: format!("{prefix}users"),
        })
    }
}

impl SourceStore for SqliteSourceStore {
    fn list_all(&self) -> Result<Vec<SourceUser>, StoreError> {
        // Table names cannot be bound as parameters; the prefix comes from
        // operator-owned config, same trust level as the path itself.
        let sql = format!("SELECT username, password FROM {}", self.users_table);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(SourceUser {
                username: Username(row.get(0)?),
                password_hash: row.get(1)?,
            })
        })?;
        let users = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("read {} users from source store", users.len());
        Ok(users)
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Read/write view over the target store's user table.
pub struct SqliteTargetStore {
    conn: Connection,
}

impl SqliteTargetStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = open_with_flags(&config.path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        Ok(Self { conn })
    }
}

impl TargetStore for SqliteTargetStore {
    fn list_all(&self) -> Result<Vec<TargetUser>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_name, user_password FROM user")?;
        let rows = stmt.query_map([], |row| {
            Ok(TargetUser {
                username: Username(row.get(0)?),
                password_hash: row.get(1)?,
            })
        })?;
        let users = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("read {} users from target store", users.len());
        Ok(users)
    }

    fn set_password_hash(&mut self, username: &str, hash: &str) -> Result<(), StoreError> {
        let affected = self.conn.execute(
            "UPDATE user SET user_password = ?1 WHERE user_name = ?2",
            params![hash, username],
        )?;
        if affected == 0 {
            return Err(StoreError::Consistency {
                username: username.to_owned(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(path: PathBuf) -> StoreConfig {
        StoreConfig {
            backend: "sqlite".to_string(),
            path,
            table_prefix: None,
            provision: None,
        }
    }

    fn seed_source(path: &Path, prefix: &str, rows: &[(&str, &str)]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE {prefix}users (username TEXT NOT NULL, password TEXT NOT NULL)"
        ))
        .unwrap();
        for (name, hash) in rows {
            conn.execute(
                &format!("INSERT INTO {prefix}users (username, password) VALUES (?1, ?2)"),
                params![name, hash],
            )
            .unwrap();
        }
    }

    fn seed_target(path: &Path, rows: &[(&str, &str)]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE user (user_name TEXT NOT NULL, user_password TEXT NOT NULL)",
        )
        .unwrap();
        for (name, hash) in rows {
            conn.execute(
                "INSERT INTO user (user_name, user_password) VALUES (?1, ?2)",
                params![name, hash],
            )
            .unwrap();
        }
    }

    #[test]
    fn unsupported_backend_is_rejected() {
        let mut cfg = config(PathBuf::from("/nonexistent"));
        cfg.backend = "mysql".to_string();
        let err = connect_source(&cfg).err().expect("should fail");
        match err {
            StoreError::UnsupportedBackend { name } => assert_eq!(name, "mysql"),
            other => panic!("expected UnsupportedBackend, got {other:?}"),
        }
    }

    #[test]
    fn missing_database_file_is_connection_error() {
        let tmp = TempDir::new().unwrap();
        let cfg = config(tmp.path().join("absent.sqlite"));
        let err = connect_source(&cfg).err().expect("should fail");
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    #[test]
    fn source_list_all_reads_every_row() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("source.sqlite");
        seed_source(&db, "", &[("alice", "$2y$10$a"), ("bob", "$2y$10$b")]);

        let store = connect_source(&config(db)).unwrap();
        let users = store.list_all().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username.as_str(), "alice");
        assert_eq!(users[1].password_hash, "$2y$10$b");
    }

    #[test]
    fn source_honors_table_prefix() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("source.sqlite");
        seed_source(&db, "cms_", &[("alice", "$2y$10$a")]);

        let mut cfg = config(db);
        cfg.table_prefix = Some("cms_".to_string());
        let store = connect_source(&cfg).unwrap();
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn target_set_password_hash_updates_one_row() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("target.sqlite");
        seed_target(&db, &[("alice", "old"), ("bob", "old")]);

        let mut store = connect_target(&config(db)).unwrap();
        store
            .set_password_hash("alice", ":bcrypt:10$salt$hash")
            .unwrap();

        let users = store.list_all().unwrap();
        let alice = users.iter().find(|u| u.username.as_str() == "alice").unwrap();
        let bob = users.iter().find(|u| u.username.as_str() == "bob").unwrap();
        assert_eq!(alice.password_hash, ":bcrypt:10$salt$hash");
        assert_eq!(bob.password_hash, "old");
    }

    #[test]
    fn target_update_of_unknown_user_is_consistency_error() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("target.sqlite");
        seed_target(&db, &[("alice", "old")]);

        let mut store = connect_target(&config(db)).unwrap();
        let err = store
            .set_password_hash("ghost", ":bcrypt:10$salt$hash")
            .unwrap_err();
        match err {
            StoreError::Consistency { username } => assert_eq!(username, "ghost"),
            other => panic!("expected Consistency, got {other:?}"),
        }
    }

    #[test]
    fn target_update_matches_username_exactly() {
        let tmp = TempDir::new().unwrap();
        let db = tmp.path().join("target.sqlite");
        seed_target(&db, &[("Alice", "old")]);

        let mut store = connect_target(&config(db)).unwrap();
        // SQLite's = on TEXT is case-sensitive; the reconciler hands us the
        // target's stored casing, so "alice" must not match "Alice".
        let err = store.set_password_hash("alice", "new").unwrap_err();
        assert!(matches!(err, StoreError::Consistency { .. }));
        store.set_password_hash("Alice", "new").unwrap();
    }
}
