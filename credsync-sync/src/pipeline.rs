//! Shared sync pipeline entrypoint used by the CLI.
//!
//! Wires the whole run: load both store configs, open both stores, snapshot
//! both user lists, reconcile, apply. Connections are owned values dropped on
//! every exit path, error included.

use std::path::PathBuf;

use credsync_core::types::{Action, ExclusionSet, SyncReport};
use credsync_core::StoreConfig;
use credsync_store::{connect_source, connect_target, provisioner_for};

use crate::error::SyncError;
use crate::executor::apply;
use crate::reconcile::reconcile;

/// Everything a run needs, assembled by the CLI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the source store's YAML config.
    pub source_config: PathBuf,
    /// Path to the target store's YAML config.
    pub target_config: PathBuf,
    /// Usernames excluded from synchronization.
    pub exclusions: ExclusionSet,
    /// Compute and report, but write nothing.
    pub dry_run: bool,
}

/// What a run decided and did.
#[derive(Debug)]
pub struct SyncOutcome {
    /// Actions in source order — dry-run display relies on this ordering.
    pub actions: Vec<Action>,
    pub report: SyncReport,
}

/// Run the full sync pipeline.
///
/// This is the canonical entrypoint for `credsync`; both stores are read
/// exactly once before any action is computed or applied.
pub fn run(options: &RunOptions) -> Result<SyncOutcome, SyncError> {
    let source_config = StoreConfig::load(&options.source_config)?;
    let target_config = StoreConfig::load(&options.target_config)?;

    let source = connect_source(&source_config)?;
    let mut target = connect_target(&target_config)?;

    let source_users = source.list_all()?;
    let target_users = target.list_all()?;
    tracing::debug!(
        "snapshots: {} source users, {} target users",
        source_users.len(),
        target_users.len()
    );

    let actions = reconcile(&source_users, &target_users, &options.exclusions)?;

    let provisioner = provisioner_for(target_config.provision.as_ref());
    let report = apply(&actions, options.dry_run, target.as_mut(), provisioner.as_ref())?;

    Ok(SyncOutcome { actions, report })
}
