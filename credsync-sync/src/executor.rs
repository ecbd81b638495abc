//! Executor — apply a computed action list against the target store.

use credsync_core::types::{Action, SyncReport};
use credsync_store::{Provisioner, TargetStore};

use crate::error::SyncError;

/// Apply `actions` in order, tallying a [`SyncReport`].
///
/// Every action is logged before it runs, so verbose mode shows the full
/// plan as it executes. In dry-run the traversal, logging and counts are
/// identical but nothing is written — an exact preview of a live run.
///
/// Fail-fast: the first store or provisioning error aborts the run. Actions
/// already applied stay applied; each one is independently safe.
pub fn apply(
    actions: &[Action],
    dry_run: bool,
    target: &mut dyn TargetStore,
    provisioner: &dyn Provisioner,
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport::default();
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for action in actions {
        match action {
            Action::Create {
                username,
                initial_password,
            } => {
                tracing::info!("{prefix}creating target account {username}");
                if !dry_run {
                    provisioner.create_account(username.as_str(), initial_password)?;
                }
                report.created += 1;
            }
            Action::Update {
                username,
                new_password_hash,
            } => {
                tracing::info!("{prefix}updating password hash for {username}");
                if !dry_run {
                    target.set_password_hash(username.as_str(), new_password_hash)?;
                }
                report.updated += 1;
            }
            Action::NoOp { username } => {
                tracing::debug!("{username} already in sync");
                report.unchanged += 1;
            }
        }
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
