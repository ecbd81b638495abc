//! Reconciliation — diff the two user snapshots into an action list.

use rand::{rngs::OsRng, RngCore};

use credsync_core::types::{Action, ExclusionSet, SourceUser, TargetUser};

use crate::error::SyncError;
use crate::transcode::transcode;

/// Random initial passwords are 5 CSPRNG bytes, hex-encoded to 10 chars.
const INITIAL_PASSWORD_BYTES: usize = 5;

/// Compute the actions needed to bring `target` in line with `source`.
///
/// One action per non-excluded source user, in source order, so dry-run
/// output is reproducible. Matching is case-insensitive with a linear scan;
/// first match wins, case-only duplicates are not deduplicated.
///
/// A malformed source hash aborts the whole computation — no partial action
/// list escapes, so the executor never applies half a sync.
pub fn reconcile(
    source: &[SourceUser],
    target: &[TargetUser],
    exclusions: &ExclusionSet,
) -> Result<Vec<Action>, SyncError> {
    let mut actions = Vec::with_capacity(source.len());

    for user in source {
        if exclusions.contains(user.username.as_str()) {
            tracing::debug!("skipping excluded user {}", user.username);
            continue;
        }

        match target.iter().find(|t| t.username.matches(&user.username)) {
            None => {
                actions.push(Action::Create {
                    username: user.username.clone(),
                    initial_password: generate_initial_password(),
                });
            }
            Some(existing) => {
                let transcoded = transcode(&user.password_hash)?;
                if transcoded == existing.password_hash {
                    // Keep the target's stored casing in both branches so
                    // the executor's exact-match UPDATE finds the row.
                    actions.push(Action::NoOp {
                        username: existing.username.clone(),
                    });
                } else {
                    actions.push(Action::Update {
                        username: existing.username.clone(),
                        new_password_hash: transcoded,
                    });
                }
            }
        }
    }

    Ok(actions)
}

/// A throwaway plaintext credential for brand-new accounts.
///
/// Account-creation tooling wants a plaintext password; the real (transcoded)
/// hash is applied by the `Update` the next run emits. The token only needs
/// to be unpredictable, not memorable.
fn generate_initial_password() -> String {
    let mut bytes = [0u8; INITIAL_PASSWORD_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
