//! External account provisioning.
//!
//! Brand-new target accounts cannot be created by inserting a hash directly;
//! the target system's own bootstrap tooling must run (it sets up the rest of
//! the row and related tables). We shell out to the operator-configured
//! command with the username and a throwaway plaintext password appended as
//! the final two arguments.

use std::process::Command;

use credsync_core::config::ProvisionConfig;

use crate::error::StoreError;

/// Create one account in the target store with a plaintext initial password.
pub trait Provisioner {
    fn create_account(&self, username: &str, password: &str) -> Result<(), StoreError>;
}

/// Build the provisioner for a target store config.
///
/// Without a configured command, any live `Create` is an error — the operator
/// must either configure provisioning or exclude the new users.
pub fn provisioner_for(config: Option<&ProvisionConfig>) -> Box<dyn Provisioner> {
    match config {
        Some(cfg) => Box::new(CommandProvisioner::new(cfg.clone())),
        None => Box::new(UnconfiguredProvisioner),
    }
}

// ---------------------------------------------------------------------------
// Command provisioner
// ---------------------------------------------------------------------------

/// Runs the configured bootstrap command once per account.
pub struct CommandProvisioner {
    config: ProvisionConfig,
}

impl CommandProvisioner {
    pub fn new(config: ProvisionConfig) -> Self {
        Self { config }
    }

    fn command_line(&self, username: &str) -> String {
        // For diagnostics only; the password is never echoed.
        let mut parts = vec![self.config.program.clone()];
        parts.extend(self.config.args.iter().cloned());
        parts.push(username.to_owned());
        parts.push("<password>".to_owned());
        parts.join(" ")
    }
}

impl Provisioner for CommandProvisioner {
    fn create_account(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let command = self.command_line(username);
        tracing::info!("provisioning target account: {command}");

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(username)
            .arg(password)
            .output()
            .map_err(|e| StoreError::Provisioning {
                command: command.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::Provisioning {
                command,
                detail: format!("{} ({})", output.status, stderr.trim()),
            });
        }
        Ok(())
    }
}

struct UnconfiguredProvisioner;

impl Provisioner for UnconfiguredProvisioner {
    fn create_account(&self, username: &str, _password: &str) -> Result<(), StoreError> {
        Err(StoreError::Provisioning {
            command: "<none>".to_owned(),
            detail: format!(
                "no provision command configured for target store; cannot create '{username}'"
            ),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> ProvisionConfig {
        ProvisionConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[test]
    #[cfg(unix)]
    fn successful_command_is_ok() {
        let p = CommandProvisioner::new(sh("true"));
        p.create_account("alice", "s3cret").unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn username_and_password_are_appended_as_arguments() {
        // With `sh -c <script>`, the appended username lands in $0 and the
        // password in $1.
        let p = CommandProvisioner::new(sh(r#"test "$0" = alice && test "$1" = s3cret"#));
        p.create_account("alice", "s3cret").unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn nonzero_exit_surfaces_status_and_stderr() {
        let p = CommandProvisioner::new(sh("echo boom >&2; exit 3"));
        let err = p.create_account("alice", "s3cret").unwrap_err();
        match err {
            StoreError::Provisioning { detail, .. } => {
                assert!(detail.contains("boom"), "stderr missing: {detail}");
                assert!(detail.contains("3"), "exit status missing: {detail}");
            }
            other => panic!("expected Provisioning, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_provisioning_error() {
        let p = CommandProvisioner::new(ProvisionConfig {
            program: "/nonexistent/credsync-bootstrap".to_string(),
            args: vec![],
        });
        let err = p.create_account("alice", "s3cret").unwrap_err();
        assert!(matches!(err, StoreError::Provisioning { .. }));
    }

    #[test]
    fn unconfigured_provisioner_always_fails() {
        let p = provisioner_for(None);
        let err = p.create_account("alice", "s3cret").unwrap_err();
        match err {
            StoreError::Provisioning { detail, .. } => assert!(detail.contains("alice")),
            other => panic!("expected Provisioning, got {other:?}"),
        }
    }

    #[test]
    fn diagnostic_command_line_never_contains_password() {
        let p = CommandProvisioner::new(sh("true"));
        let line = p.command_line("alice");
        assert!(line.contains("alice"));
        assert!(line.contains("<password>"));
    }
}
