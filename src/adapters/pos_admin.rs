use crate::domain::ports::AdminCommand;
use crate::utils::error::{ProvisionError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Runs the directory admin executable as a child process.
///
/// The child's stdout and stderr go straight to ours; only the exit status is
/// looked at. There is no timeout, so a child that never exits stalls the run.
#[derive(Debug, Clone)]
pub struct PosAdminCommand {
    executable: PathBuf,
}

impl PosAdminCommand {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait]
impl AdminCommand for PosAdminCommand {
    async fn execute(&self, args: &[String]) -> Result<bool> {
        let status = Command::new(&self.executable)
            .args(args)
            .status()
            .await
            .map_err(|source| ProvisionError::AdminCommandError {
                command: self.describe(),
                source,
            })?;

        if !status.success() {
            tracing::debug!("{} exited with {}", self.describe(), status);
        }
        Ok(status.success())
    }

    fn describe(&self) -> String {
        self.executable.display().to_string()
    }
}
