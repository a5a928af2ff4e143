//! Platform command helpers

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::NotifyError;

/// Run a command to completion, failing on a non-zero exit status
pub async fn run_command(program: &str, args: &[&str]) -> Result<(), NotifyError> {
    debug!("Executing {} {:?}", program, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| NotifyError::Spawn {
            command: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NotifyError::Failed {
            command: program.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(())
}

/// Check whether `program` can be found on the PATH
pub async fn check_tool_available(program: &str) -> bool {
    let found = Command::new("which")
        .arg(program)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false);

    if found {
        info!("{} is available", program);
    } else {
        warn!("{} is not available, related notifications will be skipped", program);
    }
    found
}
