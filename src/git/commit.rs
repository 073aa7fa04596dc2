//! The commit side effect.

use std::path::Path;

use tokio::process::Command;

use crate::error::GitError;

/// Create a commit with the exact message text, multi-line preserved.
///
/// The message travels as a single argv entry, never through a shell
/// string, and stdio is inherited so hook and signing prompts reach the
/// user's terminal.
pub async fn commit(cwd: &Path, message: &str) -> Result<(), GitError> {
    let status = Command::new("git")
        .arg("commit")
        .arg("-m")
        .arg(message)
        .current_dir(cwd)
        .status()
        .await
        .map_err(GitError::SpawnFailed)?;

    if !status.success() {
        return Err(GitError::CommitFailed {
            code: status.code().unwrap_or(-1),
        });
    }

    Ok(())
}
