//! git subprocess plumbing.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::error::GitError;

/// Captured output of a completed git command.
#[derive(Debug)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Check that the git binary is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::NotInstalled);
    }
    Ok(())
}

/// Run a git command in `cwd`, capturing output.
///
/// A non-zero exit is reported through [`GitOutput::success`], not as an
/// error; callers decide whether failure is fatal for their operation.
pub async fn run_git(cwd: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(GitError::SpawnFailed)?;

    Ok(GitOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_git_version_succeeds() {
        let output = run_git(Path::new("."), &["--version"]).await.unwrap();
        assert!(output.success);
        assert!(output.stdout.contains("git version"));
    }

    #[tokio::test]
    async fn run_git_invalid_command_reports_failure() {
        let output = run_git(Path::new("."), &["not-a-real-command"])
            .await
            .unwrap();
        assert!(!output.success);
        assert!(!output.stderr.is_empty());
    }
}
