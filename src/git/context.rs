//! Repository context snapshot for one generation attempt.

use std::path::Path;

use tracing::warn;

use crate::error::GitError;

use super::diff::{staged_diff, staged_files};
use super::runner::run_git;

/// Number of recent commit subjects included as advisory context.
pub const RECENT_COMMIT_COUNT: usize = 5;

/// Immutable snapshot of the repository state relevant to generation.
///
/// Created once per attempt and discarded after use; `staged_diff` is never
/// empty on a successful collection.
#[derive(Debug, Clone)]
pub struct GitContext {
    pub staged_diff: String,
    pub changed_files: Vec<String>,
    pub branch_name: String,
    pub recent_commits: Vec<String>,
}

/// Fail unless `cwd` is inside a git repository.
pub async fn assert_repository(cwd: &Path) -> Result<(), GitError> {
    let output = run_git(cwd, &["rev-parse", "--git-dir"]).await?;
    if !output.success {
        return Err(GitError::NotARepository);
    }
    Ok(())
}

/// Abbreviated current branch name.
///
/// A detached or unresolvable HEAD yields the literal "HEAD" rather than an
/// error; the branch is descriptive context, not a prerequisite.
pub async fn current_branch(cwd: &Path) -> Result<String, GitError> {
    let output = run_git(cwd, &["rev-parse", "--abbrev-ref", "HEAD"]).await?;
    if !output.success {
        return Ok("HEAD".to_string());
    }

    let branch = output.stdout.trim();
    if branch.is_empty() {
        Ok("HEAD".to_string())
    } else {
        Ok(branch.to_string())
    }
}

/// Up to `count` recent commit subjects, most recent first.
///
/// History is advisory context only, so any failure degrades to an empty
/// list instead of aborting the collection.
pub async fn recent_commits(cwd: &Path, count: usize) -> Vec<String> {
    let limit = format!("-n{count}");
    match run_git(cwd, &["log", "--oneline", &limit]).await {
        Ok(output) if output.success => output
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(strip_hash_prefix)
            .collect(),
        Ok(output) => {
            warn!("Could not fetch recent commits: {}", output.stderr.trim());
            Vec::new()
        }
        Err(e) => {
            warn!("Could not fetch recent commits: {e}");
            Vec::new()
        }
    }
}

/// Drop the leading abbreviated hash from a `git log --oneline` line.
fn strip_hash_prefix(line: &str) -> String {
    match line.split_once(char::is_whitespace) {
        Some((_, subject)) => subject.trim_start().to_string(),
        None => line.to_string(),
    }
}

/// Collect the full context.
///
/// The four reads are independent and run concurrently. Diff failure (the
/// mandatory piece) aborts the whole step; recent-commit failure degrades.
pub async fn collect_context(cwd: &Path, max_diff_size: usize) -> Result<GitContext, GitError> {
    assert_repository(cwd).await?;

    let (diff, files, branch, recent) = tokio::join!(
        staged_diff(cwd, max_diff_size),
        staged_files(cwd),
        current_branch(cwd),
        recent_commits(cwd, RECENT_COMMIT_COUNT),
    );

    Ok(GitContext {
        staged_diff: diff?,
        changed_files: files?,
        branch_name: branch?,
        recent_commits: recent,
    })
}
