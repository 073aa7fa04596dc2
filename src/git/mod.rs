//! Git collaborator: context reads and the commit write via the git binary.

pub mod commit;
pub mod context;
pub mod diff;
pub mod runner;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::GitError;

pub use context::{GitContext, RECENT_COMMIT_COUNT};
pub use diff::TRUNCATION_MARKER;
pub use runner::check_git_installed;

/// Capability surface the interaction loop needs from git.
#[async_trait]
pub trait GitPort: Send + Sync {
    /// Snapshot the repository state for one generation attempt.
    async fn collect_context(&self, max_diff_size: usize) -> Result<GitContext, GitError>;

    /// Commit the staged changes with the given message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// [`GitPort`] backed by the system git binary.
pub struct ShellGit {
    cwd: PathBuf,
}

impl ShellGit {
    /// Operate on the process's current working directory.
    pub fn new() -> Self {
        Self::at(".")
    }

    /// Operate on a specific repository root.
    pub fn at(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }
}

impl Default for ShellGit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitPort for ShellGit {
    async fn collect_context(&self, max_diff_size: usize) -> Result<GitContext, GitError> {
        context::collect_context(&self.cwd, max_diff_size).await
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        commit::commit(&self.cwd, message).await
    }
}
