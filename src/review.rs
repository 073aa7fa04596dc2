//! The interactive accept / edit / regenerate / cancel loop.
//!
//! States: Generating -> Reviewing -> {Committing | Regenerating ->
//! Reviewing | Editing -> Committing | Cancelled}. At most one message is
//! live at a time; every external effect goes through an injected
//! collaborator so the machine runs without real I/O in tests.

use anyhow::anyhow;
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::Error;
use crate::git::GitPort;
use crate::message::{CommitMessage, format_commit_message, parse_commit_message};
use crate::provider::ProviderPort;
use crate::ui::{ReviewAction, ReviewUi};

/// How a review session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    Cancelled,
}

/// Drives generation, review, and the final commit.
pub struct InteractionController<'a> {
    config: &'a GenerationConfig,
    provider: &'a dyn ProviderPort,
    git: &'a dyn GitPort,
    ui: &'a dyn ReviewUi,
}

impl<'a> InteractionController<'a> {
    pub fn new(
        config: &'a GenerationConfig,
        provider: &'a dyn ProviderPort,
        git: &'a dyn GitPort,
        ui: &'a dyn ReviewUi,
    ) -> Self {
        Self {
            config,
            provider,
            git,
            ui,
        }
    }

    /// Run the loop to completion: either a commit or a cancellation.
    pub async fn run(&self) -> Result<Outcome, Error> {
        let mut message = self.generate().await?;

        loop {
            self.ui.display(&message);

            if self.config.auto_commit {
                return self.commit(&message).await;
            }

            match self.ui.choose().map_err(Error::Unexpected)? {
                ReviewAction::Accept => return self.commit(&message).await,
                ReviewAction::Edit => {
                    let current = format_commit_message(&message, self.config.explain);
                    if let Some(edited) = self.ui.edit(&current).map_err(Error::Unexpected)? {
                        message = parse_commit_message(&edited, self.config.style)
                            .map_err(|e| Error::Unexpected(anyhow!("Edited message rejected: {e}")))?;
                    }
                    // Edits commit without re-confirmation.
                    return self.commit(&message).await;
                }
                ReviewAction::Regenerate => {
                    self.ui.info("Regenerating commit message...");
                    message = self.generate().await?;
                }
                ReviewAction::Cancel => {
                    self.ui.info("Commit cancelled.");
                    return Ok(Outcome::Cancelled);
                }
            }
        }
    }

    /// One full generation cycle: fresh context, one provider call.
    async fn generate(&self) -> Result<CommitMessage, Error> {
        let context = self.git.collect_context(self.config.max_diff_size).await?;
        debug!(
            "Collected context: {} changed files on branch {}",
            context.changed_files.len(),
            context.branch_name
        );

        let message = self
            .provider
            .generate_commit_message(&context, self.config)
            .await?;
        Ok(message)
    }

    async fn commit(&self, message: &CommitMessage) -> Result<Outcome, Error> {
        let text = format_commit_message(message, self.config.explain);
        self.git.commit(&text).await?;
        self.ui.success("Commit successful!");
        Ok(Outcome::Committed)
    }
}
