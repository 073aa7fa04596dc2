//! Terminal UI: message display and the review prompt.

use anyhow::{Context, Result};
use dialoguer::{Editor, Select};

use crate::message::CommitMessage;

/// User's choice at the review prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Accept,
    Edit,
    Regenerate,
    Cancel,
}

/// Injected UI callbacks so the interaction loop never touches a terminal
/// directly.
pub trait ReviewUi: Send + Sync {
    /// Show a generated message to the user.
    fn display(&self, message: &CommitMessage);

    /// Ask the user what to do with the current message.
    fn choose(&self) -> Result<ReviewAction>;

    /// Open `initial` in an editor. `None` means the editor was closed
    /// without saving.
    fn edit(&self, initial: &str) -> Result<Option<String>>;

    fn info(&self, text: &str);

    fn success(&self, text: &str);
}

const CHOICES: &[&str] = &["Accept and commit", "Edit message", "Regenerate", "Cancel"];

/// [`ReviewUi`] backed by the user's terminal.
pub struct TerminalUi;

impl ReviewUi for TerminalUi {
    fn display(&self, message: &CommitMessage) {
        println!();
        println!("Generated commit message:");
        println!();
        println!("  {}", message.subject);
        if let Some(body) = &message.body {
            println!();
            for line in body {
                println!("  {line}");
            }
        }
        println!();
    }

    fn choose(&self) -> Result<ReviewAction> {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(CHOICES)
            .default(0)
            .interact()
            .context("Review prompt failed")?;

        Ok(match selection {
            0 => ReviewAction::Accept,
            1 => ReviewAction::Edit,
            2 => ReviewAction::Regenerate,
            _ => ReviewAction::Cancel,
        })
    }

    fn edit(&self, initial: &str) -> Result<Option<String>> {
        Editor::new()
            .edit(initial)
            .context("Could not open an editor for the commit message")
    }

    fn info(&self, text: &str) {
        println!("{text}");
    }

    fn success(&self, text: &str) {
        println!("{text}");
    }
}
