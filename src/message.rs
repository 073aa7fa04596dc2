//! Commit message structure: validation, parsing, and formatting of replies.

use tracing::debug;

use crate::config::Style;
use crate::error::ResponseError;

/// Upper bound on a plausible commit message reply, in bytes. Anything
/// longer is treated as a malformed or erroring provider reply.
pub const MAX_RESPONSE_LENGTH: usize = 1000;

/// A structured commit message. Replaced wholesale on edit or regenerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// Single-line summary, <= 72 chars by convention (not hard-enforced).
    pub subject: String,
    pub body: Option<Vec<String>>,
    pub reasoning: Option<String>,
}

/// Reject replies that cannot plausibly be a commit message.
pub fn validate_response(response: &str) -> Result<(), ResponseError> {
    if response.trim().is_empty() {
        return Err(ResponseError::Empty);
    }
    if response.len() > MAX_RESPONSE_LENGTH {
        return Err(ResponseError::TooLong {
            len: response.len(),
            limit: MAX_RESPONSE_LENGTH,
        });
    }
    Ok(())
}

/// Whether a subject line carries a recognized conventional-commit prefix.
pub fn is_conventional_subject(subject: &str) -> bool {
    let re =
        regex_lite::Regex::new(r"^(feat|fix|chore|docs|style|refactor|test|perf)(\(.+\))?:\s*.+")
            .unwrap();
    re.is_match(subject)
}

/// Split reply text into subject and body.
///
/// The first non-empty line (trimmed) becomes the subject; remaining
/// non-empty lines (each trimmed) become the body. A conventional-style
/// request whose subject lacks a type prefix is accepted as-is; the model's
/// choice stands.
pub fn parse_commit_message(text: &str, style: Style) -> Result<CommitMessage, ResponseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return Err(ResponseError::Empty);
    };
    let subject = (*first).to_string();

    if style == Style::Conventional && !is_conventional_subject(&subject) {
        debug!("Subject lacks a conventional type prefix, accepting as-is: {subject}");
    }

    let body = if rest.is_empty() {
        None
    } else {
        Some(rest.iter().map(|line| (*line).to_string()).collect())
    };

    Ok(CommitMessage {
        subject,
        body,
        reasoning: None,
    })
}

/// Render a message to text.
///
/// This is the canonical form: it feeds the manual-edit UI and the final
/// commit. Reasoning is appended only when `explain` is set.
pub fn format_commit_message(message: &CommitMessage, explain: bool) -> String {
    let mut result = message.subject.clone();

    if let Some(body) = &message.body
        && !body.is_empty()
    {
        result.push_str("\n\n");
        result.push_str(&body.join("\n"));
    }

    if explain
        && let Some(reasoning) = &message.reasoning
    {
        result.push_str("\n\n---\nReasoning: ");
        result.push_str(reasoning);
    }

    result
}
