//! Prompt construction for the commit message provider.

use crate::config::GenerationConfig;
use crate::git::GitContext;

/// Fixed behavioral rules given to the model.
const SYSTEM_PROMPT: &str = "You are 'quill', an AI that generates excellent Git commit messages. Rules:
- Imperative tense
- One subject line <= 72 characters
- Optional bullets (<= 5, concise)
- No markdown blocks, no code formatting
- If style=conventional, prefix type (feat, fix, chore, docs, style, refactor, test, perf). If unsure: chore.
- Infer intent from diff and branch name but do not hallucinate functionality.
- Respect privacy: do not reveal secrets or tokens.
- Output only the commit message, no additional commentary.";

/// Build the (system, user) prompt pair.
///
/// The user prompt lists STYLE, BRANCH, FILES, RECENT, DIFF in a fixed
/// order so identical inputs always produce identical prompts.
pub fn build_prompts(context: &GitContext, config: &GenerationConfig) -> (String, String) {
    let user = format!(
        "STYLE: {}\nBRANCH: {}\nFILES: {}\nRECENT: {}\n\nDIFF:\n{}",
        config.style,
        context.branch_name,
        context.changed_files.join(", "),
        context.recent_commits.join("; "),
        context.staged_diff,
    );

    (SYSTEM_PROMPT.to_string(), user)
}
