//! Staged diff collection and size-bounded truncation.

use std::path::Path;

use crate::error::GitError;

use super::runner::run_git;

/// Marker line appended when a diff is cut short for size reasons.
pub const TRUNCATION_MARKER: &str = "[diff truncated for size]";

/// Fetch the unified diff of staged changes, truncated to `max_size` bytes.
///
/// An empty diff is a terminal error: there is nothing to describe.
pub async fn staged_diff(cwd: &Path, max_size: usize) -> Result<String, GitError> {
    let output = run_git(cwd, &["diff", "--staged"]).await?;
    if !output.success {
        return Err(GitError::CommandFailed {
            operation: "diff --staged".to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }

    if output.stdout.trim().is_empty() {
        return Err(GitError::NoStagedChanges);
    }

    Ok(truncate_at_line_boundary(&output.stdout, max_size))
}

/// List paths with staged changes, in git's own order.
pub async fn staged_files(cwd: &Path) -> Result<Vec<String>, GitError> {
    let output = run_git(cwd, &["diff", "--staged", "--name-only"]).await?;
    if !output.success {
        return Err(GitError::CommandFailed {
            operation: "diff --staged --name-only".to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(output
        .stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect())
}

/// Truncate to the largest prefix of complete lines within `max_size`
/// bytes, then append the truncation marker. Never cuts mid-line.
pub fn truncate_at_line_boundary(diff: &str, max_size: usize) -> String {
    if diff.len() <= max_size {
        return diff.to_string();
    }

    let mut end = 0;
    for line in diff.split_inclusive('\n') {
        if end + line.len() > max_size {
            break;
        }
        end += line.len();
    }

    let mut truncated = diff[..end].to_string();
    if !truncated.is_empty() && !truncated.ends_with('\n') {
        truncated.push('\n');
    }
    truncated.push_str(TRUNCATION_MARKER);
    truncated.push('\n');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_diff_passes_through_unmodified() {
        let diff = "diff --git a/x b/x\n+foo\n";
        assert_eq!(truncate_at_line_boundary(diff, 10_000), diff);
    }

    #[test]
    fn exact_size_diff_passes_through_unmodified() {
        let diff = "line one\nline two\n";
        assert_eq!(truncate_at_line_boundary(diff, diff.len()), diff);
    }

    #[test]
    fn long_diff_is_cut_at_a_line_boundary() {
        let diff = "aaaa\nbbbb\ncccc\ndddd\n";
        let result = truncate_at_line_boundary(diff, 12);

        // "aaaa\nbbbb\n" is 10 bytes; "cccc\n" would push it to 15 > 12.
        assert_eq!(result, format!("aaaa\nbbbb\n{TRUNCATION_MARKER}\n"));
    }

    #[test]
    fn prefix_before_marker_never_exceeds_max_size() {
        let diff: String = (0..100).map(|i| format!("line number {i}\n")).collect();
        for max_size in [0, 1, 13, 50, 100, 500] {
            let result = truncate_at_line_boundary(&diff, max_size);
            let prefix = result
                .strip_suffix(&format!("{TRUNCATION_MARKER}\n"))
                .expect("marker present");
            assert!(prefix.len() <= max_size, "max_size={max_size}: {prefix:?}");
            assert!(prefix.is_empty() || prefix.ends_with('\n'));
            // The prefix must be a literal prefix of the input, i.e. no
            // mid-line cut anywhere.
            assert!(diff.starts_with(prefix));
        }
    }

    #[test]
    fn oversized_first_line_leaves_only_the_marker() {
        let diff = "x".repeat(100);
        let result = truncate_at_line_boundary(&diff, 10);
        assert_eq!(result, format!("{TRUNCATION_MARKER}\n"));
    }
}
