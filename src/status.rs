//! Fast-forward gate.
//!
//! Before pulling, the reconciler asks `git status` about the working tree and
//! only proceeds when the repository is on the default branch, tracks
//! `origin/<default>`, has no local commits of its own, and has a clean
//! working tree. Every other state (diverged, dirty, detached, another branch)
//! is skipped.
//!
//! Two status formats are understood:
//!
//! - `git status --porcelain=v2 --branch`, which is what the system git
//!   backend requests;
//! - the human-readable `git status` text, kept for backends that only
//!   produce that.
//!
//! [`can_fast_forward`] is the single predicate the reconciler calls.

use crate::error::{Error, Result};
use regex::Regex;

const HUMAN_STATUS_PATTERN: &str = concat!(
    r"^On branch (?P<branch>\S+)\n",
    r"Your branch is (?:",
    r"behind '(?P<behind>[^']+)' by \d+ commits?, and can be fast-forwarded\.",
    r"|",
    r"up[- ]to[- ]date with '(?P<current>[^']+)'\.",
    r")\n",
    r#"(?:  \(use "git pull" to update your local branch\)\n)?"#,
    r"\n?",
    r"nothing to commit, working tree clean\n?$",
);

/// Branch and working tree state reported by `git status --porcelain=v2 --branch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchStatus {
    /// Checked-out branch, `None` when HEAD is detached.
    pub head: Option<String>,
    /// Tracked upstream, e.g. `origin/master`.
    pub upstream: Option<String>,
    /// Commits ahead of and behind the upstream. Both stay at `u32::MAX`
    /// when git reports no `branch.ab` header, as it does once the upstream
    /// branch is gone.
    pub ahead: u32,
    pub behind: u32,
    /// No staged, unstaged, unmerged, or untracked entries.
    pub clean: bool,
}

impl BranchStatus {
    /// Whether a fast-forward-only pull is safe for this state.
    pub fn is_fast_forwardable(&self, default_branch: &str) -> bool {
        let expected_upstream = format!("origin/{}", default_branch);
        self.head.as_deref() == Some(default_branch)
            && self.upstream.as_deref() == Some(expected_upstream.as_str())
            && self.ahead == 0
            && self.clean
    }
}

/// Parse porcelain v2 status output.
///
/// Returns `None` when the text carries no `# branch.` headers, which means it
/// is not porcelain v2 output with branch information.
pub fn parse_porcelain_v2(text: &str) -> Option<BranchStatus> {
    let mut status = BranchStatus {
        ahead: u32::MAX,
        behind: u32::MAX,
        clean: true,
        ..BranchStatus::default()
    };
    let mut saw_branch_header = false;

    for line in text.lines() {
        if let Some(header) = line.strip_prefix("# ") {
            if let Some(head) = header.strip_prefix("branch.head ") {
                saw_branch_header = true;
                if head != "(detached)" {
                    status.head = Some(head.to_string());
                }
            } else if let Some(upstream) = header.strip_prefix("branch.upstream ") {
                saw_branch_header = true;
                status.upstream = Some(upstream.to_string());
            } else if let Some(counts) = header.strip_prefix("branch.ab ") {
                saw_branch_header = true;
                let (ahead, behind) = parse_ahead_behind(counts);
                status.ahead = ahead;
                status.behind = behind;
            } else if header.starts_with("branch.") {
                saw_branch_header = true;
            }
        } else if !line.trim().is_empty() {
            status.clean = false;
        }
    }

    saw_branch_header.then_some(status)
}

/// Parse the `+<ahead> -<behind>` pair of a `branch.ab` header.
///
/// Unparseable counts are treated as non-zero so the gate stays closed.
fn parse_ahead_behind(counts: &str) -> (u32, u32) {
    let mut parts = counts.split_whitespace();
    let ahead = parts
        .next()
        .and_then(|p| p.strip_prefix('+'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX);
    let behind = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX);
    (ahead, behind)
}

/// Match human-readable `git status` text against the fast-forwardable shapes.
pub fn human_status_allows_pull(text: &str, default_branch: &str) -> Result<bool> {
    let regex = Regex::new(HUMAN_STATUS_PATTERN).map_err(Error::Regex)?;
    let Some(captures) = regex.captures(text) else {
        return Ok(false);
    };

    let expected_upstream = format!("origin/{}", default_branch);
    let upstream = captures
        .name("behind")
        .or_else(|| captures.name("current"))
        .map(|m| m.as_str());

    Ok(captures.name("branch").map(|m| m.as_str()) == Some(default_branch)
        && upstream == Some(expected_upstream.as_str()))
}

/// Decide whether a repository reporting `status_text` may be fast-forwarded.
///
/// Porcelain v2 output is parsed structurally; anything else is matched as
/// human-readable text.
pub fn can_fast_forward(status_text: &str, default_branch: &str) -> Result<bool> {
    match parse_porcelain_v2(status_text) {
        Some(status) => Ok(status.is_fast_forwardable(default_branch)),
        None => human_status_allows_pull(status_text, default_branch),
    }
}
