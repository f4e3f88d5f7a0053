//! Reconcile
//!
//! Brings every manifest entry up to date, one repository at a time:
//!
//! 1.  **Clone**: skipped silently when the directory already holds `.git`,
//!     otherwise the remote is cloned into it.
//! 2.  **Fetch**: updates remote-tracking refs without touching the working
//!     tree.
//! 3.  **Pull**: only runs when [`status::can_fast_forward`] accepts the
//!     repository's status. Anything else is skipped with a warning.
//!
//! A failing step ends work on that repository only; the loop moves on to the
//! next entry. Nothing is retried.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{error, info, warn};

use super::RuntimeOptions;
use crate::error::{Error, Result};
use crate::manifest::{Manifest, RepositoryEntry};
use crate::repository::GitOperations;
use crate::status;

/// Result of the clone step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    Cloned,
    AlreadyPresent,
}

/// Result of the pull step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Pulled,
    /// The fast-forward gate rejected the repository's state.
    SkippedUnsafe,
}

/// Final classification of one repository.
#[derive(Debug)]
pub enum RepoOutcome {
    Success,
    Skipped,
    Failed(Error),
}

impl RepoOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RepoOutcome::Success)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RepoOutcome::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RepoOutcome::Failed(_))
    }
}

/// Per-repository outcomes of one reconcile pass, in manifest order.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub outcomes: Vec<(PathBuf, RepoOutcome)>,
}

impl ReconcileReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|(_, o)| o.is_failed())
    }

    /// Outcome recorded for `directory`, if it was reconciled.
    pub fn outcome_for(&self, directory: &Path) -> Option<&RepoOutcome> {
        self.outcomes
            .iter()
            .find(|(dir, _)| dir == directory)
            .map(|(_, outcome)| outcome)
    }
}

/// Reconcile every repository in `manifest`.
pub fn execute(
    git: &dyn GitOperations,
    manifest: &Manifest,
    options: &RuntimeOptions,
) -> ReconcileReport {
    info!("Upgrading {} repositories", manifest.len());
    let start_time = Instant::now();

    let outcomes = manifest
        .iter()
        .map(|entry| {
            let outcome = reconcile_repo(git, entry, &options.default_branch);
            (entry.directory.clone(), outcome)
        })
        .collect();
    let report = ReconcileReport { outcomes };

    info!(
        "Upgraded in {:.2}s: {} succeeded, {} skipped, {} failed",
        start_time.elapsed().as_secs_f64(),
        report.succeeded(),
        report.skipped(),
        report.failed()
    );
    report
}

/// Run clone, fetch, and gated pull for one repository, logging each step.
pub fn reconcile_repo(
    git: &dyn GitOperations,
    entry: &RepositoryEntry,
    default_branch: &str,
) -> RepoOutcome {
    let dir = entry.directory.display();

    match clone_if_missing(git, entry) {
        Ok(CloneOutcome::AlreadyPresent) => {}
        Ok(CloneOutcome::Cloned) => info!("Clone to {} finished", dir),
        Err(e) => {
            error!("Clone to {} failed: {}", dir, e);
            return RepoOutcome::Failed(e);
        }
    }

    if let Err(e) = git.fetch(&entry.directory) {
        error!("Fetch in {} failed: {}", dir, e);
        return RepoOutcome::Failed(e);
    }
    info!("Fetch in {} finished", dir);

    match pull_if_safe(git, &entry.directory, default_branch) {
        Ok(PullOutcome::Pulled) => {
            info!("Upgrade in {} finished", dir);
            RepoOutcome::Success
        }
        Ok(PullOutcome::SkippedUnsafe) => {
            warn!(
                "Upgrade in {} skipped: not a clean fast-forward of origin/{}",
                dir, default_branch
            );
            RepoOutcome::Skipped
        }
        Err(e) => {
            error!("Upgrade in {} failed: {}", dir, e);
            RepoOutcome::Failed(e)
        }
    }
}

/// Clone the entry's remote unless its directory already holds git metadata.
pub fn clone_if_missing(git: &dyn GitOperations, entry: &RepositoryEntry) -> Result<CloneOutcome> {
    if git.is_repository(&entry.directory)? {
        return Ok(CloneOutcome::AlreadyPresent);
    }
    git.clone_repo(&entry.remote, &entry.directory)?;
    Ok(CloneOutcome::Cloned)
}

/// Pull only if the repository is a clean, strictly-behind copy of
/// `origin/<default_branch>`.
pub fn pull_if_safe(git: &dyn GitOperations, repo_dir: &Path, default_branch: &str) -> Result<PullOutcome> {
    let status_text = git.status(repo_dir)?;
    if !status::can_fast_forward(&status_text, default_branch)? {
        return Ok(PullOutcome::SkippedUnsafe);
    }
    git.pull(repo_dir)?;
    Ok(PullOutcome::Pulled)
}
