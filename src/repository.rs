//! # Git Backend Seam
//!
//! The reconciler never calls `git` directly. It goes through the
//! [`GitOperations`] trait, so the clone/fetch/status/pull protocol can be
//! exercised in tests with a scripted backend instead of real repositories
//! and network access.
//!
//! In the application, [`DefaultGitOperations`] forwards every call to the
//! system `git` wrappers in [`crate::git`].

use crate::error::Result;
use std::path::Path;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Whether `dir` already contains git metadata.
    fn is_repository(&self, dir: &Path) -> Result<bool>;

    /// Clones `url` into `target_dir`.
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// Fetches from the remote without merging into the working tree.
    fn fetch(&self, repo_dir: &Path) -> Result<()>;

    /// Returns the branch and working tree status text.
    ///
    /// Either porcelain v2 (`--branch`) output or human-readable text is
    /// accepted by the fast-forward gate.
    fn status(&self, repo_dir: &Path) -> Result<String>;

    /// Fast-forwards the checked-out branch.
    fn pull(&self, repo_dir: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn is_repository(&self, dir: &Path) -> Result<bool> {
        crate::git::has_git_dir(dir)
    }

    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone(url, target_dir)
    }

    fn fetch(&self, repo_dir: &Path) -> Result<()> {
        crate::git::fetch(repo_dir)
    }

    fn status(&self, repo_dir: &Path) -> Result<String> {
        crate::git::status(repo_dir)
    }

    fn pull(&self, repo_dir: &Path) -> Result<()> {
        crate::git::pull(repo_dir)
    }
}
