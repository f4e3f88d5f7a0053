//! Default values for repo-sync configuration.
//!
//! This module provides centralized default values used by the CLI and the
//! library, ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Name of the manifest file kept at the root of the scanned tree.
pub const MANIFEST_FILE_NAME: &str = "repositories.txt";

/// Name of the git metadata directory that marks a repository root.
pub const GIT_DIR_NAME: &str = ".git";

/// Branch a repository must be on for the fast-forward gate to pass.
pub const DEFAULT_BRANCH: &str = "master";

/// Name of the remote whose URL is recorded in the manifest.
pub const ORIGIN_REMOTE: &str = "origin";

/// Returns the default root directory to scan.
///
/// Uses `~/src` when the home directory is known, falling back to the
/// current directory otherwise.
///
/// This can be overridden by the `--root-directory` CLI flag or the
/// `REPO_SYNC_ROOT` environment variable.
pub fn default_root_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("src"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the manifest path for a given root directory.
pub fn manifest_path(root_dir: &Path) -> PathBuf {
    root_dir.join(MANIFEST_FILE_NAME)
}
