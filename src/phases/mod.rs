//! The phases of a repo-sync run.
//!
//! ## Overview
//!
//! A run goes through these steps, in order:
//! 1. Load - Read `repositories.txt` from the root directory
//! 2. Discovery - Walk the root for `.git` directories and merge them into the manifest (update)
//! 3. Reconcile - Clone, fetch, and fast-forward every manifest entry (upgrade)
//! 4. Persist - Write the merged manifest back (update)
//!
//! Steps 2 and 4 only run when updating is enabled, step 3 only when
//! upgrading is enabled. [`orchestrator`] sequences them.

use std::path::{Path, PathBuf};

use crate::defaults::{default_root_dir, manifest_path, DEFAULT_BRANCH};

pub mod discovery;
pub mod orchestrator;
pub mod reconcile;

/// Options for one run, fixed once the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Directory that is scanned and that holds the manifest.
    pub root_dir: PathBuf,
    /// Discover repositories and write the manifest back.
    pub update: bool,
    /// Clone, fetch, and fast-forward the manifest's repositories.
    pub upgrade: bool,
    /// Branch the fast-forward gate requires.
    pub default_branch: String,
    /// Exclude repositories without an origin URL instead of aborting discovery.
    pub skip_unresolved: bool,
}

impl RuntimeOptions {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            update: true,
            upgrade: true,
            default_branch: DEFAULT_BRANCH.to_string(),
            skip_unresolved: false,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Location of `repositories.txt` for this run.
    pub fn manifest_path(&self) -> PathBuf {
        manifest_path(&self.root_dir)
    }
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self::new(default_root_dir())
    }
}
