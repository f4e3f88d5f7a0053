//! # Repo Sync Library
//!
//! This library keeps a tree of git checkouts up to date. It is used by the
//! `repo-sync` command-line tool but can also be driven directly.
//!
//! ## Quick Example
//!
//! ```
//! use repo_sync::manifest::{merge, RepositoryEntry};
//!
//! let known = vec![RepositoryEntry::new("/src/a", "https://example.com/a.git")];
//! let found = vec![
//!     RepositoryEntry::new("/src/b", "https://example.com/b.git"),
//!     RepositoryEntry::new("/src/a", "git@example.com:a.git"),
//! ];
//!
//! let merged = merge(known, found);
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged[0].remote, "git@example.com:a.git");
//! ```
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: The `repositories.txt` YAML file listing each
//!   repository's directory and `origin` URL, plus the merge that folds newly
//!   discovered repositories into it.
//! - **Git (`git`, `repository`)**: Thin wrappers over the system `git`
//!   executable behind the `GitOperations` trait.
//! - **Fast-forward gate (`status`)**: Decides from `git status` output whether
//!   a pull can only ever fast-forward a clean working tree.
//! - **Phases (`phases`)**: Discovery, reconciliation, and the orchestrator
//!   that sequences them.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute`:
//!
//! 1.  **Load**: Read the manifest from the root directory.
//! 2.  **Discovery**: Walk the root for `.git` directories and merge them in.
//! 3.  **Reconcile**: Clone missing repositories, fetch, and fast-forward the
//!     ones the gate accepts.
//! 4.  **Persist**: Write the merged manifest back.
//!
//! Discovery and persist run when updating is enabled; reconcile runs when
//! upgrading is enabled.

pub mod defaults;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod phases;
pub mod repository;
pub mod status;

#[cfg(test)]
mod manifest_proptest;
