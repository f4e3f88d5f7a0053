//! # Manifest Store
//!
//! This module defines the repository manifest (`repositories.txt`) and the
//! functions that load, merge, and persist it.
//!
//! ## Format
//!
//! The manifest is YAML with a single top-level `repos` key holding a list of
//! records:
//!
//! ```yaml
//! repos:
//! - directory: /home/me/src/github.com/rust-lang/cargo
//!   remote: https://github.com/rust-lang/cargo.git
//! - directory: /home/me/src/github.com/serde-rs/serde
//!   remote: git@github.com:serde-rs/serde.git
//! ```
//!
//! The directory is the unique key. Both fields must be non-empty.
//!
//! ## Merging
//!
//! [`merge`] combines the entries already in the manifest with freshly
//! discovered ones. Later entries overwrite earlier ones for the same
//! directory, and the result is sorted by directory. Nothing here mutates an
//! individual entry; the merged list replaces the old one wholesale.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A known repository: where it lives locally and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Local working tree directory.
    pub directory: PathBuf,
    /// URL of the `origin` remote.
    pub remote: String,
}

impl RepositoryEntry {
    pub fn new(directory: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            remote: remote.into(),
        }
    }
}

/// The persisted list of known repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub repos: Vec<RepositoryEntry>,
}

impl Manifest {
    pub fn new(repos: Vec<RepositoryEntry>) -> Self {
        Self { repos }
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepositoryEntry> {
        self.repos.iter()
    }

    /// Replace the entries with `self` merged with `discovered`.
    ///
    /// Discovered entries win over existing ones for the same directory.
    pub fn absorb(&mut self, discovered: Vec<RepositoryEntry>) {
        let existing = std::mem::take(&mut self.repos);
        self.repos = merge(existing, discovered);
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a RepositoryEntry;
    type IntoIter = std::slice::Iter<'a, RepositoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.repos.iter()
    }
}

/// Merge two entry lists keyed by directory and sort the result.
///
/// Entries from `later` overwrite entries from `earlier` with the same
/// directory; within one list the last occurrence wins. The output is sorted
/// ascending by the directory's byte representation.
pub fn merge(earlier: Vec<RepositoryEntry>, later: Vec<RepositoryEntry>) -> Vec<RepositoryEntry> {
    let mut by_directory: HashMap<PathBuf, String> =
        HashMap::with_capacity(earlier.len() + later.len());

    for entry in earlier.into_iter().chain(later) {
        by_directory.insert(entry.directory, entry.remote);
    }

    let mut merged: Vec<RepositoryEntry> = by_directory
        .into_iter()
        .map(|(directory, remote)| RepositoryEntry { directory, remote })
        .collect();
    merged.sort_by(|a, b| a.directory.as_os_str().cmp(b.directory.as_os_str()));
    merged
}

/// Parse manifest YAML.
///
/// `origin` is only used to label errors. Blank content is an empty manifest.
pub fn parse(content: &str, origin: &Path) -> Result<Manifest> {
    if content.trim().is_empty() {
        return Ok(Manifest::default());
    }

    let manifest: Manifest = serde_yaml::from_str(content).map_err(|e| Error::ManifestParse {
        path: origin.display().to_string(),
        message: e.to_string(),
        hint: Some("Expected a top-level 'repos' list of {directory, remote} records".to_string()),
    })?;

    validate(&manifest, origin)?;
    Ok(manifest)
}

fn validate(manifest: &Manifest, origin: &Path) -> Result<()> {
    for (index, entry) in manifest.repos.iter().enumerate() {
        let missing = if entry.directory.as_os_str().is_empty() {
            Some("directory")
        } else if entry.remote.trim().is_empty() {
            Some("remote")
        } else {
            None
        };

        if let Some(field) = missing {
            return Err(Error::ManifestParse {
                path: origin.display().to_string(),
                message: format!("entry {} has an empty '{}'", index + 1, field),
                hint: Some("Every entry needs both 'directory' and 'remote'".to_string()),
            });
        }
    }
    Ok(())
}

/// Load the manifest at `path`.
pub fn load(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::ManifestNotFound {
            path: path.display().to_string(),
        },
        ErrorKind::InvalidData => Error::ManifestParse {
            path: path.display().to_string(),
            message: e.to_string(),
            hint: Some("The manifest must be UTF-8 encoded YAML".to_string()),
        },
        _ => Error::Io(e),
    })?;
    parse(&content, path)
}

/// Write the full manifest to `path`, replacing any previous content.
pub fn save(path: &Path, manifest: &Manifest) -> Result<()> {
    let yaml = serde_yaml::to_string(manifest)?;
    fs::write(path, yaml).map_err(|e| Error::ManifestWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
