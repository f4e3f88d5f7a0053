//! Discovery
//!
//! Finds every repository under the root directory and folds the result into
//! the manifest.
//!
//! ## Process
//!
//! 1.  **Walk (`discover_repos`)**: The root is walked recursively in file
//!     name order. A directory named `.git` marks its parent as a repository
//!     root, and the walk does not descend into it.
//!
//! 2.  **Remote lookup**: The `origin` URL is read from `.git/config`. A
//!     repository without one aborts discovery with `RemoteNotFound`, unless
//!     `skip_unresolved` is set, in which case it is logged and left out.
//!
//! 3.  **Merge (`execute`)**: Discovered entries are merged into the loaded
//!     manifest, overriding existing entries for the same directory, and the
//!     result is sorted by directory.

use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use walkdir::WalkDir;

use super::RuntimeOptions;
use crate::defaults::GIT_DIR_NAME;
use crate::error::Result;
use crate::git;
use crate::manifest::{Manifest, RepositoryEntry};

/// Discover repositories under the root and merge them into `manifest`.
pub fn execute(manifest: &mut Manifest, options: &RuntimeOptions) -> Result<()> {
    info!("Updating repository list under {}", options.root_dir().display());
    let start_time = Instant::now();

    let discovered = discover_repos(options.root_dir(), options.skip_unresolved)?;
    debug!("Discovered {} repositories on disk", discovered.len());
    manifest.absorb(discovered);

    info!(
        "Updated {} repositories in {:.2}s",
        manifest.len(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Walk `root` and return one entry per repository found, in walk order.
pub fn discover_repos(root: &Path, skip_unresolved: bool) -> Result<Vec<RepositoryEntry>> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() || entry.file_name() != GIT_DIR_NAME {
            continue;
        }
        walker.skip_current_dir();

        let Some(repo_root) = entry.path().parent() else {
            continue;
        };

        match git::read_origin_url(entry.path()) {
            Ok(remote) => {
                debug!("Found {} -> {}", repo_root.display(), remote);
                found.push(RepositoryEntry::new(repo_root, remote));
            }
            Err(e) if skip_unresolved => {
                warn!("Skipping {}: {}", repo_root.display(), e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(found)
}
