//! Orchestrator for a complete repo-sync run
//!
//! This module sequences the phases behind a single entry point, owning the
//! in-memory manifest for the duration of the run.

use log::info;

use super::{discovery, reconcile, RuntimeOptions};
use crate::error::Result;
use crate::manifest::{self, Manifest};
use crate::phases::reconcile::ReconcileReport;
use crate::repository::GitOperations;

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// The manifest as it stood at the end of the run.
    pub manifest: Manifest,
    /// Reconcile outcomes, `None` when upgrading was disabled.
    pub report: Option<ReconcileReport>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.report.as_ref().is_some_and(ReconcileReport::has_failures)
    }
}

/// Execute a complete run.
///
/// 1. Load the manifest from the root directory
/// 2. Discover repositories and merge them in (if `update`)
/// 3. Reconcile every manifest entry (if `upgrade`)
/// 4. Write the manifest back (if `update`)
///
/// Errors from loading, discovery, or writing end the run. Failures inside
/// reconciliation are recorded per repository in the returned report.
pub fn execute(options: &RuntimeOptions, git: &dyn GitOperations) -> Result<RunSummary> {
    let manifest_path = options.manifest_path();
    let mut manifest = manifest::load(&manifest_path)?;
    info!(
        "Loaded {} repositories from {}",
        manifest.len(),
        manifest_path.display()
    );

    if options.update {
        discovery::execute(&mut manifest, options)?;
    }

    let report = if options.upgrade {
        Some(reconcile::execute(git, &manifest, options))
    } else {
        None
    };

    if options.update {
        manifest::save(&manifest_path, &manifest)?;
        info!("Wrote {}", manifest_path.display());
    }

    Ok(RunSummary { manifest, report })
}
