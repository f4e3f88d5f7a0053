//! CLI argument parsing and run dispatch

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;

use repo_sync::defaults::{default_root_dir, DEFAULT_BRANCH};
use repo_sync::output::OutputConfig;
use repo_sync::phases::{orchestrator, RuntimeOptions};
use repo_sync::repository::DefaultGitOperations;

/// Repo Sync - Discover git repositories, record them, and fast-forward them
#[derive(Parser, Debug)]
#[command(name = "repo-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan; the manifest lives at <DIR>/repositories.txt
    ///
    /// Defaults to ~/src.
    #[arg(long = "root-directory", visible_alias = "dir", value_name = "DIR", env = "REPO_SYNC_ROOT")]
    root_directory: Option<PathBuf>,

    /// Discover repositories under the root and write the manifest back
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    update: bool,

    /// Clone missing repositories, fetch, and fast-forward clean ones
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    upgrade: bool,

    /// Branch a repository must be on to be fast-forwarded
    #[arg(long, value_name = "NAME", env = "REPO_SYNC_BRANCH", default_value = DEFAULT_BRANCH)]
    default_branch: String,

    /// Leave out repositories without an origin URL instead of aborting discovery
    #[arg(long)]
    skip_unresolved: bool,

    /// Exit with a failure status if any repository failed to update
    #[arg(long)]
    fail_on_error: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Options for the run described by these arguments.
    pub fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            root_dir: self.root_directory.clone().unwrap_or_else(default_root_dir),
            update: self.update,
            upgrade: self.upgrade,
            default_branch: self.default_branch.clone(),
            skip_unresolved: self.skip_unresolved,
        }
    }

    /// Execute the run
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level, &OutputConfig::from_env_and_flag(&self.color));

        let options = self.runtime_options();
        info!(
            "Recursively checking repositories in {}",
            options.root_dir().display()
        );

        let summary = orchestrator::execute(&options, &DefaultGitOperations)
            .with_context(|| format!("repo-sync failed for {}", options.root_dir().display()))?;

        if self.fail_on_error && summary.has_failures() {
            let failed = summary.report.as_ref().map_or(0, |r| r.failed());
            anyhow::bail!("{} repositories failed to update", failed);
        }

        Ok(())
    }
}

/// Initialize `env_logger` from the `--log-level` flag.
///
/// `RUST_LOG`, when set, is applied on top so per-module filters still work.
fn init_logging(level: &str, output: &OutputConfig) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.write_style(output.write_style());
    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}
