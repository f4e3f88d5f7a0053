//! # Repo Sync CLI
//!
//! This is the binary entry point for the `repo-sync` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and running the sync.
//! - Turning fatal errors into a failure exit status.
//!
//! The core logic is defined in the `lib.rs` library crate, ensuring that the
//! binary is a thin wrapper around the reusable library functionality.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
