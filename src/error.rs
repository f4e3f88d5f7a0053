//! # Error Handling
//!
//! This module defines the centralized error type for `repo-sync`. It uses
//! the `thiserror` library to build an `Error` enum covering every failure the
//! library can report, each variant carrying enough context (paths, commands,
//! captured stderr) to produce a useful log line.
//!
//! ## Key Components
//!
//! - **`Error`**: All failure modes of the tool:
//!   - manifest file missing, malformed, or not writable;
//!   - `.git/config` unreadable or missing an `origin` URL during discovery;
//!   - a `git` subprocess exiting non-zero;
//!   - raw I/O, YAML, directory walk, and regex errors.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Which of these errors end a run and which stay local to a single
//! repository is decided by the callers in `phases`, not here.

use thiserror::Error;

/// Main error type for repo-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest file does not exist.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// The manifest file exists but does not match the expected schema.
    #[error("Manifest parsing error in {path}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        path: String,
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// The manifest could not be written back to disk.
    #[error("Manifest write error for {path}: {message}")]
    ManifestWrite { path: String, message: String },

    /// A repository's `.git/config` could not be read or parsed.
    #[error("Git config parsing error in {path}: {message}")]
    GitConfigParse { path: String, message: String },

    /// A discovered repository has no usable `origin` remote.
    #[error("Remote not found in {path}: {message}")]
    RemoteNotFound { path: String, message: String },

    /// A `git` subprocess could not be started or exited non-zero.
    #[error("Git command failed in {path}: {command} - {stderr}")]
    GitCommand {
        command: String,
        path: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error raised while walking the root directory.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
