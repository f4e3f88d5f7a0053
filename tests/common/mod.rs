//! Shared test utilities for integration and E2E tests.
//!
//! This module provides fixtures and helper functions to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::EMPTY);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git;
    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Common manifest YAML snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Manifest with no repositories.
    pub const EMPTY: &str = "repos: []\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "repos: [unclosed";

    /// Manifest whose only entry lacks a remote.
    pub const MISSING_REMOTE: &str = "repos:\n- directory: /r/a\n";
}

/// A test fixture that provides a temporary root directory, optionally with
/// a `repositories.txt` manifest and fake repositories under it.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_manifest(manifests::EMPTY)
///     .with_fake_repo("github.com/a/one", Some("https://example.com/one.git"));
///
/// fixture.command().arg("--upgrade=false").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `repositories.txt` manifest with the given content.
    #[allow(dead_code)]
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp_dir
            .child("repositories.txt")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Add a directory that looks like a repository: a `.git` directory with
    /// a `config` file, carrying an `origin` URL when `remote` is given.
    #[allow(dead_code)]
    pub fn with_fake_repo(self, path: &str, remote: Option<&str>) -> Self {
        let mut config = String::from("[core]\n\trepositoryformatversion = 0\n\tbare = false\n");
        if let Some(url) = remote {
            config.push_str(&format!(
                "[remote \"origin\"]\n\turl = {}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n",
                url
            ));
        }
        self.temp_dir
            .child(path)
            .child(".git")
            .child("config")
            .write_str(&config)
            .expect("Failed to write git config");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a directory inside the fixture.
    pub fn dir(&self, path: &str) -> PathBuf {
        self.temp_dir.path().join(path)
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Get the path to the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.temp_dir.path().join("repositories.txt")
    }

    /// Create a command for the repo-sync binary rooted at this fixture.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repo-sync");
        cmd.arg("--root-directory")
            .arg(self.path())
            .arg("--color")
            .arg("never")
            .env_remove("RUST_LOG")
            .env_remove("REPO_SYNC_BRANCH");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Helpers that drive the real `git` executable.
#[allow(dead_code)]
pub mod git {
    use super::*;

    /// Run git in `dir`, panicking with stderr on failure.
    pub fn run(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Configure identity and signing so commits work on any machine.
    pub fn configure_identity(dir: &Path) {
        run(dir, &["config", "user.name", "Test User"]);
        run(dir, &["config", "user.email", "test@example.com"]);
        run(dir, &["config", "commit.gpgsign", "false"]);
    }

    /// Create a bare repository at `remote` whose `master` branch holds one
    /// commit, seeded through a scratch clone at `seed`.
    pub fn create_remote(remote: &Path, seed: &Path) {
        std::fs::create_dir_all(remote).expect("Failed to create remote dir");
        run(remote, &["init", "--bare", "-q"]);
        run(remote, &["symbolic-ref", "HEAD", "refs/heads/master"]);

        std::fs::create_dir_all(seed).expect("Failed to create seed dir");
        run(seed, &["init", "-q"]);
        run(seed, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        configure_identity(seed);
        run(seed, &["remote", "add", "origin", &remote.to_string_lossy()]);
        commit_file(seed, "README.md", "# seed\n", "Initial commit");
        run(seed, &["push", "-q", "origin", "master"]);
    }

    /// Write `file_name`, commit it, and leave the commit local.
    pub fn commit_file(dir: &Path, file_name: &str, content: &str, message: &str) {
        std::fs::write(dir.join(file_name), content).expect("Failed to write file");
        run(dir, &["add", file_name]);
        run(dir, &["commit", "-q", "-m", message]);
    }

    /// Commit a new file in `seed` and push it to its origin.
    pub fn push_new_commit(seed: &Path, file_name: &str) {
        commit_file(seed, file_name, "upstream change\n", "Upstream change");
        run(seed, &["push", "-q", "origin", "master"]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_manifest() {
        let fixture = TestFixture::new().with_manifest(manifests::EMPTY);
        assert!(fixture.manifest_path().exists());
    }

    #[test]
    fn test_fixture_with_fake_repo() {
        let fixture = TestFixture::new().with_fake_repo("a/b", Some("u"));
        let config = std::fs::read_to_string(fixture.dir("a/b/.git/config")).unwrap();
        assert!(config.contains("[remote \"origin\"]"));
    }

    #[test]
    fn test_manifests_are_valid_yaml() {
        for manifest in [manifests::EMPTY, manifests::MISSING_REMOTE] {
            serde_yaml::from_str::<serde_yaml::Value>(manifest).expect("Manifest should be valid YAML");
        }
    }
}
