use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use crate::defaults::{GIT_DIR_NAME, ORIGIN_REMOTE};
use crate::error::{Error, Result};

// Git command arguments
const GIT_FETCH_ARGS: &[&str] = &["fetch"];
const GIT_STATUS_ARGS: &[&str] = &["status", "--porcelain=v2", "--branch"];
const GIT_PULL_ARGS: &[&str] = &["pull", "--ff-only"];

/// Run `git` with `args` inside `dir` and return its stdout.
///
/// A non-zero exit becomes `Error::GitCommand` carrying the captured stderr.
fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let command = args.join(" ");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            path: dir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command,
            path: dir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Whether `dir` already holds a `.git` metadata entry.
///
/// A missing `.git` (or a missing `dir`) is `Ok(false)`; any other stat
/// failure is an error.
pub fn has_git_dir(dir: &Path) -> Result<bool> {
    match fs::metadata(dir.join(GIT_DIR_NAME)) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Clone `url` into `target_dir`.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
///
/// `git clone` creates missing parent directories itself and refuses to
/// clone into a non-empty directory; both behaviors are left to git.
pub fn clone(url: &str, target_dir: &Path) -> Result<()> {
    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: format!("clone {}", url),
            path: target_dir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let stderr = if stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "{}\nMake sure your SSH key is loaded or git credentials are configured.",
                stderr.trim()
            )
        } else {
            stderr.trim().to_string()
        };

        return Err(Error::GitCommand {
            command: format!("clone {}", url),
            path: target_dir.display().to_string(),
            stderr,
        });
    }

    Ok(())
}

/// Fetch from the default remote without touching the working tree.
pub fn fetch(repo_dir: &Path) -> Result<()> {
    run_git(repo_dir, GIT_FETCH_ARGS).map(|_| ())
}

/// Branch and working tree status in porcelain v2 form.
pub fn status(repo_dir: &Path) -> Result<String> {
    run_git(repo_dir, GIT_STATUS_ARGS)
}

/// Fast-forward the checked-out branch to its upstream.
pub fn pull(repo_dir: &Path) -> Result<()> {
    run_git(repo_dir, GIT_PULL_ARGS).map(|_| ())
}

/// Read the `origin` remote URL from a `.git` directory's `config` file.
pub fn read_origin_url(git_dir: &Path) -> Result<String> {
    let config_path = git_dir.join("config");
    let config = ini::Ini::load_from_file(&config_path).map_err(|e| Error::GitConfigParse {
        path: config_path.display().to_string(),
        message: e.to_string(),
    })?;

    let section_name = format!("remote \"{}\"", ORIGIN_REMOTE);
    let section = config
        .section(Some(section_name.as_str()))
        .ok_or_else(|| Error::RemoteNotFound {
            path: git_dir.display().to_string(),
            message: format!("can't find \"{}\"", ORIGIN_REMOTE),
        })?;

    match section.get("url") {
        Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        _ => Err(Error::RemoteNotFound {
            path: git_dir.display().to_string(),
            message: format!("can't find \"{}.url\"", ORIGIN_REMOTE),
        }),
    }
}
