//! Git command runner and repository context for mrsync.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling, plus the helpers that derive the GitLab
//! project path from the configured remote. All git operations go through
//! this module.

use crate::error::{Result, SyncError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Arguments
///
/// * `cwd` - The working directory to run the command in
/// * `args` - The git command arguments (without "git" prefix)
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(SyncError::GitError)` - On non-zero exit code (mapped to exit code 3)
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let subcommand = args.first().copied().unwrap_or_default();

    let output = Command::new("git")
        .current_dir(cwd.as_ref())
        .args(args)
        .output()
        .map_err(|e| SyncError::GitError(format!("failed to execute git {}: {}", subcommand, e)))?;

    let git_output = GitOutput::from_output(&output);

    if !output.status.success() {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            &git_output.stdout
        } else {
            &git_output.stderr
        };

        return Err(SyncError::GitError(format!(
            "git {} failed (exit code {}): {}",
            subcommand, exit_code, error_msg
        )));
    }

    Ok(git_output)
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// This works correctly from any location within a git repository,
/// including from within worktrees.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The absolute path to the repository root
/// * `Err(SyncError::UserError)` - If not inside a git repository (exit code 1)
pub fn repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let output = run_git(cwd, &["rev-parse", "--show-toplevel"]).map_err(|_| {
        SyncError::UserError(
            "not inside a git repository.\n\n\
             Run mrsync from within the repository the merge request belongs to."
                .to_string(),
        )
    })?;
    Ok(PathBuf::from(&output.stdout))
}

/// Get the currently checked-out branch name.
///
/// A detached HEAD is a user error: the merge request lookup needs a
/// source branch name.
///
/// # Returns
///
/// * `Ok(String)` - The branch name
/// * `Err(SyncError::UserError)` - Detached HEAD (exit code 1)
/// * `Err(SyncError::GitError)` - Git command failed (exit code 3)
pub fn current_branch<P: AsRef<Path>>(repo_root: P) -> Result<String> {
    let output = run_git(repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])?;

    if output.stdout == "HEAD" {
        return Err(SyncError::UserError(
            "HEAD is detached; cannot determine the source branch.\n\n\
             Check out the merge request branch or pass --branch <name>."
                .to_string(),
        ));
    }

    Ok(output.stdout)
}

/// Get the URL of the specified remote.
///
/// # Returns
///
/// * `Ok(String)` - The remote URL
/// * `Err(SyncError::GitError)` - Remote does not exist or git failed
pub fn remote_url<P: AsRef<Path>>(repo_root: P, remote: &str) -> Result<String> {
    let output = run_git(repo_root, &["remote", "get-url", remote]).map_err(|e| {
        SyncError::GitError(format!(
            "failed to read URL of remote '{}': {}\n\n\
             Set a different remote in .mrsync.yaml (remote: <name>) or set\n\
             the project explicitly (project: group/name).",
            remote, e
        ))
    })?;

    Ok(output.stdout)
}

/// Extract the `group/name` project path from a git remote URL.
///
/// Handles the common remote URL forms:
/// - `git@host:group/name.git` (scp-like)
/// - `ssh://git@host[:port]/group/name.git`
/// - `http(s)://host[:port]/group/name.git`
///
/// Subgroups (`group/sub/name`) are preserved. Returns `None` when the
/// URL does not match any known form.
pub fn project_path_from_remote(url: &str) -> Option<String> {
    let pattern = Regex::new(
        r"^(?:git@[^:/]+:|ssh://(?:[^@/]+@)?[^:/]+(?::\d+)?/|https?://[^:/]+(?::\d+)?/)(.+?)(?:\.git)?/?$",
    )
    .ok()?;

    let captures = pattern.captures(url.trim())?;
    let path = captures.get(1)?.as_str();

    // A project path always has at least a namespace and a name.
    if path.contains('/') {
        Some(path.to_string())
    } else {
        None
    }
}
