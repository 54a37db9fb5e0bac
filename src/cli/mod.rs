//! CLI argument parsing for mrsync.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// mrsync: Sync AI-generated review comments into GitLab merge requests.
///
/// Review comments are read from a JSON file produced by an external
/// reviewer (typically an LLM). Comments whose target line is part of the
/// merge request's visible diff are posted as inline discussions; the rest
/// become plain notes with a deep link to the file at the head commit.
#[derive(Parser, Debug)]
#[command(name = "mrsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for mrsync.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synchronize review comments into the merge request.
    ///
    /// Finds the open merge request for the current branch, fetches its
    /// diff snapshot once, replaces notes from previous sync runs, and
    /// posts each comment inline where possible.
    Sync(SyncArgs),

    /// Show what a sync run would post, without posting anything.
    ///
    /// Fetches the merge request and its changes (read-only) and prints
    /// the dispatch decision for every comment in the review file.
    Preview(PreviewArgs),

    /// Diagnose the local environment and GitLab connectivity.
    ///
    /// Checks the git checkout, configuration, access token, project
    /// detection, API reachability, and merge request lookup.
    Doctor,
}

/// Arguments for the `sync` command.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the review JSON file (defaults to `review_file` from config).
    pub review_file: Option<PathBuf>,

    /// Source branch of the merge request (defaults to the checked-out branch).
    #[arg(long)]
    pub branch: Option<String>,

    /// Merge request IID (skips the branch lookup).
    #[arg(long)]
    pub mr: Option<u64>,

    /// Project path or numeric id (overrides config and remote detection).
    #[arg(long)]
    pub project: Option<String>,

    /// Keep notes from previous sync runs instead of replacing them.
    #[arg(long)]
    pub keep_existing: bool,
}

/// Arguments for the `preview` command.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Path to the review JSON file (defaults to `review_file` from config).
    pub review_file: Option<PathBuf>,

    /// Source branch of the merge request (defaults to the checked-out branch).
    #[arg(long)]
    pub branch: Option<String>,

    /// Merge request IID (skips the branch lookup).
    #[arg(long)]
    pub mr: Option<u64>,

    /// Project path or numeric id (overrides config and remote detection).
    #[arg(long)]
    pub project: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sync_with_flags() {
        let cli = Cli::try_parse_from([
            "mrsync",
            "sync",
            "review.json",
            "--branch",
            "feature/login",
            "--mr",
            "42",
            "--keep-existing",
        ])
        .unwrap();

        match cli.command {
            Command::Sync(args) => {
                assert_eq!(args.review_file, Some(PathBuf::from("review.json")));
                assert_eq!(args.branch.as_deref(), Some("feature/login"));
                assert_eq!(args.mr, Some(42));
                assert!(args.keep_existing);
            }
            other => panic!("expected sync command, got {:?}", other),
        }
    }

    #[test]
    fn sync_arguments_are_optional() {
        let cli = Cli::try_parse_from(["mrsync", "sync"]).unwrap();

        match cli.command {
            Command::Sync(args) => {
                assert!(args.review_file.is_none());
                assert!(args.branch.is_none());
                assert!(args.mr.is_none());
                assert!(!args.keep_existing);
            }
            other => panic!("expected sync command, got {:?}", other),
        }
    }

    #[test]
    fn preview_rejects_keep_existing() {
        let result = Cli::try_parse_from(["mrsync", "preview", "--keep-existing"]);
        assert!(result.is_err());
    }

    #[test]
    fn doctor_takes_no_arguments() {
        let cli = Cli::try_parse_from(["mrsync", "doctor"]).unwrap();
        assert!(matches!(cli.command, Command::Doctor));
    }
}
