//! Review input loading for mrsync.
//!
//! The review file is produced by an external reviewer (an LLM in the
//! usual pipeline) and is the only input mrsync does not compute itself.
//! Comments are read once, validated, and never mutated afterwards.

use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// A single review comment targeting a line in the post-change file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Repository-relative path of the reviewed file.
    pub file: String,

    /// 1-based line number in the new version of the file.
    pub line: u64,

    /// The review finding, in markdown.
    pub description: String,

    /// Optional replacement text for the target line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Accepted review file shapes.
///
/// Reviewer output varies between a bare array and an object wrapping it;
/// both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReviewDocument {
    Comments(Vec<ReviewComment>),
    Wrapped { comments: Vec<ReviewComment> },
}

/// Load and validate review comments from a JSON file.
///
/// # Returns
///
/// * `Ok(Vec<ReviewComment>)` - Parsed and validated comments
/// * `Err(SyncError::UserError)` - Unreadable file, bad JSON, or invalid entries
pub fn load_review<P: AsRef<Path>>(path: P) -> Result<Vec<ReviewComment>> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        SyncError::UserError(format!(
            "failed to read review file '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_review(&content)
}

/// Parse review comments from a JSON string.
pub fn parse_review(json: &str) -> Result<Vec<ReviewComment>> {
    let document: ReviewDocument = serde_json::from_str(json)
        .map_err(|e| SyncError::UserError(format!("failed to parse review JSON: {}", e)))?;

    let comments = match document {
        ReviewDocument::Comments(comments) => comments,
        ReviewDocument::Wrapped { comments } => comments,
    };

    validate_comments(&comments)?;
    Ok(comments)
}

/// Validate comment fields, naming the offending entry on failure.
fn validate_comments(comments: &[ReviewComment]) -> Result<()> {
    for (index, comment) in comments.iter().enumerate() {
        if comment.file.trim().is_empty() {
            return Err(SyncError::UserError(format!(
                "review comment {}: file path is empty",
                index + 1
            )));
        }

        if comment.line == 0 {
            return Err(SyncError::UserError(format!(
                "review comment {} ('{}'): line numbers are 1-based, got 0",
                index + 1,
                comment.file
            )));
        }

        if comment.description.trim().is_empty() {
            return Err(SyncError::UserError(format!(
                "review comment {} ('{}:{}'): description is empty",
                index + 1,
                comment.file,
                comment.line
            )));
        }
    }

    Ok(())
}
