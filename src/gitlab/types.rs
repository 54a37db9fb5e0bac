//! Wire models for the GitLab REST API (v4).
//!
//! Only the fields mrsync reads are declared; the API returns more and
//! serde ignores the rest.

use serde::{Deserialize, Serialize};

/// A project, as returned by `GET /projects/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub path_with_namespace: String,
    /// Browser URL of the project; base for fallback deep links.
    pub web_url: String,
}

/// A merge request, as returned by the list and detail endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped IID used in API paths and `!N` references.
    pub iid: u64,
    pub title: String,
    pub source_branch: String,
    pub web_url: String,
}

/// The commit triple pinning a diff view to one comparison snapshot.
///
/// Every positional post in a sync run reuses the same triple, so all
/// anchors stay consistent even if the remote branch advances mid-run.
#[derive(Debug, Clone, Deserialize)]
pub struct DiffRefs {
    pub base_sha: String,
    pub head_sha: String,
    pub start_sha: String,
}

/// One changed file in the merge request diff.
#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    pub old_path: String,
    pub new_path: String,
    /// Unified diff body for this file (hunks only, no `diff --git` preamble).
    pub diff: String,
    /// Deleted files have no head-commit blob to deep-link.
    #[serde(default)]
    pub deleted_file: bool,
}

/// Response of `GET /projects/:id/merge_requests/:iid/changes`.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequestChanges {
    pub changes: Vec<Change>,
    pub diff_refs: DiffRefs,
}

/// A note (comment) on a merge request.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub id: u64,
    pub body: String,
    /// System notes are GitLab-generated (pushes, status changes).
    #[serde(default)]
    pub system: bool,
}

/// Position payload anchoring an inline discussion to a diff line.
///
/// The SHAs must come from the diff-refs snapshot the line was located
/// against; mixing snapshots makes the server reject the position.
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionPosition {
    pub base_sha: String,
    pub start_sha: String,
    pub head_sha: String,
    pub position_type: String,
    pub old_path: String,
    pub new_path: String,
    /// Absent for added lines, which only exist on the new side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<u64>,
    pub new_line: u64,
}
