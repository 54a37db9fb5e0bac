//! Comment dispatch policy.
//!
//! Decides, per review comment, whether it can be anchored inside the
//! merge request's rendered diff (inline discussion) or must fall back to
//! a plain note, and drives the posting pipeline for one comment at a
//! time. Planning is pure so the policy is testable without a network;
//! posting returns outcomes as data rather than propagating errors, so
//! one rejected comment never aborts the rest of the run.

use crate::diff::{LinePosition, locate};
use crate::gitlab::{Change, DiffRefs, DiscussionPosition, GitLabClient};
use crate::review::ReviewComment;


/// Marker embedded in every body mrsync posts.
///
/// The cleanup pass recognizes notes carrying it, so re-running sync
/// replaces earlier output instead of duplicating it. HTML comments are
/// invisible in rendered markdown.
pub const SYNC_MARKER: &str = "<!-- posted-by:mrsync -->";

/// Where a comment can be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The target line is displayed by the merge request diff.
    Positional(LinePosition),
    /// The file is not in the changed set, or the line falls outside
    /// every hunk.
    OutsideDiff,
}

/// Outcome of posting one comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    /// Posted as an inline diff discussion.
    Positional,
    /// Posted as a plain note. `degraded` is set when an inline post was
    /// attempted first and rejected server-side.
    Fallback { degraded: bool },
    /// Neither the discussion nor the fallback note could be posted.
    Failed(String),
}

/// Find the diff entry for a file.
///
/// The post-change path is preferred so renamed files are matched by the
/// name the reviewer saw; the old path is a fallback for comments written
/// against the pre-rename name.
pub fn find_change<'a>(changes: &'a [Change], path: &str) -> Option<&'a Change> {
    changes
        .iter()
        .find(|change| change.new_path == path)
        .or_else(|| changes.iter().find(|change| change.old_path == path))
}

/// Pure planning step: can this comment be anchored in the diff?
pub fn plan(comment: &ReviewComment, changes: &[Change]) -> Disposition {
    match find_change(changes, &comment.file) {
        Some(change) => match locate(&change.diff, comment.line) {
            Some(position) => Disposition::Positional(position),
            None => Disposition::OutsideDiff,
        },
        None => Disposition::OutsideDiff,
    }
}

/// Build the position payload anchoring a comment against the pinned
/// diff refs.
pub fn build_position(
    change: &Change,
    refs: &DiffRefs,
    position: LinePosition,
) -> DiscussionPosition {
    DiscussionPosition {
        base_sha: refs.base_sha.clone(),
        start_sha: refs.start_sha.clone(),
        head_sha: refs.head_sha.clone(),
        position_type: "text".to_string(),
        old_path: change.old_path.clone(),
        new_path: change.new_path.clone(),
        old_line: position.old_line,
        new_line: position.new_line,
    }
}

/// Render the body for an inline discussion.
///
/// Suggestions use GitLab's ```suggestion fence, which reviewers can
/// apply with one click inside a diff discussion.
pub fn render_positional_body(comment: &ReviewComment) -> String {
    let mut body = comment.description.trim_end().to_string();

    if let Some(suggestion) = &comment.suggestion {
        body.push_str("\n\n```suggestion\n");
        body.push_str(suggestion.trim_end());
        body.push_str("\n```");
    }

    body.push_str("\n\n");
    body.push_str(SYNC_MARKER);
    body
}

/// Render the fallback note body.
///
/// The deep link pins the file at the fetched head commit, so the link
/// stays valid even after the branch advances. Deleted files get no link
/// (there is no head blob to point at). The note states explicitly that
/// it refers to code outside the reviewed diff.
pub fn render_fallback_body(
    comment: &ReviewComment,
    project_web_url: &str,
    head_sha: &str,
    deleted: bool,
) -> String {
    let header = if deleted {
        format!(
            "**{}:{}** (file deleted in this merge request)",
            comment.file, comment.line
        )
    } else {
        format!(
            "**{}:{}** ([view at head]({}/-/blob/{}/{}#L{}))",
            comment.file,
            comment.line,
            project_web_url.trim_end_matches('/'),
            head_sha,
            comment.file,
            comment.line
        )
    };

    let mut body = format!(
        "{}\n\n\
         This comment refers to code outside the reviewed diff.\n\n{}",
        header,
        comment.description.trim_end()
    );

    if let Some(suggestion) = &comment.suggestion {
        body.push_str("\n\nSuggested replacement:\n\n```\n");
        body.push_str(suggestion.trim_end());
        body.push_str("\n```");
    }

    body.push_str("\n\n");
    body.push_str(SYNC_MARKER);
    body
}

/// Post one comment to the merge request.
///
/// An inline post rejected by the server (a position the local walk
/// accepted but the server cannot resolve) degrades to the fallback note.
/// `Failed` is returned only when the fallback note also fails.
pub fn post_comment(
    client: &GitLabClient,
    project_id: u64,
    project_web_url: &str,
    mr_iid: u64,
    refs: &DiffRefs,
    changes: &[Change],
    comment: &ReviewComment,
) -> PostOutcome {
    let change = find_change(changes, &comment.file);
    let deleted = change.map(|c| c.deleted_file).unwrap_or(false);

    if let Some(change) = change {
        if let Some(position) = locate(&change.diff, comment.line) {
            let payload = build_position(change, refs, position);
            let body = render_positional_body(comment);

            match client.create_discussion(project_id, mr_iid, &body, &payload) {
                Ok(()) => return PostOutcome::Positional,
                Err(_) => {
                    return post_fallback(
                        client,
                        project_id,
                        project_web_url,
                        mr_iid,
                        refs,
                        comment,
                        deleted,
                        true,
                    );
                }
            }
        }
    }

    post_fallback(
        client,
        project_id,
        project_web_url,
        mr_iid,
        refs,
        comment,
        deleted,
        false,
    )
}

/// Post the fallback note for a comment.
fn post_fallback(
    client: &GitLabClient,
    project_id: u64,
    project_web_url: &str,
    mr_iid: u64,
    refs: &DiffRefs,
    comment: &ReviewComment,
    deleted: bool,
    degraded: bool,
) -> PostOutcome {
    let body = render_fallback_body(comment, project_web_url, &refs.head_sha, deleted);

    match client.create_note(project_id, mr_iid, &body) {
        Ok(()) => PostOutcome::Fallback { degraded },
        Err(err) => PostOutcome::Failed(err.to_string()),
    }
}
