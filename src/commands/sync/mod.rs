//! Implementation of the `mrsync sync` command.
//!
//! This module implements the full synchronization run:
//!
//! 1. Resolve the run context (repo, config, token, project, branch, MR)
//! 2. Load and validate the review file
//! 3. Fetch the MR changes once; every positional post reuses this snapshot
//! 4. Delete notes from previous sync runs (unless `--keep-existing`)
//! 5. Post comments sequentially, degrading rejected inline posts to notes
//! 6. Report the summary; exit 2 if any comment failed outright

use crate::cli::SyncArgs;
use crate::context::RunContext;
use crate::dispatch::{PostOutcome, SYNC_MARKER, post_comment};
use crate::error::{Result, SyncError};
use crate::events::{Event, EventAction};
use crate::review::load_review;
use serde_json::json;

mod helpers;

use helpers::log_event;

/// Execute the `mrsync sync` command.
///
/// # Exit Codes
///
/// - 0: All comments posted
/// - 1: User error (config, token, review file, no MR found)
/// - 2: Run completed but some comments failed to post
/// - 3: Git error (not a repo, detached HEAD, remote missing)
/// - 4: GitLab API error before posting started
pub fn cmd_sync(args: SyncArgs) -> Result<()> {
    let ctx = RunContext::resolve(
        args.branch.as_deref(),
        args.mr,
        args.project.as_deref(),
    )?;

    // ========================================================================
    // Phase 1: Load review input
    // ========================================================================

    let review_path = match &args.review_file {
        Some(path) => path.clone(),
        None => ctx.repo_root.join(&ctx.config.review_file),
    };

    let comments = load_review(&review_path)?;

    if comments.is_empty() {
        println!(
            "No review comments in '{}'; nothing to sync.",
            review_path.display()
        );
        return Ok(());
    }

    println!(
        "Syncing {} comment(s) into {} !{} ({})",
        comments.len(),
        ctx.project.path_with_namespace,
        ctx.mr.iid,
        ctx.mr.title
    );

    // ========================================================================
    // Phase 2: Pin the diff snapshot
    // ========================================================================

    // Fetched once; all positional anchors reference this triple even if
    // the remote branch advances mid-run.
    let changes = ctx
        .client
        .merge_request_changes(ctx.project.id, ctx.mr.iid)?;

    let audit = ctx.config.audit_log;
    log_event(
        &ctx.repo_root,
        audit,
        Event::new(EventAction::SyncStart).with_details(json!({
            "project": ctx.project.path_with_namespace,
            "mr": ctx.mr.iid,
            "branch": ctx.branch,
            "head_sha": changes.diff_refs.head_sha,
            "comments": comments.len(),
        })),
    );

    // ========================================================================
    // Phase 3: Replace notes from previous runs
    // ========================================================================

    if !args.keep_existing {
        let removed = cleanup_previous_notes(&ctx)?;
        if removed > 0 {
            println!("Removed {} note(s) from previous sync runs", removed);
            log_event(
                &ctx.repo_root,
                audit,
                Event::new(EventAction::Cleanup).with_details(json!({
                    "mr": ctx.mr.iid,
                    "removed": removed,
                })),
            );
        }
    }

    // ========================================================================
    // Phase 4: Post comments sequentially
    // ========================================================================

    let mut positional = 0usize;
    let mut fallback = 0usize;
    let mut failed = 0usize;

    for comment in &comments {
        let outcome = post_comment(
            &ctx.client,
            ctx.project.id,
            &ctx.project.web_url,
            ctx.mr.iid,
            &changes.diff_refs,
            &changes.changes,
            comment,
        );

        let (action, details) = match &outcome {
            PostOutcome::Positional => {
                positional += 1;
                println!("  {}:{} -> inline discussion", comment.file, comment.line);
                let details = json!({
                    "mr": ctx.mr.iid, "file": comment.file, "line": comment.line,
                });
                (EventAction::Positional, details)
            }
            PostOutcome::Fallback { degraded } => {
                fallback += 1;
                if *degraded {
                    println!(
                        "  {}:{} -> fallback note (inline position rejected by server)",
                        comment.file, comment.line
                    );
                } else {
                    println!(
                        "  {}:{} -> fallback note (line outside the reviewed diff)",
                        comment.file, comment.line
                    );
                }
                let details = json!({
                    "mr": ctx.mr.iid, "file": comment.file, "line": comment.line,
                    "degraded": degraded,
                });
                (EventAction::Fallback, details)
            }
            PostOutcome::Failed(reason) => {
                failed += 1;
                println!("  {}:{} -> FAILED: {}", comment.file, comment.line, reason);
                let details = json!({
                    "mr": ctx.mr.iid, "file": comment.file, "line": comment.line,
                    "reason": reason,
                });
                (EventAction::Failed, details)
            }
        };

        log_event(&ctx.repo_root, audit, Event::new(action).with_details(details));
    }

    // ========================================================================
    // Phase 5: Summary
    // ========================================================================

    println!();
    println!(
        "Done: {} inline, {} fallback, {} failed ({} total)",
        positional,
        fallback,
        failed,
        comments.len()
    );
    println!("Merge request: {}", ctx.mr.web_url);

    log_event(
        &ctx.repo_root,
        audit,
        Event::new(EventAction::SyncComplete).with_details(json!({
            "mr": ctx.mr.iid,
            "positional": positional,
            "fallback": fallback,
            "failed": failed,
        })),
    );

    if failed > 0 {
        return Err(SyncError::SyncIncomplete(format!(
            "{} of {} comments failed to post",
            failed,
            comments.len()
        )));
    }

    Ok(())
}

/// Delete notes left behind by previous sync runs.
///
/// Notes are recognized by the embedded marker; system notes and human
/// comments are never touched. A failed deletion is reported but does not
/// abort the run.
fn cleanup_previous_notes(ctx: &RunContext) -> Result<usize> {
    let notes = ctx.client.list_notes(ctx.project.id, ctx.mr.iid)?;

    let mut removed = 0usize;
    for note in notes {
        if note.system || !note.body.contains(SYNC_MARKER) {
            continue;
        }

        match ctx.client.delete_note(ctx.project.id, ctx.mr.iid, note.id) {
            Ok(()) => removed += 1,
            Err(err) => {
                eprintln!("warning: failed to delete note {}: {}", note.id, err);
            }
        }
    }

    Ok(removed)
}
