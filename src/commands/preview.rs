//! Implementation of the `mrsync preview` command.
//!
//! Read-only dry run: fetches the merge request and its diff snapshot,
//! prints the dispatch decision for every comment in the review file, and
//! posts nothing.

use crate::cli::PreviewArgs;
use crate::context::RunContext;
use crate::dispatch::{Disposition, plan};
use crate::error::Result;
use crate::review::load_review;

/// Execute the `mrsync preview` command.
pub fn cmd_preview(args: PreviewArgs) -> Result<()> {
    let ctx = RunContext::resolve(
        args.branch.as_deref(),
        args.mr,
        args.project.as_deref(),
    )?;

    let review_path = match &args.review_file {
        Some(path) => path.clone(),
        None => ctx.repo_root.join(&ctx.config.review_file),
    };

    let comments = load_review(&review_path)?;

    if comments.is_empty() {
        println!(
            "No review comments in '{}'; nothing to preview.",
            review_path.display()
        );
        return Ok(());
    }

    let changes = ctx
        .client
        .merge_request_changes(ctx.project.id, ctx.mr.iid)?;

    println!(
        "Preview for {} !{} ({}), head {}",
        ctx.project.path_with_namespace,
        ctx.mr.iid,
        ctx.mr.title,
        &changes.diff_refs.head_sha[..changes.diff_refs.head_sha.len().min(12)]
    );
    println!();

    let mut positional = 0usize;
    let mut fallback = 0usize;

    for comment in &comments {
        match plan(comment, &changes.changes) {
            Disposition::Positional(position) => {
                positional += 1;
                match position.old_line {
                    Some(old_line) => println!(
                        "  {}:{} -> inline (old line {}, new line {})",
                        comment.file, comment.line, old_line, position.new_line
                    ),
                    None => println!(
                        "  {}:{} -> inline (added line)",
                        comment.file, comment.line
                    ),
                }
            }
            Disposition::OutsideDiff => {
                fallback += 1;
                println!(
                    "  {}:{} -> fallback note (line outside the reviewed diff)",
                    comment.file, comment.line
                );
            }
        }
    }

    println!();
    println!(
        "Would post {} inline, {} fallback ({} total). Nothing was posted.",
        positional,
        fallback,
        comments.len()
    );

    Ok(())
}
