//! Core line location logic.

use super::helpers::parse_hunk_header;

/// A line's position within the rendered diff.
///
/// `old_line` is absent for added lines, which have no counterpart in the
/// pre-change file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    /// 1-based line number in the old version of the file, if any.
    pub old_line: Option<u64>,
    /// 1-based line number in the new version of the file.
    pub new_line: u64,
}

/// Locate a new-file line number inside a unified diff.
///
/// `diff_text` is the unified diff body for a single file and may contain
/// any number of hunks. `target_new_line` is 1-based and refers to the
/// post-change version of the file.
///
/// Returns the old/new line pair needed to anchor an inline comment on
/// the matched line, or `None` when the line is not displayed by any hunk
/// (unchanged code between hunks, or out of range). A target of 0 is
/// never found.
///
/// Total over arbitrary input: a malformed hunk header skips that hunk,
/// and nothing here errors or panics. The per-hunk scan assumes line
/// numbers ascend within a well-formed hunk and stops early once the
/// new-line counter passes the target; remaining hunks are still scanned.
pub fn locate(diff_text: &str, target_new_line: u64) -> Option<LinePosition> {
    if target_new_line == 0 {
        return None;
    }

    let mut old_line: u64 = 0;
    let mut new_line: u64 = 0;
    // Counters are only meaningful after a hunk header has been parsed.
    let mut in_hunk = false;

    for line in diff_text.lines() {
        if line.starts_with("@@") {
            match parse_hunk_header(line) {
                Some((old_start, new_start)) => {
                    old_line = old_start;
                    new_line = new_start;
                    in_hunk = true;
                }
                // Malformed header: skip this hunk, keep scanning.
                None => in_hunk = false,
            }
            continue;
        }

        if !in_hunk {
            continue;
        }

        if new_line > target_new_line {
            // Line numbers ascend within a hunk, so the target cannot
            // appear later in this one. Wait for the next header.
            in_hunk = false;
            continue;
        }

        if line.starts_with('\\') {
            // "\ No newline at end of file" does not occupy a line.
            continue;
        }

        if line.starts_with('-') {
            // Removed lines have no new-file number; never a match.
            old_line += 1;
        } else if line.starts_with('+') {
            if new_line == target_new_line {
                return Some(LinePosition {
                    old_line: None,
                    new_line,
                });
            }
            new_line += 1;
        } else {
            // Context line: present in both versions.
            if new_line == target_new_line {
                return Some(LinePosition {
                    old_line: Some(old_line),
                    new_line,
                });
            }
            old_line += 1;
            new_line += 1;
        }
    }

    None
}
