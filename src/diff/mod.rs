//! Unified diff line location.
//!
//! GitLab renders merge request diffs from per-file unified diff bodies.
//! To anchor an inline discussion the API needs the old/new line number
//! pair of the target line as displayed in the diff. This module maps a
//! line number in the post-change file to that pair, or reports that the
//! line is not part of the visible diff at all.

mod helpers;
mod locator;

#[cfg(test)]
mod tests;

// Re-export public API
pub use locator::{LinePosition, locate};
