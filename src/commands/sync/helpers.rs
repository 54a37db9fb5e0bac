//! Helper functions for the sync command.

use crate::events::{Event, append_event};
use std::path::Path;

/// Append an audit event, warning on failure.
///
/// The audit log never blocks a posting run: comments already posted
/// cannot be unposted, so a logging error is reported and ignored.
pub(super) fn log_event(repo_root: &Path, enabled: bool, event: Event) {
    if !enabled {
        return;
    }

    if let Err(err) = append_event(repo_root, &event) {
        eprintln!("warning: audit log write failed: {}", err);
    }
}
