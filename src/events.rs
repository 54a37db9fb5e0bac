//! Sync run audit log.
//!
//! This module implements append-only event logging so sync runs can be
//! audited after the fact: what was posted where, what degraded, what
//! failed. Events are stored in NDJSON format (one JSON object per line)
//! in `.mrsync/events.ndjson` under the repository root.
//!
//! The log is write-only from mrsync's point of view; it is never read
//! back, and audit failures must not interrupt a posting run (callers
//! warn and continue).
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (sync_start, positional, fallback, ...)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `details`: Freeform object with action-specific details

use crate::error::{Result, SyncError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory under the repository root holding mrsync state.
pub const STATE_DIR: &str = ".mrsync";

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A sync run started.
    SyncStart,
    /// A comment was posted as an inline discussion.
    Positional,
    /// A comment was posted as a fallback note.
    Fallback,
    /// A comment could not be posted at all.
    Failed,
    /// Notes from previous runs were removed.
    Cleanup,
    /// A sync run finished.
    SyncComplete,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::SyncStart => write!(f, "sync_start"),
            EventAction::Positional => write!(f, "positional"),
            EventAction::Fallback => write!(f, "fallback"),
            EventAction::Failed => write!(f, "failed"),
            EventAction::Cleanup => write!(f, "cleanup"),
            EventAction::SyncComplete => write!(f, "sync_complete"),
        }
    }
}

/// An event record for the audit log.
///
/// Events are serialized as single-line JSON objects and appended to
/// the events.ndjson file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    ///
    /// This is used for NDJSON format where each line is a complete JSON object.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SyncError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Get the path to the events file.
pub fn events_file_path(repo_root: &Path) -> PathBuf {
    repo_root.join(STATE_DIR).join("events.ndjson")
}

/// Append an event to the events log.
///
/// The event becomes one JSON line with a trailing newline; the state
/// directory and file are created on first use.
///
/// # Returns
///
/// * `Ok(())` - Event was successfully appended
/// * `Err(SyncError::UserError)` - Serialization or write failed
pub fn append_event(repo_root: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;
    let events_file = events_file_path(repo_root);

    let state_dir = repo_root.join(STATE_DIR);
    fs::create_dir_all(&state_dir).map_err(|e| {
        SyncError::UserError(format!(
            "failed to create state directory '{}': {}",
            state_dir.display(),
            e
        ))
    })?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            SyncError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        SyncError::UserError(format!(
            "failed to append event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn append_creates_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();

        let first = Event::new(EventAction::SyncStart).with_details(json!({"mr": 7}));
        let second = Event::new(EventAction::Positional)
            .with_details(json!({"file": "src/app.vue", "line": 12}));

        append_event(dir.path(), &first).unwrap();
        append_event(dir.path(), &second).unwrap();

        let content = std::fs::read_to_string(events_file_path(dir.path())).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: Event = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.action, EventAction::SyncStart);
        assert_eq!(parsed.details["mr"], 7);

        let parsed: Event = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.action, EventAction::Positional);
        assert_eq!(parsed.details["file"], "src/app.vue");
    }

    #[test]
    fn actions_serialize_as_snake_case() {
        let event = Event::new(EventAction::SyncComplete);
        let line = event.to_ndjson_line().unwrap();
        assert!(line.contains("\"sync_complete\""));
    }

    #[test]
    fn actor_has_user_at_host_shape() {
        let event = Event::new(EventAction::SyncStart);
        assert!(event.actor.contains('@'));
    }
}
