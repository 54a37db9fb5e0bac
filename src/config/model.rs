//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for mrsync.
///
/// This struct represents the contents of `.mrsync.yaml` at the
/// repository root. Unknown fields in the YAML are ignored for forward
/// compatibility.
///
/// The access token is deliberately not a config field: it is read from
/// the environment variable named by `token_env`, so it never ends up
/// committed with the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the GitLab instance.
    #[serde(default = "default_gitlab_url")]
    pub gitlab_url: String,

    /// Project path (`group/name`) or numeric id. When unset, the
    /// project is derived from the remote URL.
    #[serde(default)]
    pub project: Option<String>,

    /// Git remote used for project detection (default: "origin").
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Default review file path, relative to the repository root.
    #[serde(default = "default_review_file")]
    pub review_file: String,

    /// Name of the environment variable holding the access token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout for API calls, in seconds.
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    /// Whether to append sync events to `.mrsync/events.ndjson`.
    #[serde(default = "default_true")]
    pub audit_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gitlab_url: default_gitlab_url(),
            project: None,
            remote: default_remote(),
            review_file: default_review_file(),
            token_env: default_token_env(),
            api_timeout_secs: default_api_timeout_secs(),
            audit_log: true,
        }
    }
}
