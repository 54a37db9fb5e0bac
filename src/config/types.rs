//! Configuration defaults for mrsync.

// Default value functions for serde
pub(crate) fn default_gitlab_url() -> String {
    "https://gitlab.com".to_string()
}
pub(crate) fn default_remote() -> String {
    "origin".to_string()
}
pub(crate) fn default_review_file() -> String {
    "review.json".to_string()
}
pub(crate) fn default_token_env() -> String {
    "GITLAB_TOKEN".to_string()
}
pub(crate) fn default_api_timeout_secs() -> u64 {
    30
}
pub(crate) fn default_true() -> bool {
    true
}
