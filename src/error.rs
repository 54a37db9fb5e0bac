//! Error types for the mrsync CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for mrsync operations.
///
/// Each variant maps to a specific exit code so scripts wrapping mrsync
/// can tell configuration mistakes apart from network failures.
#[derive(Error, Debug)]
pub enum SyncError {
    /// User provided invalid arguments, config, or review input.
    #[error("{0}")]
    UserError(String),

    /// The run completed but one or more comments could not be posted.
    #[error("sync incomplete: {0}")]
    SyncIncomplete(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// GitLab API request failed.
    #[error("GitLab API request failed: {0}")]
    ApiError(String),
}

impl SyncError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncError::UserError(_) => exit_codes::USER_ERROR,
            SyncError::SyncIncomplete(_) => exit_codes::PARTIAL_FAILURE,
            SyncError::GitError(_) => exit_codes::GIT_FAILURE,
            SyncError::ApiError(_) => exit_codes::API_FAILURE,
        }
    }
}

/// Result type alias for mrsync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = SyncError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn sync_incomplete_has_correct_exit_code() {
        let err = SyncError::SyncIncomplete("2 of 5 comments failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::PARTIAL_FAILURE);
    }

    #[test]
    fn git_error_has_correct_exit_code() {
        let err = SyncError::GitError("branch detection failed".to_string());
        assert_eq!(err.exit_code(), exit_codes::GIT_FAILURE);
    }

    #[test]
    fn api_error_has_correct_exit_code() {
        let err = SyncError::ApiError("503 Service Unavailable".to_string());
        assert_eq!(err.exit_code(), exit_codes::API_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = SyncError::UserError("review file not found".to_string());
        assert_eq!(err.to_string(), "review file not found");

        let err = SyncError::SyncIncomplete("1 of 3 comments failed".to_string());
        assert_eq!(err.to_string(), "sync incomplete: 1 of 3 comments failed");
    }
}
