//! Exit code constants for the mrsync CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config, or review input)
//! - 2: Partial failure (run completed, some comments failed to post)
//! - 3: Git operation failure
//! - 4: GitLab API failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or unreadable review input.
pub const USER_ERROR: i32 = 1;

/// Partial failure: the run completed but some comments were not posted.
pub const PARTIAL_FAILURE: i32 = 2;

/// Git operation failure: branch detection, remote lookup, etc.
pub const GIT_FAILURE: i32 = 3;

/// GitLab API failure: unreachable host, auth rejection, server errors.
pub const API_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, PARTIAL_FAILURE, GIT_FAILURE, API_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(PARTIAL_FAILURE, 2);
        assert_eq!(GIT_FAILURE, 3);
        assert_eq!(API_FAILURE, 4);
    }
}
