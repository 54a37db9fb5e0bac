//! Tests for diff line location.

use super::{LinePosition, locate};

/// One hunk covering new lines 1-4: context, added, context, removal, context.
const SAMPLE_HUNK: &str = "\
@@ -1,3 +1,4 @@
 ctxA
+added1
 ctxB
-removed1
 ctxC
";

#[test]
fn context_line_returns_both_counters() {
    assert_eq!(
        locate(SAMPLE_HUNK, 1),
        Some(LinePosition {
            old_line: Some(1),
            new_line: 1
        })
    );
}

#[test]
fn added_line_has_no_old_counterpart() {
    assert_eq!(
        locate(SAMPLE_HUNK, 2),
        Some(LinePosition {
            old_line: None,
            new_line: 2
        })
    );
}

#[test]
fn context_after_addition_lags_on_old_side() {
    assert_eq!(
        locate(SAMPLE_HUNK, 3),
        Some(LinePosition {
            old_line: Some(2),
            new_line: 3
        })
    );
}

#[test]
fn removal_advances_only_the_old_counter() {
    // removed1 pushed old_line to 4 without touching new_line.
    assert_eq!(
        locate(SAMPLE_HUNK, 4),
        Some(LinePosition {
            old_line: Some(4),
            new_line: 4
        })
    );
}

#[test]
fn target_beyond_all_hunks_is_not_found() {
    assert_eq!(locate(SAMPLE_HUNK, 99), None);
}

#[test]
fn empty_diff_is_not_found() {
    assert_eq!(locate("", 1), None);
    assert_eq!(locate("", 42), None);
}

#[test]
fn target_zero_is_never_found() {
    assert_eq!(locate(SAMPLE_HUNK, 0), None);
}

#[test]
fn target_in_gap_between_hunks_is_not_found() {
    let diff = "\
@@ -1,2 +1,2 @@
 one
+two
@@ -10,2 +11,2 @@
 ten
+eleven
";
    // New lines 3..=10 fall between the two hunks.
    assert_eq!(locate(diff, 5), None);
}

#[test]
fn target_in_second_hunk_is_found() {
    let diff = "\
@@ -1,2 +1,2 @@
 one
+two
@@ -10,2 +11,2 @@
 ten
+eleven
";
    // The first hunk's early exit must not prevent scanning the second.
    assert_eq!(
        locate(diff, 12),
        Some(LinePosition {
            old_line: None,
            new_line: 12
        })
    );
}

#[test]
fn malformed_header_skips_only_that_hunk() {
    let diff = "\
@@ -broken header @@
 junk that must not be counted
+more junk
@@ -5,2 +5,2 @@
 five
+six
";
    assert_eq!(
        locate(diff, 6),
        Some(LinePosition {
            old_line: None,
            new_line: 6
        })
    );
    // Lines under the malformed header are invisible to the walk.
    assert_eq!(locate(diff, 1), None);
}

#[test]
fn content_before_any_header_is_ignored() {
    let diff = "\
+stray added
 stray context
@@ -1,1 +1,2 @@
 kept
+new
";
    assert_eq!(
        locate(diff, 2),
        Some(LinePosition {
            old_line: None,
            new_line: 2
        })
    );
}

#[test]
fn no_newline_marker_does_not_occupy_a_line() {
    let diff = "\
@@ -1,2 +1,2 @@
 first
\\ No newline at end of file
+second
";
    assert_eq!(
        locate(diff, 2),
        Some(LinePosition {
            old_line: None,
            new_line: 2
        })
    );
}

#[test]
fn header_without_counts_is_accepted() {
    let diff = "\
@@ -3 +7 @@
 anchored
";
    assert_eq!(
        locate(diff, 7),
        Some(LinePosition {
            old_line: Some(3),
            new_line: 7
        })
    );
}

#[test]
fn locate_is_idempotent() {
    let first = locate(SAMPLE_HUNK, 3);
    let second = locate(SAMPLE_HUNK, 3);
    assert_eq!(first, second);
}

#[test]
fn found_new_line_always_equals_target() {
    let diff = "\
@@ -1,6 +1,7 @@
 a
+b
 c
-d
 e
+f
 g
@@ -20,3 +21,4 @@
 h
+i
 j
";
    for target in 1..=30u64 {
        if let Some(position) = locate(diff, target) {
            assert_eq!(position.new_line, target, "target {}", target);
        }
    }
}
