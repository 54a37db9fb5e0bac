//! Tests for GitLab wire models and URL handling.

use super::client::encode_project_id;
use super::types::{DiscussionPosition, MergeRequest, MergeRequestChanges, Note, Project};

#[test]
fn encodes_project_paths() {
    assert_eq!(encode_project_id("acme/widgets"), "acme%2Fwidgets");
    assert_eq!(
        encode_project_id("acme/platform/widgets"),
        "acme%2Fplatform%2Fwidgets"
    );
}

#[test]
fn numeric_project_ids_pass_through() {
    assert_eq!(encode_project_id("278964"), "278964");
}

#[test]
fn deserializes_project() {
    let json = r#"{
        "id": 278964,
        "description": "ignored",
        "path_with_namespace": "acme/widgets",
        "web_url": "https://gitlab.com/acme/widgets",
        "star_count": 5
    }"#;

    let project: Project = serde_json::from_str(json).unwrap();

    assert_eq!(project.id, 278964);
    assert_eq!(project.path_with_namespace, "acme/widgets");
    assert_eq!(project.web_url, "https://gitlab.com/acme/widgets");
}

#[test]
fn deserializes_merge_request_list() {
    let json = r#"[{
        "id": 999,
        "iid": 7,
        "title": "Add login form",
        "source_branch": "feature/login",
        "target_branch": "main",
        "state": "opened",
        "web_url": "https://gitlab.com/acme/widgets/-/merge_requests/7"
    }]"#;

    let mrs: Vec<MergeRequest> = serde_json::from_str(json).unwrap();

    assert_eq!(mrs.len(), 1);
    assert_eq!(mrs[0].iid, 7);
    assert_eq!(mrs[0].source_branch, "feature/login");
}

#[test]
fn deserializes_changes_with_diff_refs() {
    let json = r#"{
        "changes": [
            {
                "old_path": "src/app.vue",
                "new_path": "src/app.vue",
                "a_mode": "100644",
                "b_mode": "100644",
                "diff": "@@ -1,2 +1,3 @@\n ctx\n+added\n ctx2\n",
                "new_file": false,
                "renamed_file": false,
                "deleted_file": false
            },
            {
                "old_path": "src/removed.ts",
                "new_path": "src/removed.ts",
                "diff": "@@ -1,2 +0,0 @@\n-gone\n-gone too\n",
                "renamed_file": false,
                "deleted_file": true
            }
        ],
        "diff_refs": {
            "base_sha": "aaa111",
            "head_sha": "bbb222",
            "start_sha": "ccc333"
        }
    }"#;

    let changes: MergeRequestChanges = serde_json::from_str(json).unwrap();

    assert_eq!(changes.changes.len(), 2);
    assert!(changes.changes[0].diff.starts_with("@@ -1,2 +1,3 @@"));
    // deleted_file defaults to false when the payload omits it.
    assert!(!changes.changes[0].deleted_file);
    assert!(changes.changes[1].deleted_file);
    assert_eq!(changes.diff_refs.head_sha, "bbb222");
}

#[test]
fn deserializes_notes() {
    let json = r#"[
        {"id": 1, "body": "a human comment", "system": false},
        {"id": 2, "body": "changed the description", "system": true},
        {"id": 3, "body": "no system flag"}
    ]"#;

    let notes: Vec<Note> = serde_json::from_str(json).unwrap();

    assert_eq!(notes.len(), 3);
    assert!(notes[1].system);
    assert!(!notes[2].system);
}

#[test]
fn position_omits_absent_old_line() {
    let position = DiscussionPosition {
        base_sha: "aaa".to_string(),
        start_sha: "ccc".to_string(),
        head_sha: "bbb".to_string(),
        position_type: "text".to_string(),
        old_path: "src/app.vue".to_string(),
        new_path: "src/app.vue".to_string(),
        old_line: None,
        new_line: 14,
    };

    let value = serde_json::to_value(&position).unwrap();

    assert_eq!(value["position_type"], "text");
    assert_eq!(value["new_line"], 14);
    assert!(value.get("old_line").is_none());
}

#[test]
fn position_serializes_present_old_line() {
    let position = DiscussionPosition {
        base_sha: "aaa".to_string(),
        start_sha: "ccc".to_string(),
        head_sha: "bbb".to_string(),
        position_type: "text".to_string(),
        old_path: "src/app.vue".to_string(),
        new_path: "src/app.vue".to_string(),
        old_line: Some(12),
        new_line: 14,
    };

    let value = serde_json::to_value(&position).unwrap();

    assert_eq!(value["old_line"], 12);
    assert_eq!(value["new_line"], 14);
}
