//! Tests for config loading and validation.

use super::Config;

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.gitlab_url, "https://gitlab.com");
    assert_eq!(config.project, None);
    assert_eq!(config.remote, "origin");
    assert_eq!(config.review_file, "review.json");
    assert_eq!(config.token_env, "GITLAB_TOKEN");
    assert_eq!(config.api_timeout_secs, 30);
    assert!(config.audit_log);
}

#[test]
fn parses_partial_yaml_with_defaults() {
    let yaml = r#"
gitlab_url: https://gitlab.example.com
project: acme/widgets
"#;

    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.gitlab_url, "https://gitlab.example.com");
    assert_eq!(config.project.as_deref(), Some("acme/widgets"));
    // Unspecified fields keep their defaults.
    assert_eq!(config.remote, "origin");
    assert_eq!(config.api_timeout_secs, 30);
}

#[test]
fn ignores_unknown_fields() {
    let yaml = r#"
gitlab_url: https://gitlab.example.com
future_option: enabled
another_future_thing:
  nested: true
"#;

    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.gitlab_url, "https://gitlab.example.com");
}

#[test]
fn empty_yaml_yields_defaults() {
    let config = Config::from_yaml("{}").unwrap();
    assert_eq!(config.gitlab_url, "https://gitlab.com");
}

#[test]
fn rejects_non_http_gitlab_url() {
    let yaml = "gitlab_url: gitlab.example.com";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("gitlab_url"));
}

#[test]
fn rejects_empty_project() {
    let yaml = "project: '  '";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("project"));
}

#[test]
fn rejects_empty_token_env() {
    let yaml = "token_env: ''";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("token_env"));
}

#[test]
fn rejects_zero_timeout() {
    let yaml = "api_timeout_secs: 0";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("api_timeout_secs"));
}

#[test]
fn rejects_malformed_yaml() {
    let err = Config::from_yaml(": not yaml :").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn load_or_default_returns_defaults_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mrsync.yaml");

    let config = Config::load_or_default(&path).unwrap();
    assert_eq!(config.gitlab_url, "https://gitlab.com");
}

#[test]
fn load_or_default_reads_present_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mrsync.yaml");
    std::fs::write(&path, "project: acme/widgets\n").unwrap();

    let config = Config::load_or_default(&path).unwrap();
    assert_eq!(config.project.as_deref(), Some("acme/widgets"));
}

#[test]
fn load_or_default_surfaces_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mrsync.yaml");
    std::fs::write(&path, "api_timeout_secs: [broken\n").unwrap();

    assert!(Config::load_or_default(&path).is_err());
}

#[test]
fn config_round_trips_through_yaml() {
    let mut config = Config::default();
    config.project = Some("acme/widgets".to_string());
    config.audit_log = false;

    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();

    assert_eq!(parsed.project.as_deref(), Some("acme/widgets"));
    assert!(!parsed.audit_log);
}
