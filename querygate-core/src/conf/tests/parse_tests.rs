use super::{ENTRYPOINT, SEARCH_POLICY, write};
use crate::admission::{Locale, Operation};
use crate::conf::parse::{parse_entrypoint, parse_policies};
use crate::conf::types::PolicySpec;
use crate::conf::ConfigError;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn parse_entrypoint_file() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);

    // Act
    let entry = parse_entrypoint(&dir.path().join("querygate.hcl")).unwrap();

    // Assert
    assert_eq!(entry.version, 1);
    assert_eq!(entry.backend.base_url, "http://127.0.0.1:19001/clickvisual");
    assert_eq!(entry.backend.timeout_seconds, 10);
    assert_eq!(entry.admission.grace_seconds, 300);
    assert_eq!(entry.admission.locale, Locale::En);
    assert_eq!(entry.admission.bypass_token, "6=6 and");
    assert!(entry.admission.enable_bypass_token);
    assert_eq!(entry.include.policies.as_deref(), Some("policies/*.hcl"));
    assert_eq!(entry.backend.origin.section, "backend");
}

#[test]
fn parse_entrypoint_defaults() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "querygate.hcl",
        r#"
version = 1
backend = {
  base_url = "http://localhost:9001"
}
"#,
    );

    let entry = parse_entrypoint(&dir.path().join("querygate.hcl")).unwrap();

    assert_eq!(entry.backend.timeout_seconds, 30);
    assert_eq!(entry.admission.grace_seconds, 300);
    assert!(entry.include.policies.is_none());
}

#[test]
fn parse_entrypoint_zh_cn_locale() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "querygate.hcl",
        r#"
version = 1
backend = {
  base_url = "http://localhost:9001"
}
admission = {
  locale              = "zh-cn"
  enable_bypass_token = false
}
"#,
    );

    let entry = parse_entrypoint(&dir.path().join("querygate.hcl")).unwrap();

    assert_eq!(entry.admission.locale, Locale::ZhCn);
    assert!(!entry.admission.enable_bypass_token);
}

#[test]
fn parse_entrypoint_rejects_unknown_fields() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "querygate.hcl",
        r#"
version = 1
backend = {
  base_url = "http://localhost:9001"
  retries  = 3
}
"#,
    );

    let err = parse_entrypoint(&dir.path().join("querygate.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn parse_missing_entrypoint_is_read_error() {
    let dir = tempdir().unwrap();

    let err = parse_entrypoint(&dir.path().join("querygate.hcl")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn parse_search_policy_file() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), "policies/search.hcl", SEARCH_POLICY);
    let path = dir.path().join("policies/search.hcl");

    // Act
    let policies = parse_policies(&path).unwrap();

    // Assert
    assert_eq!(policies.len(), 1);
    assert!(matches!(policies[0], PolicySpec::Search(_)));
    let body = policies[0].body();
    assert!(body.enable);
    assert_eq!(body.pattern_rules.len(), 1);
    assert_eq!(body.pattern_rules[0].trigger, "like");
    assert_eq!(body.pattern_rules[0].limit.hours, Some(2));
    assert_eq!(body.default_limit.days, Some(7));
    assert_eq!(policies[0].origin().section, "search_policy");
}

#[test]
fn parse_file_with_both_policies() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "policies/all.hcl",
        r#"
search_policy = {
  default_limit = { days = 3 }
}

histogram_policy = {
  enable = false
  pattern_rules = [
    { trigger = "like", limit = { hours = 8 }, message = "too wide" },
  ]
  default_limit   = { days = 15 }
  default_message = "way too wide"
}
"#,
    );

    let policies = parse_policies(&dir.path().join("policies/all.hcl")).unwrap();

    let ops: Vec<Operation> = policies.iter().map(|p| p.operation()).collect();
    assert_eq!(ops, vec![Operation::Search, Operation::Histogram]);
    assert!(policies[0].body().pattern_rules.is_empty());
    assert!(!policies[1].body().enable);
    assert_eq!(
        policies[1].body().pattern_rules[0].message.as_deref(),
        Some("too wide")
    );
    assert_eq!(
        policies[1].body().default_message.as_deref(),
        Some("way too wide")
    );
}
