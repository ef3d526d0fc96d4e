use super::{ENTRYPOINT, SEARCH_POLICY, write};
use crate::admission::{AdmissionGuard, Operation, QueryDescriptor, RejectionKind, WindowLimit};
use crate::conf::{ConfigError, load_config, load_spec_config};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn load_config_lowers_policies_over_production_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);
    write(dir.path(), "policies/search.hcl", SEARCH_POLICY);

    // Act
    let validated = load_config(dir.path()).unwrap();
    let cfg = validated.config;

    // Assert
    assert_eq!(
        cfg.backend.base_url.as_str(),
        "http://127.0.0.1:19001/clickvisual/"
    );
    assert_eq!(cfg.backend.timeout_seconds, 10);

    let search = cfg.policy.row(Operation::Search);
    assert_eq!(search.patterns[0].width.limit, WindowLimit::Hours(2));
    assert_eq!(search.patterns[0].width.max_width_seconds, 2 * 3600 + 300);
    assert_eq!(search.default_rule.limit, WindowLimit::Days(7));
    assert!(search.patterns[0].width.rejection_message.contains("2 hours"));

    // Histogram was not configured and keeps production thresholds.
    let histogram = cfg.policy.row(Operation::Histogram);
    assert_eq!(histogram.patterns[0].width.limit, WindowLimit::Hours(8));
    assert_eq!(histogram.default_rule.limit, WindowLimit::Days(15));

    // The legacy token stays enabled and is reported.
    assert_eq!(cfg.policy.bypass_token(), Some("6=6 and"));
    assert_eq!(validated.validation.warnings.len(), 1);
}

#[test]
fn load_config_message_overrides() {
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);
    write(
        dir.path(),
        "policies/histogram.hcl",
        r#"
histogram_policy = {
  pattern_rules = [
    { trigger = "LIKE", limit = { hours = 8 }, message = "narrow the window for like queries" },
  ]
  default_limit   = { days = 15 }
  default_message = "narrow the window"
}
"#,
    );

    let cfg = load_config(dir.path()).unwrap().config;

    let histogram = cfg.policy.row(Operation::Histogram);
    assert_eq!(histogram.patterns[0].trigger, "like");
    assert_eq!(
        histogram.patterns[0].width.rejection_message,
        "narrow the window for like queries"
    );
    assert_eq!(histogram.default_rule.rejection_message, "narrow the window");
}

#[test]
fn load_config_fails_on_validation_errors() {
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);
    write(dir.path(), "policies/a.hcl", SEARCH_POLICY);
    write(dir.path(), "policies/b.hcl", SEARCH_POLICY);

    let err = load_config(dir.path()).unwrap_err();

    match err {
        ConfigError::Validation { report } => {
            assert_eq!(report.errors.len(), 1);
            assert!(report.errors[0].message.contains("duplicate search policy"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_config_rejects_unknown_version() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "querygate.hcl",
        &ENTRYPOINT.replace("version = 1", "version = 2"),
    );

    let err = load_config(dir.path()).unwrap_err();

    assert!(matches!(err, ConfigError::Validation { .. }));
}

#[test]
fn load_config_disabled_bypass_token() {
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
  enable_bypass_token = false
}
"#,
    );

    let validated = load_config(dir.path()).unwrap();

    assert_eq!(validated.config.policy.bypass_token(), None);
    assert!(!validated.validation.has_violations());
}

#[test]
fn load_spec_config_reports_empty_include() {
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);

    let spec = load_spec_config(dir.path()).unwrap();
    let report = crate::conf::validation::validate_spec(&spec);

    assert!(spec.policy_files.is_empty());
    assert!(
        report
            .warnings
            .iter()
            .any(|w| w.message.contains("matches no files"))
    );
}

#[test]
fn load_config_trims_pattern_triggers() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);
    write(
        dir.path(),
        "policies/search.hcl",
        r#"
search_policy = {
  pattern_rules = [
    { trigger = " like ", limit = { hours = 4 } },
  ]
  default_limit = { days = 15 }
}
"#,
    );

    // Act
    let validated = load_config(dir.path()).unwrap();
    let guard = AdmissionGuard::new(Arc::new(validated.config.policy));
    let descriptor = QueryDescriptor::new(Operation::Search, 1_000, 1_000 + 5 * 3600, Some("msg like'%x%'"));

    // Assert
    assert!(validated.validation.errors.is_empty());
    let rejection = guard.evaluate(&descriptor).rejection().cloned().unwrap();
    assert_eq!(
        rejection.kind,
        RejectionKind::Pattern {
            trigger: "like".to_string()
        }
    );
    assert!(rejection.message.contains("`like`"));
}

#[test]
fn load_config_trims_bypass_token() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "querygate.hcl",
        &ENTRYPOINT.replace(
            r#"locale        = "en""#,
            r#"locale        = "en"
  bypass_token  = "  7=7 AND ""#,
        ),
    );

    let validated = load_config(dir.path()).unwrap();

    assert_eq!(validated.config.policy.bypass_token(), Some("7=7 and"));
}

#[test]
fn load_config_reports_bad_limits_on_disabled_policy() {
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);
    write(
        dir.path(),
        "policies/search.hcl",
        r#"
search_policy = {
  enable        = false
  default_limit = {}
}
"#,
    );

    let err = load_config(dir.path()).unwrap_err();

    match err {
        ConfigError::Validation { report } => {
            assert_eq!(report.errors.len(), 1);
            assert!(report.errors[0].message.contains("default_limit"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_config_keeps_disabled_policy_with_valid_limits() {
    let dir = tempdir().unwrap();
    write(dir.path(), "querygate.hcl", ENTRYPOINT);
    write(
        dir.path(),
        "policies/search.hcl",
        &SEARCH_POLICY.replace("enable = true", "enable = false"),
    );

    let validated = load_config(dir.path()).unwrap();

    assert!(!validated.config.policy.row(Operation::Search).enabled);
}
