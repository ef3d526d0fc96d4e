use crate::conf::types::{
    AdmissionSpec, BackendSpec, OperationPolicySpec, Origin, PatternRuleSpec, PolicySpec,
    WindowLimitSpec,
};
use crate::conf::validation::{
    Severity, ValidationReport, validate_admission, validate_backend, validate_policies,
};

fn hours(n: u64) -> WindowLimitSpec {
    WindowLimitSpec {
        hours: Some(n),
        ..Default::default()
    }
}

fn days(n: u64) -> WindowLimitSpec {
    WindowLimitSpec {
        days: Some(n),
        ..Default::default()
    }
}

fn policy(pattern_rules: Vec<PatternRuleSpec>, default_limit: WindowLimitSpec) -> OperationPolicySpec {
    OperationPolicySpec {
        origin: Origin::test("search_policy"),
        enable: true,
        pattern_rules,
        default_limit,
        default_message: None,
    }
}

fn like(limit: WindowLimitSpec) -> PatternRuleSpec {
    PatternRuleSpec {
        trigger: "like".to_string(),
        limit,
        message: None,
    }
}

fn messages(report: &ValidationReport) -> Vec<String> {
    report
        .errors
        .iter()
        .chain(report.warnings.iter())
        .map(|e| e.message.clone())
        .collect()
}

#[test]
fn validate_backend_valid() {
    // Arrange
    let mut report = ValidationReport::default();
    let backend = BackendSpec {
        origin: Origin::test("backend"),
        base_url: "https://logs.example.com/clickvisual/".to_string(),
        timeout_seconds: 30,
    };

    // Act
    validate_backend(&backend, &mut report);

    // Assert
    assert!(!report.has_violations());
}

#[test]
fn validate_backend_invalid_url_and_timeout() {
    let mut report = ValidationReport::default();
    let backend = BackendSpec {
        origin: Origin::test("backend"),
        base_url: "not a url".to_string(),
        timeout_seconds: 0,
    };

    validate_backend(&backend, &mut report);

    let msgs = messages(&report);
    assert_eq!(report.errors.len(), 2);
    assert!(msgs.iter().any(|m| m.contains("invalid backend url")));
    assert!(msgs.iter().any(|m| m.contains("timeout_seconds")));
}

#[test]
fn validate_backend_unsupported_scheme() {
    let mut report = ValidationReport::default();
    let backend = BackendSpec {
        origin: Origin::test("backend"),
        base_url: "ftp://logs.example.com".to_string(),
        timeout_seconds: 5,
    };

    validate_backend(&backend, &mut report);

    assert!(
        messages(&report)
            .iter()
            .any(|m| m.contains("unsupported backend url scheme: ftp"))
    );
}

#[test]
fn validate_admission_warns_about_legacy_token() {
    let mut report = ValidationReport::default();

    validate_admission(&AdmissionSpec::default(), &mut report);

    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].severity, Severity::Warning);
    assert!(report.warnings[0].message.contains("6=6 and"));
}

#[test]
fn validate_admission_empty_token_is_error() {
    let mut report = ValidationReport::default();
    let spec = AdmissionSpec {
        bypass_token: "   ".to_string(),
        ..Default::default()
    };

    validate_admission(&spec, &mut report);

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("bypass_token is empty"));
}

#[test]
fn validate_admission_disabled_token_is_clean() {
    let mut report = ValidationReport::default();
    let spec = AdmissionSpec {
        enable_bypass_token: false,
        bypass_token: String::new(),
        ..Default::default()
    };

    validate_admission(&spec, &mut report);

    assert!(!report.has_violations());
}

#[test]
fn validate_policies_valid() {
    let mut report = ValidationReport::default();
    let policies = vec![PolicySpec::Search(policy(vec![like(hours(4))], days(15)))];

    validate_policies(&policies, &mut report);

    assert!(!report.has_violations());
}

#[test]
fn validate_policies_duplicate_operation() {
    let mut report = ValidationReport::default();
    let policies = vec![
        PolicySpec::Search(policy(vec![], days(15))),
        PolicySpec::Search(policy(vec![], days(10))),
    ];

    validate_policies(&policies, &mut report);

    assert!(
        messages(&report)
            .iter()
            .any(|m| m.contains("duplicate search policy"))
    );
}

#[test]
fn validate_policies_limit_needs_exactly_one_unit() {
    let mut report = ValidationReport::default();
    let both = WindowLimitSpec {
        hours: Some(1),
        days: Some(1),
        ..Default::default()
    };
    let policies = vec![PolicySpec::Histogram(policy(
        vec![like(both)],
        WindowLimitSpec::default(),
    ))];

    validate_policies(&policies, &mut report);

    let msgs = messages(&report);
    assert_eq!(report.errors.len(), 2);
    assert!(msgs.iter().any(|m| m.starts_with("default_limit:")));
    assert!(msgs.iter().any(|m| m.starts_with("pattern_rules[0]:")));
}

#[test]
fn validate_policies_zero_limit_and_empty_trigger() {
    let mut report = ValidationReport::default();
    let empty = PatternRuleSpec {
        trigger: " ".to_string(),
        limit: hours(1),
        message: None,
    };
    let policies = vec![PolicySpec::Search(policy(vec![empty], days(0)))];

    validate_policies(&policies, &mut report);

    let msgs = messages(&report);
    assert!(msgs.iter().any(|m| m.contains("window limit must be positive")));
    assert!(msgs.iter().any(|m| m.contains("trigger must not be empty")));
}

#[test]
fn validate_policies_warns_on_wide_pattern_and_shadowing() {
    let mut report = ValidationReport::default();
    let ilike = PatternRuleSpec {
        trigger: "ILIKE".to_string(),
        limit: hours(1),
        message: None,
    };
    let policies = vec![PolicySpec::Search(policy(
        vec![like(days(30)), ilike],
        days(15),
    ))];

    validate_policies(&policies, &mut report);

    let msgs = messages(&report);
    assert!(report.errors.is_empty());
    assert!(msgs.iter().any(|m| m.contains("wider window than the default")));
    assert!(msgs.iter().any(|m| m.contains("'ILIKE' is shadowed")));
}

#[test]
fn validate_policies_disabled_still_checks_limits() {
    let mut report = ValidationReport::default();
    let mut spec = policy(vec![], WindowLimitSpec::default());
    spec.enable = false;

    validate_policies(&[PolicySpec::Search(spec)], &mut report);

    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("default_limit: window limit must set exactly one"));
}

#[test]
fn validate_policies_disabled_with_valid_limits_is_clean() {
    let mut report = ValidationReport::default();
    let mut spec = policy(vec![like(hours(4))], days(15));
    spec.enable = false;

    validate_policies(&[PolicySpec::Search(spec)], &mut report);

    assert!(!report.has_violations());
}
