use crate::admission::Operation;
use crate::conf::types::{
    AdmissionSpec, BackendSpec, ConfigSpec, EntrypointSpec, PolicySpec, WindowLimitSpec,
};
use crate::conf::validation::ValidationReport;
use std::collections::HashSet;
use url::Url;

/// Validate everything that exists in a fully parsed config.
pub fn validate_spec(spec: &ConfigSpec) -> ValidationReport {
    let mut report = ValidationReport::default();
    if validate_version(&spec.entrypoint, &mut report) {
        validate_backend(&spec.entrypoint.backend, &mut report);
        validate_admission(&spec.entrypoint.admission, &mut report);
        validate_includes(spec, &mut report);
        validate_policies(&spec.policies, &mut report);
    }
    report
}

/// Fail-fast: invalid versions invalidate the entire config model.
pub fn validate_version(entrypoint: &EntrypointSpec, report: &mut ValidationReport) -> bool {
    if entrypoint.version != 1 {
        report.invalid_config_version(&entrypoint.version, &entrypoint.origin);
        return false;
    }
    true
}

pub fn validate_backend(cfg: &BackendSpec, report: &mut ValidationReport) {
    match Url::parse(cfg.base_url.trim()) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                report.unsupported_backend_scheme(url.scheme(), &cfg.origin);
            }
        }
        Err(e) => report.invalid_backend_url(&cfg.base_url, &e.to_string(), &cfg.origin),
    }

    if cfg.timeout_seconds == 0 {
        report.backend_timeout_is_zero(&cfg.origin);
    }
}

pub fn validate_admission(cfg: &AdmissionSpec, report: &mut ValidationReport) {
    if cfg.enable_bypass_token {
        if cfg.bypass_token.trim().is_empty() {
            report.bypass_token_is_empty(&cfg.origin);
        } else {
            report.legacy_bypass_token_enabled_warning(&cfg.bypass_token, &cfg.origin);
        }
    }

    if cfg.grace_seconds > 3600 {
        report.grace_exceeds_an_hour_warning(cfg.grace_seconds, &cfg.origin);
    }
}

fn validate_includes(spec: &ConfigSpec, report: &mut ValidationReport) {
    if let Some(pattern) = &spec.entrypoint.include.policies
        && spec.policy_files.is_empty()
    {
        report.policies_include_matches_nothing(pattern, &spec.entrypoint.origin);
    }
}

pub fn validate_policies(policies: &[PolicySpec], report: &mut ValidationReport) {
    let mut seen: HashSet<Operation> = HashSet::new();

    for policy in policies {
        let origin = policy.origin();
        if !seen.insert(policy.operation()) {
            report.duplicate_policy(policy.operation(), origin);
        }

        // Disabled rows are still lowered, so their limits must resolve.
        let spec = policy.body();
        let default_seconds = validate_limit(&spec.default_limit, "default_limit", policy, report);

        let mut earlier: Vec<String> = Vec::new();
        for (i, rule) in spec.pattern_rules.iter().enumerate() {
            let trigger = rule.trigger.trim().to_lowercase();
            if trigger.is_empty() {
                report.pattern_trigger_is_empty(i, origin);
                continue;
            }

            if earlier.iter().any(|e| trigger.contains(e.as_str())) {
                report.duplicate_pattern_trigger_warning(&rule.trigger, origin);
            }

            let name = format!("pattern_rules[{}]", i);
            let seconds = validate_limit(&rule.limit, &name, policy, report);

            if let (Some(pattern), Some(default)) = (seconds, default_seconds)
                && pattern > default
            {
                report.pattern_limit_exceeds_default_warning(&rule.trigger, origin);
            }

            earlier.push(trigger);
        }
    }
}

fn validate_limit(
    limit: &WindowLimitSpec,
    rule: &str,
    policy: &PolicySpec,
    report: &mut ValidationReport,
) -> Option<u64> {
    let Some(resolved) = limit.resolve() else {
        report.invalid_window_limit(rule, policy.origin());
        return None;
    };

    if resolved.is_zero() {
        report.window_limit_is_zero(rule, policy.origin());
        return None;
    }

    Some(resolved.as_seconds())
}
