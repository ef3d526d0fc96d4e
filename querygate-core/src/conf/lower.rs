use crate::admission::{
    Locale, Operation, OperationPolicy, PatternRule, PolicyTable, WidthRule, WindowLimit,
};
use crate::conf::ConfigError;
use crate::conf::types::{
    BackendConfig, BackendSpec, ConfigSpec, OperationPolicySpec, PolicySpec, RuntimeConfig,
    WindowLimitSpec,
};
use url::Url;

pub fn lower_config(spec: ConfigSpec) -> Result<RuntimeConfig, ConfigError> {
    let ConfigSpec {
        entrypoint,
        policies,
        ..
    } = spec;

    let backend = lower_backend(&entrypoint.backend)?;

    let admission = &entrypoint.admission;
    let locale = admission.locale;
    let grace = admission.grace_seconds;

    let mut search = None;
    let mut histogram = None;
    for policy in &policies {
        let slot = match policy.operation() {
            Operation::Search => &mut search,
            Operation::Histogram => &mut histogram,
        };
        if slot.is_some() {
            return Err(ConfigError::DuplicatePolicy {
                operation: policy.operation(),
                origin: policy.origin().to_string(),
            });
        }
        *slot = Some(lower_policy(policy, locale, grace)?);
    }

    let bypass_token = admission
        .enable_bypass_token
        .then_some(admission.bypass_token.as_str());

    let policy = PolicyTable::new(
        locale,
        bypass_token,
        search.unwrap_or_else(|| OperationPolicy::production(Operation::Search, locale, grace)),
        histogram
            .unwrap_or_else(|| OperationPolicy::production(Operation::Histogram, locale, grace)),
    );

    Ok(RuntimeConfig { backend, policy })
}

fn lower_backend(spec: &BackendSpec) -> Result<BackendConfig, ConfigError> {
    let mut raw = spec.base_url.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }

    let base_url = Url::parse(&raw).map_err(|source| ConfigError::InvalidBackendUrl {
        url: spec.base_url.clone(),
        source,
    })?;

    Ok(BackendConfig {
        base_url,
        timeout_seconds: spec.timeout_seconds,
    })
}

fn lower_policy(
    policy: &PolicySpec,
    locale: Locale,
    grace: u64,
) -> Result<OperationPolicy, ConfigError> {
    let spec: &OperationPolicySpec = policy.body();

    let patterns = spec
        .pattern_rules
        .iter()
        .map(|rule| {
            let limit = resolve_limit(&rule.limit, policy)?;
            let trigger = rule.trigger.trim();
            let message = rule
                .message
                .clone()
                .unwrap_or_else(|| locale.pattern_rejection(trigger, &limit));
            Ok(PatternRule::new(
                trigger,
                WidthRule::new(limit, grace, message),
            ))
        })
        .collect::<Result<_, ConfigError>>()?;

    let default_limit = resolve_limit(&spec.default_limit, policy)?;
    let default_message = spec
        .default_message
        .clone()
        .unwrap_or_else(|| locale.default_rejection(&default_limit));

    Ok(OperationPolicy {
        operation: policy.operation(),
        enabled: spec.enable,
        patterns,
        default_rule: WidthRule::new(default_limit, grace, default_message),
    })
}

fn resolve_limit(limit: &WindowLimitSpec, policy: &PolicySpec) -> Result<WindowLimit, ConfigError> {
    limit.resolve().ok_or_else(|| ConfigError::InvalidWindowLimit {
        origin: policy.origin().to_string(),
    })
}
