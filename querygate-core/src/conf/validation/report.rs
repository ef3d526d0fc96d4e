use crate::admission::Operation;
use crate::conf::types::Origin;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Serialize)]
struct ValidationReportJson<'a> {
    errors: &'a [ValidationIssue],
    warnings: &'a [ValidationIssue],
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub(crate) fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub fn render_json(&self) -> serde_json::Result<()> {
        let json = ValidationReportJson {
            errors: &self.errors,
            warnings: &self.warnings,
        };

        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }

    pub fn render_plain(&self) {
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            println!("{}:{}: {}", issue.origin, severity, issue.message);

            if let Some(help) = &issue.help {
                println!("  help: {}", help);
            }
        }
    }

    pub fn render_pretty(&self) {
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 {
            println!(
                "configuration validation failed ({} errors, {} warnings)\n",
                errors, warnings
            );
        } else if warnings > 0 {
            println!("configuration loaded with {} warnings\n", warnings);
        }

        let mut by_file = BTreeMap::new();
        for issue in self.errors.iter().chain(self.warnings.iter()) {
            by_file
                .entry(&issue.origin.file)
                .or_insert_with(Vec::new)
                .push(issue);
        }

        for (file, issues) in by_file {
            println!("{}", file.display());

            for issue in issues {
                match issue.severity {
                    Severity::Error => {
                        println!("  {}: {}", "error".red().bold(), issue.message);
                    }
                    Severity::Warning => {
                        println!("  {}: {}", "warning".yellow().bold(), issue.message);
                    }
                }

                if let Some(help) = &issue.help {
                    println!("  {}: {}", "help".cyan(), help);
                }

                println!();
            }
        }
    }
}

/// Entrypoint Spec Validation
impl ValidationReport {
    pub fn invalid_config_version(&mut self, version: &u32, origin: &Origin) {
        self.error(format!("invalid config version: {}", version), origin, None)
    }

    pub fn policies_include_matches_nothing(&mut self, pattern: &str, origin: &Origin) {
        self.warning(
            format!("policies include pattern matches no files: {}", pattern),
            origin,
            Some("Production thresholds apply to every operation.".to_string()),
        )
    }
}

/// Backend Spec Validation
impl ValidationReport {
    pub fn invalid_backend_url(&mut self, url: &str, reason: &str, origin: &Origin) {
        self.error(
            format!("invalid backend url '{}': {}", url, reason),
            origin,
            None,
        )
    }

    pub fn unsupported_backend_scheme(&mut self, scheme: &str, origin: &Origin) {
        self.error(
            format!("unsupported backend url scheme: {}", scheme),
            origin,
            Some("Use an http:// or https:// base url.".to_string()),
        )
    }

    pub fn backend_timeout_is_zero(&mut self, origin: &Origin) {
        self.error(
            "backend timeout_seconds must be greater than zero".to_string(),
            origin,
            None,
        )
    }
}

/// Admission Spec Validation
impl ValidationReport {
    pub fn bypass_token_is_empty(&mut self, origin: &Origin) {
        self.error(
            "bypass_token is empty while enable_bypass_token = true".to_string(),
            origin,
            Some("Set a token or disable the legacy bypass.".to_string()),
        )
    }

    pub fn legacy_bypass_token_enabled_warning(&mut self, token: &str, origin: &Origin) {
        self.warning(
            format!(
                "legacy bypass token '{}' is honoured inside query text; any query containing it skips window checks",
                token
            ),
            origin,
            Some(
                "Grant the unbounded-window capability explicitly and set enable_bypass_token = false."
                    .to_string(),
            ),
        )
    }

    pub fn grace_exceeds_an_hour_warning(&mut self, grace_seconds: u64, origin: &Origin) {
        self.warning(
            format!("grace_seconds is unusually large: {}", grace_seconds),
            origin,
            None,
        )
    }
}

/// Policy Spec Validation
impl ValidationReport {
    pub fn duplicate_policy(&mut self, operation: Operation, origin: &Origin) {
        self.error(
            format!("duplicate {} policy", operation),
            origin,
            Some("Each operation may be configured in exactly one policy file.".to_string()),
        )
    }

    pub fn invalid_window_limit(&mut self, rule: &str, origin: &Origin) {
        self.error(
            format!(
                "{}: window limit must set exactly one of minutes, hours or days",
                rule
            ),
            origin,
            Some("Example: limit = { hours = 8 }".to_string()),
        )
    }

    pub fn window_limit_is_zero(&mut self, rule: &str, origin: &Origin) {
        self.error(format!("{}: window limit must be positive", rule), origin, None)
    }

    pub fn pattern_trigger_is_empty(&mut self, index: usize, origin: &Origin) {
        self.error(
            format!("pattern_rules[{}]: trigger must not be empty", index),
            origin,
            None,
        )
    }

    pub fn pattern_limit_exceeds_default_warning(&mut self, trigger: &str, origin: &Origin) {
        self.warning(
            format!(
                "pattern rule '{}' allows a wider window than the default rule",
                trigger
            ),
            origin,
            None,
        )
    }

    pub fn duplicate_pattern_trigger_warning(&mut self, trigger: &str, origin: &Origin) {
        self.warning(
            format!("pattern trigger '{}' is shadowed by an earlier rule", trigger),
            origin,
            None,
        )
    }
}
