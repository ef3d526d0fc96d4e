use crate::admission::{Operation, WindowLimit};
use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub enum PolicySpec {
    Search(OperationPolicySpec),
    Histogram(OperationPolicySpec),
}

impl PolicySpec {
    pub fn operation(&self) -> Operation {
        match self {
            PolicySpec::Search(_) => Operation::Search,
            PolicySpec::Histogram(_) => Operation::Histogram,
        }
    }

    pub fn body(&self) -> &OperationPolicySpec {
        match self {
            PolicySpec::Search(spec) | PolicySpec::Histogram(spec) => spec,
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.body().origin
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OperationPolicySpec {
    #[serde(skip)]
    pub origin: Origin,

    /// Whether admission checks run for this operation.
    #[serde(default = "default_enable")]
    pub enable: bool,

    //-------------------------------------------------------------------------
    // Rules, first match wins
    //-------------------------------------------------------------------------
    #[serde(default)]
    pub pattern_rules: Vec<PatternRuleSpec>,

    pub default_limit: WindowLimitSpec,

    /// Overrides the localized default-rule message.
    pub default_message: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PatternRuleSpec {
    pub trigger: String,
    pub limit: WindowLimitSpec,
    pub message: Option<String>,
}

/// A limit written as `{ hours = 8 }`. Exactly one unit must be set.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WindowLimitSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u64>,
}

impl WindowLimitSpec {
    pub fn resolve(&self) -> Option<WindowLimit> {
        match (self.minutes, self.hours, self.days) {
            (Some(m), None, None) => Some(WindowLimit::Minutes(m)),
            (None, Some(h), None) => Some(WindowLimit::Hours(h)),
            (None, None, Some(d)) => Some(WindowLimit::Days(d)),
            _ => None,
        }
    }
}

fn default_enable() -> bool {
    true
}
