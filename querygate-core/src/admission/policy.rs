use crate::admission::{Locale, Operation};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Padding added to every threshold to absorb clock skew and rounding.
pub const GRACE_SECONDS: u64 = 300;

/// Legacy in-band escape hatch recognised inside query text.
pub const DEFAULT_BYPASS_TOKEN: &str = "6=6 and";

pub const DEFAULT_PATTERN_TRIGGER: &str = "like";

/// Maximum window width in user-facing units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowLimit {
    Minutes(u64),
    Hours(u64),
    Days(u64),
}

impl WindowLimit {
    pub fn as_seconds(&self) -> u64 {
        match self {
            WindowLimit::Minutes(n) => n.saturating_mul(60),
            WindowLimit::Hours(n) => n.saturating_mul(3600),
            WindowLimit::Days(n) => n.saturating_mul(24 * 3600),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_seconds() == 0
    }
}

/// A width threshold together with the message returned when it is exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidthRule {
    pub limit: WindowLimit,
    /// `limit` plus grace padding.
    pub max_width_seconds: i64,
    pub rejection_message: String,
}

impl WidthRule {
    pub fn new(limit: WindowLimit, grace_seconds: u64, rejection_message: String) -> Self {
        let max = limit.as_seconds().saturating_add(grace_seconds);
        Self {
            limit,
            max_width_seconds: i64::try_from(max).unwrap_or(i64::MAX),
            rejection_message,
        }
    }

    pub fn exceeded_by(&self, width: i64) -> bool {
        width > self.max_width_seconds
    }
}

/// Narrows the window when the lower-cased query contains `trigger`.
///
/// The trigger is stored trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternRule {
    pub trigger: String,
    pub width: WidthRule,
}

impl PatternRule {
    pub fn new(trigger: &str, width: WidthRule) -> Self {
        Self {
            trigger: trigger.trim().to_lowercase(),
            width,
        }
    }

    pub fn matches(&self, query_lower: &str) -> bool {
        query_lower.contains(self.trigger.as_str())
    }
}

/// One row of the policy table.
///
/// Pattern rules are tried in order; the default rule catches everything
/// else, so every query text resolves to exactly one width rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationPolicy {
    pub operation: Operation,
    pub enabled: bool,
    pub patterns: SmallVec<[PatternRule; 2]>,
    pub default_rule: WidthRule,
}

impl OperationPolicy {
    /// Production thresholds: `like` queries are limited to 4 hours for search
    /// and 8 hours for histograms, every other filtered query to 15 days.
    pub fn production(operation: Operation, locale: Locale, grace_seconds: u64) -> Self {
        let pattern_limit = match operation {
            Operation::Search => WindowLimit::Hours(4),
            Operation::Histogram => WindowLimit::Hours(8),
        };
        let default_limit = WindowLimit::Days(15);

        let pattern = PatternRule::new(
            DEFAULT_PATTERN_TRIGGER,
            WidthRule::new(
                pattern_limit,
                grace_seconds,
                locale.pattern_rejection(DEFAULT_PATTERN_TRIGGER, &pattern_limit),
            ),
        );

        Self {
            operation,
            enabled: true,
            patterns: smallvec![pattern],
            default_rule: WidthRule::new(
                default_limit,
                grace_seconds,
                locale.default_rejection(&default_limit),
            ),
        }
    }

    /// First pattern rule matching the query, or `None` for the default rule.
    pub fn matching_pattern(&self, query_lower: &str) -> Option<&PatternRule> {
        self.patterns.iter().find(|p| p.matches(query_lower))
    }

    pub fn select(&self, query_lower: &str) -> &WidthRule {
        match self.matching_pattern(query_lower) {
            Some(pattern) => &pattern.width,
            None => &self.default_rule,
        }
    }
}

/// Read-only admission thresholds, one row per [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyTable {
    locale: Locale,
    bypass_token: Option<String>,
    search: OperationPolicy,
    histogram: OperationPolicy,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::production()
    }
}

impl PolicyTable {
    pub fn new(
        locale: Locale,
        bypass_token: Option<&str>,
        search: OperationPolicy,
        histogram: OperationPolicy,
    ) -> Self {
        Self {
            locale,
            bypass_token: bypass_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| t.to_lowercase()),
            search,
            histogram,
        }
    }

    pub fn production() -> Self {
        Self::localized(Locale::En)
    }

    pub fn localized(locale: Locale) -> Self {
        Self::new(
            locale,
            Some(DEFAULT_BYPASS_TOKEN),
            OperationPolicy::production(Operation::Search, locale, GRACE_SECONDS),
            OperationPolicy::production(Operation::Histogram, locale, GRACE_SECONDS),
        )
    }

    pub fn row(&self, operation: Operation) -> &OperationPolicy {
        match operation {
            Operation::Search => &self.search,
            Operation::Histogram => &self.histogram,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Lower-cased legacy bypass token, if still honoured.
    pub fn bypass_token(&self) -> Option<&str> {
        self.bypass_token.as_deref()
    }
}
