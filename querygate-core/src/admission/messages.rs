use crate::admission::WindowLimit;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language of user-facing rejection messages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh-cn" | "zh_cn" | "zh" => Ok(Self::ZhCn),
            _ => Err(anyhow::anyhow!("unsupported locale: {}", s)),
        }
    }
}

impl Locale {
    pub fn format_limit(&self, limit: &WindowLimit) -> String {
        let (amount, unit) = match (self, limit) {
            (Locale::En, WindowLimit::Minutes(n)) => (*n, plural(*n, "minute", "minutes")),
            (Locale::En, WindowLimit::Hours(n)) => (*n, plural(*n, "hour", "hours")),
            (Locale::En, WindowLimit::Days(n)) => (*n, plural(*n, "day", "days")),
            (Locale::ZhCn, WindowLimit::Minutes(n)) => return format!("{n}分钟"),
            (Locale::ZhCn, WindowLimit::Hours(n)) => return format!("{n}小时"),
            (Locale::ZhCn, WindowLimit::Days(n)) => return format!("{n}天"),
        };
        format!("{amount} {unit}")
    }

    /// Rejection for a window that is too wide for a query matching `trigger`.
    pub fn pattern_rejection(&self, trigger: &str, limit: &WindowLimit) -> String {
        let limit = self.format_limit(limit);
        match self {
            Locale::En => format!(
                "the query window may not exceed {limit} when the query contains a `{trigger}` condition"
            ),
            Locale::ZhCn => {
                format!("查询条件中包含 {trigger} 的情况下，查询时间段不允许超过{limit}。")
            }
        }
    }

    /// Rejection for a window that is too wide for any filtered query.
    pub fn default_rejection(&self, limit: &WindowLimit) -> String {
        let limit = self.format_limit(limit);
        match self {
            Locale::En => {
                format!("the query window may not exceed {limit} when a query condition is present")
            }
            Locale::ZhCn => format!("包含查询条件的情况下，查询时间段不允许超过{limit}。"),
        }
    }

    pub fn inverted_window(&self, start_time: i64, end_time: i64) -> String {
        match self {
            Locale::En => format!(
                "the query window is invalid: end time {end_time} precedes start time {start_time}"
            ),
            Locale::ZhCn => "查询时间段无效，结束时间早于开始时间。".to_string(),
        }
    }
}

fn plural(n: u64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
