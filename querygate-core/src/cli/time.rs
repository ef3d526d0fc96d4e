use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};

/// Parse a command-line timestamp into unix seconds.
///
/// Accepted forms:
/// - unix seconds (`1700000000`, `0` meaning absent)
/// - RFC 3339 (`2024-05-01T08:00:00Z`)
/// - `now`, or `now-<N><m|h|d>` relative to the current time
pub fn parse_timestamp(s: &str) -> Result<i64> {
    parse_timestamp_at(s, Utc::now())
}

pub(crate) fn parse_timestamp_at(s: &str, now: DateTime<Utc>) -> Result<i64> {
    let s = s.trim();

    if let Ok(secs) = s.parse::<i64>() {
        return Ok(secs);
    }

    if let Some(rest) = s.strip_prefix("now") {
        if rest.is_empty() {
            return Ok(now.timestamp());
        }
        let offset = rest
            .strip_prefix('-')
            .ok_or_else(|| anyhow!("invalid relative timestamp '{s}': expected now-<N><m|h|d>"))?;
        return Ok(now.timestamp().saturating_sub(parse_offset(offset)?));
    }

    let parsed = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("invalid timestamp '{s}': expected unix seconds, RFC 3339 or now"))?;
    Ok(parsed.timestamp())
}

fn parse_offset(offset: &str) -> Result<i64> {
    let Some(unit) = offset.chars().last() else {
        bail!("empty relative offset");
    };
    let amount: i64 = offset[..offset.len() - unit.len_utf8()]
        .parse()
        .with_context(|| format!("invalid relative offset '{offset}'"))?;
    if amount < 0 {
        bail!("relative offset '{offset}' must not be negative");
    }

    let scale = match unit {
        'm' => 60,
        'h' => 3600,
        'd' => 86_400,
        other => bail!("unknown offset unit '{other}': expected m, h or d"),
    };

    Ok(amount.saturating_mul(scale))
}
