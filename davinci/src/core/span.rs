//! Human time spans: `45m`, `1.5h`, `2d`, `1h 30m`, or bare minutes.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::core::error::{Error, Result};

static PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(-?\d+(?:\.\d+)?)\s*([a-z]*)\s*").expect("span pattern is valid")
});

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;

/// Parse a span. A number without a unit counts as minutes.
pub fn parse_span(input: &str) -> Result<Duration> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(Error::validation("empty time estimate"));
    }

    let mut total = 0.0;
    while !rest.is_empty() {
        let caps = PART
            .captures(rest)
            .ok_or_else(|| Error::validation(format!("cannot read time estimate '{input}'")))?;
        let amount: f64 = caps[1]
            .parse()
            .map_err(|_| Error::validation(format!("bad number in '{input}'")))?;
        if amount < 0.0 {
            return Err(Error::validation(format!(
                "time estimate '{input}' must be non-negative"
            )));
        }
        total += amount * unit_seconds(&caps[2], input)?;
        rest = &rest[caps[0].len()..];
    }

    Duration::try_from_secs_f64(total)
        .map_err(|err| Error::validation(format!("time estimate '{input}': {err}")))
}

fn unit_seconds(unit: &str, input: &str) -> Result<f64> {
    let seconds = match unit.to_ascii_lowercase().as_str() {
        "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "" | "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "wk" | "week" | "weeks" => WEEK,
        other => {
            return Err(Error::validation(format!(
                "unknown time unit '{other}' in '{input}'"
            )));
        }
    };
    Ok(seconds)
}

/// Compact rendering such as `1d 2h 5m`. Sub-minute spans show seconds.
pub fn format_span(span: Duration) -> String {
    let secs = span.as_secs();
    if secs < 60 {
        return format!("{secs}s");
    }
    let minutes = (span.as_secs_f64() / MINUTE).round() as u64;
    let (days, rem) = (minutes / (24 * 60), minutes % (24 * 60));
    let (hours, mins) = (rem / 60, rem % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 || parts.is_empty() {
        parts.push(format!("{mins}m"));
    }
    parts.join(" ")
}
