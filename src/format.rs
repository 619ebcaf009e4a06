//! Display formatting for metric values.
//!
//! Every function here is total: whatever it is given, it returns a string.
//! Values that cannot be read as numbers are shown verbatim, and `null` or
//! the `"N/A"` placeholder become `"N/A"`. The display [`Language`] is always
//! passed in explicitly.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::language::{Language, TimeUnit};
use crate::models::{Diff, Scalar, NOT_AVAILABLE};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Unix timestamps above this are taken to be milliseconds, the rest seconds.
pub const MILLIS_THRESHOLD: f64 = 10_000_000_000.0;

/// Group the integer digits of `n` and keep up to three fractional digits.
fn grouped(n: f64, lang: Language) -> String {
    let text = format!("{:.3}", n.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if n.is_sign_negative() && !is_zero {
        out.push('-');
    }
    let sep = lang.group_separator();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    if !frac_part.is_empty() {
        out.push(lang.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

fn is_missing(value: &Scalar) -> bool {
    value.is_null() || value.is_not_available()
}

/// Thousands-grouped number, e.g. `1,234,567`.
pub fn int(value: impl Into<Scalar>, lang: Language) -> String {
    let value = value.into();
    if is_missing(&value) {
        return NOT_AVAILABLE.to_string();
    }
    let n = value.to_number();
    if n.is_finite() {
        grouped(n, lang)
    } else {
        value.to_string()
    }
}

/// Short form for large numbers: `1.5m`, `2.3k`, otherwise as [`int`].
///
/// The single decimal is truncated, so `2_399` is `2.3k`.
pub fn compact(value: impl Into<Scalar>, lang: Language) -> String {
    let value = value.into();
    if is_missing(&value) {
        return NOT_AVAILABLE.to_string();
    }
    let n = value.to_number();
    if !n.is_finite() {
        return value.to_string();
    }
    if n >= 1_000_000.0 {
        format!("{:.1}m", (n / 100_000.0).floor() / 10.0)
    } else if n >= 1_000.0 {
        format!("{:.1}k", (n / 100.0).floor() / 10.0)
    } else {
        grouped(n, lang)
    }
}

/// Whole-dollar amount, e.g. `$12,346`.
pub fn money(value: impl Into<Scalar>, lang: Language) -> String {
    let value = value.into();
    if value.is_null() {
        return NOT_AVAILABLE.to_string();
    }
    let n = value.to_number();
    if n.is_finite() {
        format!("${}", grouped((n + 0.5).floor(), lang))
    } else {
        value.to_string()
    }
}

/// Store price with cents, e.g. `$19.99`.
pub fn price(value: impl Into<Scalar>) -> String {
    let value = value.into();
    if value.is_null() {
        return NOT_AVAILABLE.to_string();
    }
    let n = value.to_number();
    if n.is_finite() {
        format!("${:.2}", n)
    } else {
        value.to_string()
    }
}

/// Signed change such as `+1,200`, or `None` when there is nothing to show.
pub fn delta(change: f64, lang: Language) -> Option<String> {
    if !Diff::is_present(change) {
        return None;
    }
    let sign = if change > 0.0 { "+" } else { "" };
    Some(format!("{}{}", sign, grouped(change, lang)))
}

/// Interpret a unix timestamp in seconds or milliseconds.
fn from_unix(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let millis = if n > MILLIS_THRESHOLD { n } else { n * 1000.0 };
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt.and_utc());
        }
    }
    for pattern in ["%Y-%m-%d", "%b %d, %Y", "%d %b, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(text, pattern) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<f64>().ok().and_then(from_unix);
    }
    None
}

/// Calendar date from an ISO string or a unix timestamp.
///
/// Timestamps are read as seconds unless they exceed [`MILLIS_THRESHOLD`].
/// Dates are shown in UTC. Input that is not a date is returned unchanged.
pub fn date(value: impl Into<Scalar>, lang: Language) -> String {
    let value = value.into();
    if !value.is_truthy() {
        return NOT_AVAILABLE.to_string();
    }
    let parsed = match value.as_value() {
        Value::Number(n) => n.as_f64().and_then(from_unix),
        Value::String(s) => parse_date_text(s),
        _ => None,
    };
    match parsed {
        Some(dt) => lang.date(dt.day(), dt.month0() as usize, dt.year()),
        None => value.to_string(),
    }
}

/// How long ago `timestamp_ms` was, as seen from `now_ms`.
///
/// Picks the largest whole unit among days, hours and minutes; anything under
/// a minute, or in the future, is "just now".
pub fn time_ago(timestamp_ms: i64, now_ms: i64, lang: Language) -> String {
    let elapsed = now_ms.saturating_sub(timestamp_ms);
    let days = elapsed.div_euclid(DAY_MS);
    let hours = elapsed.div_euclid(HOUR_MS);
    let minutes = elapsed.div_euclid(MINUTE_MS);

    if days > 0 {
        lang.time_ago(days, TimeUnit::Days)
    } else if hours > 0 {
        lang.time_ago(hours, TimeUnit::Hours)
    } else if minutes > 0 {
        lang.time_ago(minutes, TimeUnit::Minutes)
    } else {
        lang.just_now().to_string()
    }
}
