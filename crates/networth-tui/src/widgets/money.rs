//! Currency, quantity and age formatting helpers.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Group the integer part of a non-negative decimal string with commas.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "1,234.56", "-980.00". Non-finite values render as "n/a".
pub fn fmt_money(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".into();
    }
    let formatted = format!("{:.2}", value.abs());
    let (int, frac) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{}.{frac}", group_thousands(int))
}

/// Compact form for chart labels: "950", "12.3K", "1.2M", "3.4B".
pub fn fmt_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1e9 {
        format!("{sign}{:.1}B", abs / 1e9)
    } else if abs >= 1e6 {
        format!("{sign}{:.1}M", abs / 1e6)
    } else if abs >= 1e3 {
        format!("{sign}{:.1}K", abs / 1e3)
    } else {
        format!("{sign}{abs:.0}")
    }
}

/// Token and share counts: trailing zeros trimmed, up to 8 decimals.
pub fn fmt_quantity(value: f64) -> String {
    let s = format!("{value:.8}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" { "0".into() } else { s.to_owned() }
}

pub fn fmt_opt_money(value: Option<f64>) -> String {
    value.map(fmt_money).unwrap_or_default()
}

/// "loaded 2m 5s ago", rounded to whole seconds.
pub fn fmt_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0).unsigned_abs();
    if secs == 0 {
        return "just now".into();
    }
    format!("{} ago", humantime::format_duration(Duration::from_secs(secs)))
}
