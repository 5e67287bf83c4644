//! Lenient coercion of export values into remote field values.
//!
//! The export is hand-maintained data: numbers arrive as strings, dates as
//! `M/D/YY`, slugs are sometimes missing. None of these helpers fail; a value
//! that cannot be interpreted becomes `0` or `None`.

use chrono::NaiveDate;
use serde_json::Value;

/// Parse the leading decimal number of a value, falling back to `0.0`.
///
/// `"3.5g"` → `3.5`, `"abc"` → `0.0`, `12` → `12.0`.
#[must_use]
pub fn float_or_zero(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_float(s),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// Parse the leading integer of a value, falling back to `0`.
///
/// Fractions are truncated: `"7.5"` → `7`, `8.9` → `8`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn int_or_zero(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => leading_int(s).unwrap_or(0),
        _ => 0,
    }
}

fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Convert an `M/D/YY` export date to an ISO calendar date.
///
/// Two-digit years are read as `20YY`; four-digit years are kept. Empty,
/// absent, or malformed input yields `None`.
///
/// `"3/9/23"` → `Some("2023-03-09")`.
#[must_use]
pub fn iso_date(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    let mut parts = value.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    let year = year.trim();
    let year: i32 = match year.len() {
        1 | 2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Derive a slug from a title: lower-cased, whitespace runs become one hyphen.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// Final path segment of a resource URL, the join key against remote assets.
///
/// Query strings and fragments are dropped, as is a trailing slash. Distinct
/// URLs sharing a filename map to the same key.
#[must_use]
pub fn content_key(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = path.trim_end_matches('/');
    let key = path.rsplit('/').next().unwrap_or(path);
    if key.is_empty() || key.ends_with(':') {
        None
    } else {
        Some(key)
    }
}
