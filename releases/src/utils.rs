use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase-to-uppercase transitions inside camelCase keys
pub static CAMEL_BOUNDARY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Failed to compile camel case regex"));

/// Runs of separators in snake_case and kebab-case keys
pub static KEY_SEPARATOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_\-\s]+").expect("Failed to compile key separator regex"));

/// Parses an ISO-8601 date or date-time. Values without an offset are read as UTC.
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Turns a section key into a readable title: `knownIssues` becomes `Known issues`.
pub fn humanize_key(key: &str) -> String {
    let spaced = CAMEL_BOUNDARY_PATTERN.replace_all(key, "$1 $2");
    let spaced = KEY_SEPARATOR_PATTERN.replace_all(&spaced, " ");
    let lowered = spaced.trim().to_lowercase();

    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
