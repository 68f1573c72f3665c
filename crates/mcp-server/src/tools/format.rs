//! Shared text renderers for tool output.

use std::fmt::{Display, Write};

use chrono::{DateTime, NaiveDateTime};

pub const REDACTED: &str = "***REDACTED***";

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable size in binary units ("1.5 GB").
pub fn bytes(value: u64) -> String {
    if value < 1024 {
        return format!("{value} B");
    }
    let mut size = value as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

pub fn megabytes(value: u64) -> String {
    bytes(value.saturating_mul(1024 * 1024))
}

pub fn gigabytes(value: u64) -> String {
    bytes(value.saturating_mul(1024 * 1024 * 1024))
}

/// Linode timestamps are UTC without an offset (`2024-01-15T10:30:00`). Unparseable values are
/// returned verbatim.
pub fn timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "N/A".to_string();
    };
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return parsed.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .naive_utc()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string();
    }
    raw.to_string()
}

/// `"Found N <kind>:"` followed by a blank line, or a one-line empty notice.
pub fn list_header(count: usize, kind: &str) -> String {
    if count == 0 {
        format!("No {kind} found.")
    } else {
        format!("Found {count} {kind}:\n\n")
    }
}

pub fn details_header(kind: &str) -> String {
    format!("{kind} Details:\n")
}

/// Append a `Key: Value` line.
pub fn field(out: &mut String, key: &str, value: impl Display) {
    let _ = writeln!(out, "{key}: {value}");
}

/// Append an indented `Key: Value` line inside a list stanza.
pub fn item_field(out: &mut String, key: &str, value: impl Display) {
    let _ = writeln!(out, "  {key}: {value}");
}

pub fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

pub fn or_none(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "None".to_string(),
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Mask a secret for list output. Empty secrets stay visibly empty.
pub fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        REDACTED
    }
}

/// Compact JSON for `*_json` tools.
pub fn compact_json<T: serde::Serialize>(value: &T) -> Result<String, super::ToolError> {
    serde_json::to_string(value)
        .map_err(|err| super::ToolError::Framework(format!("failed to serialize response: {err}")))
}
