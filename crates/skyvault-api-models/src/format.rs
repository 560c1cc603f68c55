//! Display helpers shared by the web UI and the CLI.

use chrono::{DateTime, NaiveDateTime};

/// Display quota used by the storage bar (5 GiB).
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Placeholder for missing values.
pub const EM_DASH: &str = "—";

/// Name used when a download carries no filename hint.
pub const DEFAULT_DOWNLOAD_NAME: &str = "download";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Human-friendly file size (`B`, `KB` with one decimal, `MB` with two).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Bytes as mebibytes with two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / MIB as f64)
}

/// Bytes as gibibytes with one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / GIB as f64)
}

/// Share of the quota in use, clamped to `0..=100`; a zero quota reads as empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn storage_percent(used: u64, quota: u64) -> f64 {
    if quota == 0 {
        return 0.0;
    }
    (used as f64 / quota as f64 * 100.0).clamp(0.0, 100.0)
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`.
///
/// Zone-less timestamps are shown as-is; unparseable input is echoed back and
/// a missing value renders as an em dash.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return EM_DASH.to_string();
    };
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |parsed| parsed.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Parse an ISO-8601 timestamp with or without a zone offset.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Extract the `filename` hint from a `Content-Disposition` header value.
#[must_use]
pub fn content_disposition_filename(header: Option<&str>) -> String {
    header
        .and_then(parse_disposition)
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

fn parse_disposition(header: &str) -> Option<String> {
    const KEY: &str = "filename=";
    let start = header.find(KEY)? + KEY.len();
    let rest = header[start..].trim_start_matches('"');
    let name: String = rest
        .chars()
        .take_while(|ch| *ch != '"' && *ch != ';')
        .collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
