//! Date/time utilities for PLAYVAULT.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Current UTC time as an RFC3339 string.
///
/// Registration timestamps are stored in this format.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Format a stored RFC3339 timestamp in the given timezone.
///
/// Returns the original string if the timestamp or timezone does not
/// parse.
pub fn format_timestamp(timestamp: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return timestamp.to_string(),
    };

    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&tz).format(format).to_string(),
        Err(_) => timestamp.to_string(),
    }
}
