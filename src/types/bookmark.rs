use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a bookmark owner, sourced from storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label shown for this user in the dropdown.
    pub fn label(&self) -> String {
        format!("User {}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Represents a saved bookmark.
///
/// `timestamp` is kept as the ISO-8601 string it was persisted with so that
/// stored sequences round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub timestamp: String,
}

impl Bookmark {
    /// Parses `timestamp` with [`parse_timestamp`]. Returns `None` if malformed.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Date-time layouts accepted when no offset is given.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parses an ISO-8601 timestamp into a UTC instant.
///
/// Accepted, in order:
/// - RFC 3339 with an offset (`2023-01-05T10:00:00.000Z`)
/// - a `Z`-suffixed date-time without seconds (`2023-01-05T10:00Z`)
/// - a date-time without offset, read as local time (`2023-01-05T10:00:00`)
/// - a bare date, read as midnight UTC (`2023-01-05`)
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = s.strip_suffix(['Z', 'z']).and_then(parse_naive) {
        return Some(naive.and_utc());
    }
    if let Some(naive) = parse_naive(s) {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|n| n.and_utc())
}

/// Formats an instant the way bookmarks are stamped: UTC, millisecond precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Raw values of the bookmark form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl FormFields {
    /// Builds a candidate bookmark from the trimmed field values.
    pub fn to_candidate(&self, at: DateTime<Utc>) -> Bookmark {
        Bookmark {
            url: self.url.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            timestamp: format_timestamp(at),
        }
    }
}
