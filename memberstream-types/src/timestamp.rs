//! Server-side timestamps for delete events.
//!
//! Add and update events carry the caller's timestamp string untouched. Delete
//! requests have no body, so the builder stamps them with the current UTC
//! time instead. Existing consumers expect that value wrapped in a second
//! layer of JSON; [`DeleteTimestamp`] makes that choice explicit.

use chrono::{DateTime, Utc};

/// How the server-generated timestamp of a delete event is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeleteTimestamp {
    /// A string holding the JSON object `{"timestamp":"<utc>"}`.
    ///
    /// This is what downstream consumers of the existing stream parse.
    #[default]
    Nested,
    /// The `<utc>` string itself, the same shape add and update use.
    Flat,
}

impl DeleteTimestamp {
    /// Renders the timestamp field for a delete taken at `now`.
    #[must_use]
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let stamp = format_utc(now);
        match self {
            Self::Nested => serde_json::json!({ "timestamp": stamp }).to_string(),
            Self::Flat => stamp,
        }
    }
}

/// Formats a UTC instant as ISO 8601 without offset.
///
/// Microseconds are printed when non-zero and omitted otherwise, e.g.
/// `2024-01-01T00:00:00.250000` or `2024-01-01T00:00:00`.
#[must_use]
pub fn format_utc(now: DateTime<Utc>) -> String {
    if now.timestamp_subsec_micros() == 0 {
        now.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
