use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Metadata of an update that is known to be available.
///
/// Supplied by whoever discovered the update; read-only to the installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub current_version: String,
    pub version: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl UpdateInfo {
    /// Release date, when `date` holds something recognisable.
    ///
    /// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD`, and any text whose
    /// first whitespace-separated token is a `YYYY-MM-DD` date.
    pub fn release_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        let first = raw.split_whitespace().next()?;
        NaiveDate::parse_from_str(first, "%Y-%m-%d").ok()
    }

    /// Release date formatted for display, e.g. `January 15, 2024`.
    ///
    /// Falls back to the raw text when it cannot be parsed.
    pub fn formatted_date(&self) -> Option<String> {
        match self.release_date() {
            Some(date) => Some(date.format("%B %-d, %Y").to_string()),
            None => self
                .date
                .as_ref()
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty()),
        }
    }
}
