//! Lenient deserializers for values the API does not always format the same way.

use crate::shared::validation::{parse_date, parse_datetime};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Timestamp as RFC 3339, or without offset (read as UTC). Empty or null gives `None`.
pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_datetime(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// `YYYY-MM-DD`, also accepting a full timestamp (time part ignored).
pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
