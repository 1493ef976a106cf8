//! Client-side validation helpers.
//!
//! These checks run before any request is built. They are not authoritative:
//! the API validates again on its side.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use uuid::{Uuid, Variant};

static IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://[^\s/?#]+/[^\s?#]*\.(jpg|jpeg|png|gif|webp)(\?[^\s#]*)?(#\S*)?$")
        .expect("valid image url regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("valid email regex")
});

/// Canonical textual UUID (hyphenated, 36 chars), versions 1 through 5.
pub fn validate_uuid(value: &str) -> bool {
    let value = value.trim();
    if value.len() != 36 {
        return false;
    }
    match Uuid::try_parse(value) {
        Ok(id) => (1..=5).contains(&id.get_version_num()) && id.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}

/// `http(s)` URL whose path ends in a known image extension.
pub fn validate_image_url(value: &str) -> bool {
    IMAGE_URL_RE.is_match(value.trim())
}

pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// 7 to 15 digits, optional leading `+`; spaces and dashes are ignored.
pub fn validate_phone(value: &str) -> bool {
    let trimmed = value.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}

/// Field key -> message, ordered by key so rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl std::error::Error for FieldErrors {}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the first error for a field; later ones for the same key are dropped.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    /// Adds every error of `other` whose field has none yet.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Parsing failures for raw form strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Debe ingresar un número válido")]
    Number,
    #[error("Debe ingresar una fecha válida (AAAA-MM-DD)")]
    Date,
    #[error("Debe ingresar una fecha y hora válidas")]
    DateTime,
}

pub fn parse_f64(value: &str) -> Result<f64, ParseError> {
    let normalized = value.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ParseError::Number)
}

pub fn parse_i64(value: &str) -> Result<i64, ParseError> {
    value.trim().parse::<i64>().map_err(|_| ParseError::Number)
}

/// `YYYY-MM-DD`, optionally followed by a time part which is ignored.
pub fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let date_part = value.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| ParseError::Date)
}

fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Server timestamp: RFC 3339, or without offset (read as UTC).
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_naive_datetime(value)
        .map(|naive| naive.and_utc())
        .ok_or(ParseError::DateTime)
}

/// `datetime-local` input value: wall-clock time in the user's `zone`.
/// An explicit RFC 3339 offset wins over `zone`.
pub fn parse_local_datetime(value: &str, zone: &FixedOffset) -> Result<DateTime<Utc>, ParseError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_naive_datetime(value)
        .and_then(|naive| zone.from_local_datetime(&naive).single())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(ParseError::DateTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(validate_uuid("550E8400-E29B-41D4-A716-446655440000"));
        assert!(!validate_uuid("not-a-uuid"));
        assert!(!validate_uuid(""));
        // version 0 and variant outside 8-b are rejected
        assert!(!validate_uuid("123e4567-e89b-02d3-a456-426614174000"));
        assert!(!validate_uuid("123e4567-e89b-12d3-c456-426614174000"));
        assert!(!validate_uuid("123e4567e89b12d3a456426614174000"));
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://x.com/a.jpg"));
        assert!(validate_image_url("http://cdn.example.org/img/Hotel.PNG"));
        assert!(validate_image_url("https://x.com/a.webp?w=300"));
        assert!(!validate_image_url("https://x.com/a.txt"));
        assert!(!validate_image_url("ftp://x.com/a.jpg"));
        assert!(!validate_image_url("https://x.com/"));
        assert!(!validate_image_url("a.jpg"));
    }

    #[test]
    fn test_validate_email_and_phone() {
        assert!(validate_email("ventas@mayorista.co"));
        assert!(!validate_email("ventas@mayorista"));
        assert!(!validate_email("sin arroba.com"));

        assert!(validate_phone("+57 300 123 4567"));
        assert!(validate_phone("604-444-5555"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("300abc4567"));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("orden", "primero");
        errors.add("orden", "segundo");
        assert_eq!(errors.get("orden"), Some("primero"));
        assert_eq!(errors.len(), 1);
        assert!(errors.clone().into_result(()).is_err());
        assert!(FieldErrors::new().into_result(5).is_ok());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_f64("12,5"), Ok(12.5));
        assert_eq!(parse_f64("abc"), Err(ParseError::Number));
        assert_eq!(parse_f64("NaN"), Err(ParseError::Number));
        assert_eq!(parse_i64(" -1 "), Ok(-1));

        let d = parse_date("2024-03-15").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 15));
        assert!(parse_date("15/03/2024").is_err());

        let dt = parse_datetime("2024-03-15T14:02").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 2));
        assert!(parse_datetime("2024-03-15T14:02:26Z").is_ok());
        assert!(parse_datetime("mañana").is_err());
    }

    #[test]
    fn test_local_datetime_uses_the_user_offset() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = parse_local_datetime("2024-06-10T11:00", &bogota).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 10, 16, 0, 0).unwrap());

        let explicit = parse_local_datetime("2024-06-10T11:00:00Z", &bogota).unwrap();
        assert_eq!(explicit.hour(), 11);
        assert_eq!(parse_local_datetime("", &bogota), Err(ParseError::DateTime));
    }
}
