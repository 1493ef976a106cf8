//! Display formatting used by the view-model mappers (es-CO conventions).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Long month name for `month` in 1..=12.
pub fn month_name(month: u32) -> &'static str {
    MONTHS[((month.clamp(1, 12)) - 1) as usize]
}

/// Abbreviated month name for `month` in 1..=12.
pub fn month_abbrev(month: u32) -> &'static str {
    MONTHS_SHORT[((month.clamp(1, 12)) - 1) as usize]
}

/// "15 de marzo de 2024"
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{} de {} de {}", date.day(), month_name(date.month()), date.year())
}

/// "15 de marzo de 2024, 14:02", as wall-clock time in `zone`.
pub fn format_datetime_long(dt: &DateTime<Utc>, zone: &FixedOffset) -> String {
    let dt = dt.with_timezone(zone);
    format!(
        "{}, {:02}:{:02}",
        format_date_long(dt.date_naive()),
        dt.hour(),
        dt.minute()
    )
}

/// Grammatical gender of an entity noun. Participles in messages agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    /// `agree("registrad", true)` gives "registrados" or "registradas".
    pub fn agree(self, stem: &str, plural: bool) -> String {
        let ending = match (self, plural) {
            (Gender::Masculine, false) => "o",
            (Gender::Masculine, true) => "os",
            (Gender::Feminine, false) => "a",
            (Gender::Feminine, true) => "as",
        };
        format!("{stem}{ending}")
    }
}

/// Groups thousands with `.`: `1250000` -> `"1.250.000"`.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Rounded to whole units and followed by the currency code: `"1.250.000 COP"`.
pub fn format_currency(value: f64, currency: &str) -> String {
    let rounded = if value.is_finite() { value.round() as i64 } else { 0 };
    format!("{} {}", format_thousands(rounded), currency)
}

pub fn format_percent(value: f64) -> String {
    let text = format!("{value:.1}");
    format!("{}%", text.trim_end_matches(".0").replace('.', ","))
}

/// "Medellín, Antioquia"; empty parts are skipped.
pub fn location(city: &str, department: &str) -> String {
    [city.trim(), department.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Sí"
    } else {
        "No"
    }
}

pub fn active_label(value: bool) -> &'static str {
    if value {
        "Activo"
    } else {
        "Inactivo"
    }
}

/// Stand-in name for a related record that is never fetched.
///
/// Built from the entity type and the last eight characters of the
/// identifier. It identifies the reference, it is not the record's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceholderLabel(String);

impl PlaceholderLabel {
    pub fn new(entity_type: &str, id: &str) -> Self {
        let chars: Vec<char> = id.trim().chars().collect();
        let start = chars.len().saturating_sub(8);
        let suffix: String = chars[start..].iter().collect();
        Self(format!("{entity_type}-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceholderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
