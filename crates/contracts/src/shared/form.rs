//! Create/edit forms: field descriptors, raw values and the validating reader.

use crate::shared::endpoint::{Endpoint, HttpMethod};
use crate::shared::validation::{
    parse_date, parse_f64, parse_local_datetime, parse_i64, validate_email, validate_image_url,
    validate_phone, validate_uuid, FieldErrors,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    DateTime,
    Checkbox,
    /// `(value, label)` pairs.
    Select(&'static [(&'static str, &'static str)]),
}

/// One input of a create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }
}

/// Raw string values keyed by field key, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), "true" | "on" | "1")
    }
}

/// Reads typed values out of `FormValues`, collecting every field error in one pass.
///
/// Failed reads return a neutral default so the caller can keep building;
/// `finish` turns the collected errors into the final result.
pub struct FormReader<'a> {
    values: &'a FormValues,
    /// Offset of the user's wall clock; date-time inputs are read in it.
    zone: FixedOffset,
    errors: FieldErrors,
}

impl<'a> FormReader<'a> {
    pub fn new(values: &'a FormValues, zone: FixedOffset) -> Self {
        Self {
            values,
            zone,
            errors: FieldErrors::new(),
        }
    }

    pub fn error(&mut self, key: &str, message: impl Into<String>) {
        self.errors.add(key, message);
    }

    pub fn has_error(&self, key: &str) -> bool {
        self.errors.contains(key)
    }

    /// Trimmed text with at least `min_len` characters.
    pub fn text(&mut self, key: &str, min_len: usize) -> String {
        let value = self.values.get(key).trim().to_string();
        if value.is_empty() && min_len > 0 {
            self.errors.add(key, "Este campo es obligatorio");
        } else if value.chars().count() < min_len {
            self.errors
                .add(key, format!("Debe tener al menos {min_len} caracteres"));
        }
        value
    }

    pub fn optional_text(&mut self, key: &str) -> Option<String> {
        let value = self.values.get(key).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Reference to another record: must be a canonical UUID.
    pub fn uuid(&mut self, key: &str) -> String {
        let value = self.values.get(key).trim().to_string();
        if value.is_empty() {
            self.errors.add(key, "Este campo es obligatorio");
        } else if !validate_uuid(&value) {
            self.errors.add(key, "Debe ser un UUID válido");
        }
        value
    }

    pub fn image_url(&mut self, key: &str) -> String {
        let value = self.values.get(key).trim().to_string();
        if value.is_empty() {
            self.errors.add(key, "Este campo es obligatorio");
        } else if !validate_image_url(&value) {
            self.errors.add(
                key,
                "Debe ser una URL http(s) de imagen (.jpg, .jpeg, .png, .gif, .webp)",
            );
        }
        value
    }

    pub fn email(&mut self, key: &str) -> String {
        let value = self.values.get(key).trim().to_string();
        if !validate_email(&value) {
            self.errors.add(key, "Debe ser un correo electrónico válido");
        }
        value
    }

    pub fn phone(&mut self, key: &str) -> String {
        let value = self.values.get(key).trim().to_string();
        if !validate_phone(&value) {
            self.errors.add(key, "Debe tener entre 7 y 15 dígitos");
        }
        value
    }

    /// Integer within `[min, max]` (`max` open when `None`).
    pub fn int(&mut self, key: &str, min: i64, max: Option<i64>) -> i64 {
        let raw = self.values.get(key);
        if raw.trim().is_empty() {
            self.errors.add(key, "Este campo es obligatorio");
            return min;
        }
        match parse_i64(raw) {
            Ok(v) => {
                self.check_range(key, v as f64, min as f64, max.map(|m| m as f64));
                v
            }
            Err(e) => {
                self.errors.add(key, e.to_string());
                min
            }
        }
    }

    /// Decimal within `[min, max]` (`max` open when `None`).
    pub fn number(&mut self, key: &str, min: f64, max: Option<f64>) -> f64 {
        let raw = self.values.get(key);
        if raw.trim().is_empty() {
            self.errors.add(key, "Este campo es obligatorio");
            return min;
        }
        match parse_f64(raw) {
            Ok(v) => {
                self.check_range(key, v, min, max);
                v
            }
            Err(e) => {
                self.errors.add(key, e.to_string());
                min
            }
        }
    }

    fn check_range(&mut self, key: &str, value: f64, min: f64, max: Option<f64>) {
        match max {
            Some(max) if value < min || value > max => {
                self.errors
                    .add(key, format!("Debe estar entre {min} y {max}"));
            }
            None if value < min && min == 0.0 => {
                self.errors.add(key, "No puede ser negativo");
            }
            None if value < min => {
                self.errors.add(key, format!("Debe ser mayor o igual a {min}"));
            }
            _ => {}
        }
    }

    pub fn date(&mut self, key: &str) -> Option<NaiveDate> {
        match parse_date(self.values.get(key)) {
            Ok(d) => Some(d),
            Err(e) => {
                self.errors.add(key, e.to_string());
                None
            }
        }
    }

    pub fn datetime(&mut self, key: &str) -> Option<DateTime<Utc>> {
        match parse_local_datetime(self.values.get(key), &self.zone) {
            Ok(d) => Some(d),
            Err(e) => {
                self.errors.add(key, e.to_string());
                None
            }
        }
    }

    pub fn flag(&mut self, key: &str) -> bool {
        self.values.flag(key)
    }

    /// One of the allowed select values.
    pub fn choice(&mut self, key: &str, options: &[(&str, &str)]) -> String {
        let value = self.values.get(key).trim();
        if options.iter().any(|(v, _)| *v == value) {
            value.to_string()
        } else {
            self.errors.add(key, "Seleccione una opción válida");
            options.first().map(|(v, _)| v.to_string()).unwrap_or_default()
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        self.errors.into_result(value)
    }
}

/// Payload of a create/edit form.
pub trait FormModel: Sized {
    fn fields() -> &'static [FormField];

    /// Parses and validates raw values. `now` is the user's wall clock: it anchors
    /// past/future checks and its offset is the zone date inputs are read in.
    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors>;

    /// Edit form values, with timestamps shown in `zone`.
    fn to_form(&self, zone: &FixedOffset) -> FormValues;

    /// Values for an empty create form.
    fn defaults(now: DateTime<FixedOffset>) -> FormValues;

    /// Rules that only apply when creating a record.
    fn create_rules(_values: &FormValues, _now: DateTime<FixedOffset>, _errors: &mut FieldErrors) {}
}

/// Value for a `datetime-local` input: `dt` as wall-clock time in `zone`.
pub fn datetime_input(dt: &DateTime<Utc>, zone: &FixedOffset) -> String {
    dt.with_timezone(zone).format("%Y-%m-%dT%H:%M").to_string()
}

/// Value for a `date` input.
pub fn date_input(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn flag_input(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// The create or update call that saves a valid form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    pub path: String,
}

/// Validates the form and picks the create/update request for `resource`.
/// The validated model is the request body.
pub fn prepare_save<M: FormModel>(
    resource: &str,
    mode: &FormMode,
    values: &FormValues,
    now: DateTime<FixedOffset>,
) -> Result<(M, SaveRequest), FieldErrors> {
    let mut create_errors = FieldErrors::new();
    if *mode == FormMode::Create {
        M::create_rules(values, now, &mut create_errors);
    }
    let model = match M::from_form(values, now) {
        Ok(model) if create_errors.is_empty() => model,
        Ok(_) => return Err(create_errors),
        Err(mut errors) => {
            errors.merge(create_errors);
            return Err(errors);
        }
    };
    let endpoint = match mode {
        FormMode::Create => Endpoint::Create,
        FormMode::Edit(id) => Endpoint::Update(id.clone()),
    };
    let request = SaveRequest {
        method: endpoint.method(),
        path: endpoint.path(resource),
        endpoint,
    };
    Ok((model, request))
}
