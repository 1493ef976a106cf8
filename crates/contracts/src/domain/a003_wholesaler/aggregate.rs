use crate::shared::form::{flag_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::FieldErrors;
use crate::shared::wire::opt_datetime;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Mayorista (agencia que revende servicios con comisión).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wholesaler {
    #[serde(rename = "id_mayorista")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub nit: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
    #[serde(rename = "ciudad", default)]
    pub city: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    /// Percentage in `[0, 100]`.
    #[serde(rename = "comision", default)]
    pub commission: f64,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholesalerPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    pub nit: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "comision")]
    pub commission: f64,
    #[serde(rename = "activo")]
    pub active: bool,
}

const FIELDS: &[FormField] = &[
    FormField::new("nombre", "Razón social", FieldKind::Text),
    FormField::new("nit", "NIT", FieldKind::Text),
    FormField::new("email", "Correo electrónico", FieldKind::Text),
    FormField::new("telefono", "Teléfono", FieldKind::Text),
    FormField::new("ciudad", "Ciudad", FieldKind::Text),
    FormField::new("departamento", "Departamento", FieldKind::Text),
    FormField::new("comision", "Comisión (%)", FieldKind::Number),
    FormField::new("activo", "Activo", FieldKind::Checkbox),
];

/// NIT: 6 to 10 digits with an optional `-d` check digit.
fn is_valid_nit(value: &str) -> bool {
    let (body, check) = match value.split_once('-') {
        Some((b, c)) => (b, Some(c)),
        None => (value, None),
    };
    let body_ok = (6..=10).contains(&body.len()) && body.chars().all(|c| c.is_ascii_digit());
    let check_ok = check.map_or(true, |c| c.len() == 1 && c.chars().all(|c| c.is_ascii_digit()));
    body_ok && check_ok
}

impl FormModel for WholesalerPayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let name = r.text("nombre", 3);
        let nit = r.text("nit", 6);
        if !nit.is_empty() && !r.has_error("nit") && !is_valid_nit(&nit) {
            r.error("nit", "Formato de NIT inválido (ej. 900123456-7)");
        }
        let email = r.email("email");
        let phone = r.phone("telefono");
        let city = r.text("ciudad", 2);
        let department = r.text("departamento", 2);
        let commission = r.number("comision", 0.0, Some(100.0));
        let active = r.flag("activo");
        r.finish(Self {
            name,
            nit,
            email,
            phone,
            city,
            department,
            commission,
            active,
        })
    }

    fn to_form(&self, _zone: &FixedOffset) -> FormValues {
        FormValues::new()
            .with("nombre", self.name.clone())
            .with("nit", self.nit.clone())
            .with("email", self.email.clone())
            .with("telefono", self.phone.clone())
            .with("ciudad", self.city.clone())
            .with("departamento", self.department.clone())
            .with("comision", self.commission.to_string())
            .with("activo", flag_input(self.active))
    }

    fn defaults(_now: DateTime<FixedOffset>) -> FormValues {
        FormValues::new().with("comision", "10").with("activo", "true")
    }
}
