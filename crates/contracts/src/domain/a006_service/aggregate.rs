use crate::shared::form::{flag_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::FieldErrors;
use crate::shared::wire::opt_datetime;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "COP".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Alojamiento,
    Transporte,
    Tour,
    Alimentacion,
    #[default]
    Otro,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Alojamiento,
        ServiceType::Transporte,
        ServiceType::Tour,
        ServiceType::Alimentacion,
        ServiceType::Otro,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::Alojamiento => "alojamiento",
            ServiceType::Transporte => "transporte",
            ServiceType::Tour => "tour",
            ServiceType::Alimentacion => "alimentacion",
            ServiceType::Otro => "otro",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Alojamiento => "Alojamiento",
            ServiceType::Transporte => "Transporte",
            ServiceType::Tour => "Tour",
            ServiceType::Alimentacion => "Alimentación",
            ServiceType::Otro => "Otro",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

pub const SERVICE_TYPE_OPTIONS: &[(&str, &str)] = &[
    ("alojamiento", "Alojamiento"),
    ("transporte", "Transporte"),
    ("tour", "Tour"),
    ("alimentacion", "Alimentación"),
    ("otro", "Otro"),
];

pub const CURRENCY_OPTIONS: &[(&str, &str)] = &[
    ("COP", "Peso colombiano (COP)"),
    ("USD", "Dólar estadounidense (USD)"),
    ("EUR", "Euro (EUR)"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "id_servicio")]
    pub id: String,
    #[serde(rename = "id_proveedor", default)]
    pub provider_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "tipo", default)]
    pub kind: ServiceType,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "moneda", default = "default_currency")]
    pub currency: String,
    #[serde(rename = "capacidad", default)]
    pub capacity: i64,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePayload {
    #[serde(rename = "id_proveedor")]
    pub provider_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: ServiceType,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "moneda")]
    pub currency: String,
    #[serde(rename = "capacidad")]
    pub capacity: i64,
    #[serde(rename = "activo")]
    pub active: bool,
}

const FIELDS: &[FormField] = &[
    FormField::new("id_proveedor", "ID del proveedor", FieldKind::Text),
    FormField::new("nombre", "Nombre", FieldKind::Text),
    FormField::new("descripcion", "Descripción", FieldKind::TextArea),
    FormField::new("tipo", "Tipo", FieldKind::Select(SERVICE_TYPE_OPTIONS)),
    FormField::new("precio", "Precio", FieldKind::Number),
    FormField::new("moneda", "Moneda", FieldKind::Select(CURRENCY_OPTIONS)),
    FormField::new("capacidad", "Capacidad", FieldKind::Number),
    FormField::new("activo", "Activo", FieldKind::Checkbox),
];

impl FormModel for ServicePayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let provider_id = r.uuid("id_proveedor");
        let name = r.text("nombre", 3);
        let description = r.text("descripcion", 10);
        let kind = ServiceType::from_code(&r.choice("tipo", SERVICE_TYPE_OPTIONS)).unwrap_or_default();
        let price = r.number("precio", 0.0, None);
        let currency = r.choice("moneda", CURRENCY_OPTIONS);
        let capacity = r.int("capacidad", 0, None);
        let active = r.flag("activo");
        r.finish(Self {
            provider_id,
            name,
            description,
            kind,
            price,
            currency,
            capacity,
            active,
        })
    }

    fn to_form(&self, _zone: &FixedOffset) -> FormValues {
        FormValues::new()
            .with("id_proveedor", self.provider_id.clone())
            .with("nombre", self.name.clone())
            .with("descripcion", self.description.clone())
            .with("tipo", self.kind.code())
            .with("precio", self.price.to_string())
            .with("moneda", self.currency.clone())
            .with("capacidad", self.capacity.to_string())
            .with("activo", flag_input(self.active))
    }

    fn defaults(_now: DateTime<FixedOffset>) -> FormValues {
        FormValues::new()
            .with("tipo", "tour")
            .with("precio", "0")
            .with("moneda", "COP")
            .with("capacidad", "0")
            .with("activo", "true")
    }
}
