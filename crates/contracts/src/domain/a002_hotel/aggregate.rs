use crate::shared::form::{flag_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::FieldErrors;
use crate::shared::wire::opt_datetime;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

pub const DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("NIT", "NIT"),
    ("CC", "Cédula de ciudadanía"),
    ("CE", "Cédula de extranjería"),
    ("PAS", "Pasaporte"),
];

/// Proveedor dueño del hotel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "id_proveedor", default)]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "tipo_documento", default)]
    pub document_type: String,
    #[serde(rename = "numero_documento", default)]
    pub document_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: String,
}

/// Hotel con su proveedor, tal como lo entrega `hoteles/listar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(rename = "id_hotel")]
    pub id: String,
    #[serde(rename = "id_proveedor", default)]
    pub provider_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estrellas", default)]
    pub stars: u8,
    #[serde(rename = "ciudad", default)]
    pub city: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    #[serde(rename = "direccion", default)]
    pub address: String,
    #[serde(rename = "habitaciones", default)]
    pub rooms: i64,
    #[serde(rename = "verificado", default)]
    pub verified: bool,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "proveedor", default)]
    pub provider: Option<Provider>,
}

/// Body of `hoteles/crear` / `hoteles/editar/:id`: the hotel and its provider in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estrellas")]
    pub stars: u8,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "habitaciones")]
    pub rooms: i64,
    #[serde(rename = "verificado")]
    pub verified: bool,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "proveedor")]
    pub provider: Provider,
}

const FIELDS: &[FormField] = &[
    FormField::new("nombre", "Nombre del hotel", FieldKind::Text),
    FormField::new("estrellas", "Estrellas (1-5)", FieldKind::Number),
    FormField::new("ciudad", "Ciudad", FieldKind::Text),
    FormField::new("departamento", "Departamento", FieldKind::Text),
    FormField::new("direccion", "Dirección", FieldKind::Text),
    FormField::new("habitaciones", "Habitaciones", FieldKind::Number),
    FormField::new("verificado", "Verificado", FieldKind::Checkbox),
    FormField::new("activo", "Activo", FieldKind::Checkbox),
    FormField::new("proveedor_nombre", "Proveedor", FieldKind::Text),
    FormField::new("proveedor_tipo_documento", "Tipo de documento", FieldKind::Select(DOCUMENT_TYPES)),
    FormField::new("proveedor_numero_documento", "Número de documento", FieldKind::Text),
    FormField::new("proveedor_email", "Correo del proveedor", FieldKind::Text),
    FormField::new("proveedor_telefono", "Teléfono del proveedor", FieldKind::Text),
];

impl FormModel for HotelPayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let name = r.text("nombre", 3);
        let stars = r.int("estrellas", 1, Some(5));
        let city = r.text("ciudad", 2);
        let department = r.text("departamento", 2);
        let address = r.text("direccion", 5);
        let rooms = r.int("habitaciones", 0, None);
        let verified = r.flag("verificado");
        let active = r.flag("activo");

        let provider_name = r.text("proveedor_nombre", 3);
        let document_type = r.choice("proveedor_tipo_documento", DOCUMENT_TYPES);
        let document_number = r.text("proveedor_numero_documento", 5);
        if !document_number.is_empty()
            && !document_number.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            r.error(
                "proveedor_numero_documento",
                "Solo se permiten letras, números y guiones",
            );
        }
        let email = r.email("proveedor_email");
        let phone = r.phone("proveedor_telefono");

        r.finish(Self {
            name,
            stars: stars.clamp(1, 5) as u8,
            city,
            department,
            address,
            rooms,
            verified,
            active,
            provider: Provider {
                id: String::new(),
                name: provider_name,
                document_type,
                document_number,
                email,
                phone,
            },
        })
    }

    fn to_form(&self, _zone: &FixedOffset) -> FormValues {
        FormValues::new()
            .with("nombre", self.name.clone())
            .with("estrellas", self.stars.to_string())
            .with("ciudad", self.city.clone())
            .with("departamento", self.department.clone())
            .with("direccion", self.address.clone())
            .with("habitaciones", self.rooms.to_string())
            .with("verificado", flag_input(self.verified))
            .with("activo", flag_input(self.active))
            .with("proveedor_nombre", self.provider.name.clone())
            .with("proveedor_tipo_documento", self.provider.document_type.clone())
            .with("proveedor_numero_documento", self.provider.document_number.clone())
            .with("proveedor_email", self.provider.email.clone())
            .with("proveedor_telefono", self.provider.phone.clone())
    }

    fn defaults(_now: DateTime<FixedOffset>) -> FormValues {
        FormValues::new()
            .with("estrellas", "3")
            .with("habitaciones", "0")
            .with("activo", "true")
            .with("proveedor_tipo_documento", "NIT")
    }
}
