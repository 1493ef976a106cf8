use crate::shared::form::{flag_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::FieldErrors;
use crate::shared::wire::opt_datetime;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "id_ruta")]
    pub id: String,
    #[serde(rename = "id_proveedor", default)]
    pub provider_id: String,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "distancia_km", default)]
    pub distance_km: f64,
    #[serde(rename = "duracion_minutos", default)]
    pub duration_minutes: i64,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePayload {
    #[serde(rename = "id_proveedor")]
    pub provider_id: String,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "distancia_km")]
    pub distance_km: f64,
    #[serde(rename = "duracion_minutos")]
    pub duration_minutes: i64,
    #[serde(rename = "activo")]
    pub active: bool,
}

const FIELDS: &[FormField] = &[
    FormField::new("id_proveedor", "ID del proveedor", FieldKind::Text),
    FormField::new("origen", "Origen", FieldKind::Text),
    FormField::new("destino", "Destino", FieldKind::Text),
    FormField::new("distancia_km", "Distancia (km)", FieldKind::Number),
    FormField::new("duracion_minutos", "Duración (minutos)", FieldKind::Number),
    FormField::new("activo", "Activa", FieldKind::Checkbox),
];

impl FormModel for RoutePayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let provider_id = r.uuid("id_proveedor");
        let origin = r.text("origen", 3);
        let destination = r.text("destino", 3);
        if !destination.is_empty() && origin.to_lowercase() == destination.to_lowercase() {
            r.error("destino", "El destino debe ser distinto del origen");
        }
        let distance_km = r.number("distancia_km", 0.0, None);
        let duration_minutes = r.int("duracion_minutos", 0, None);
        let active = r.flag("activo");
        r.finish(Self {
            provider_id,
            origin,
            destination,
            distance_km,
            duration_minutes,
            active,
        })
    }

    fn to_form(&self, _zone: &FixedOffset) -> FormValues {
        FormValues::new()
            .with("id_proveedor", self.provider_id.clone())
            .with("origen", self.origin.clone())
            .with("destino", self.destination.clone())
            .with("distancia_km", self.distance_km.to_string())
            .with("duracion_minutos", self.duration_minutes.to_string())
            .with("activo", flag_input(self.active))
    }

    fn defaults(_now: DateTime<FixedOffset>) -> FormValues {
        FormValues::new()
            .with("distancia_km", "0")
            .with("duracion_minutos", "0")
            .with("activo", "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormValues {
        FormValues::new()
            .with("id_proveedor", "9b2c1d7e-4f3a-4c8b-9d2e-1a2b3c4d5e6f")
            .with("origen", "Bogotá")
            .with("destino", "Villa de Leyva")
            .with("distancia_km", "165.5")
            .with("duracion_minutos", "210")
            .with("activo", "true")
    }

    #[test]
    fn test_valid_route() {
        let payload = RoutePayload::from_form(&valid_form(), Utc::now().fixed_offset()).unwrap();
        assert_eq!(payload.distance_km, 165.5);
        assert_eq!(payload.duration_minutes, 210);
    }

    #[test]
    fn test_negative_measures_and_same_endpoints() {
        let form = valid_form()
            .with("distancia_km", "-0.5")
            .with("duracion_minutos", "-10")
            .with("destino", "BOGOTÁ");
        let errors = RoutePayload::from_form(&form, Utc::now().fixed_offset()).unwrap_err();
        assert_eq!(errors.get("distancia_km"), Some("No puede ser negativo"));
        assert_eq!(errors.get("duracion_minutos"), Some("No puede ser negativo"));
        assert_eq!(errors.get("destino"), Some("El destino debe ser distinto del origen"));
    }
}
