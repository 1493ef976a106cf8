use crate::shared::form::{date_input, flag_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::FieldErrors;
use crate::shared::wire::{date, opt_datetime};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Fecha restringida para un servicio: bloqueo total o disponibilidad parcial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRestriction {
    #[serde(rename = "id_restriccion")]
    pub id: String,
    #[serde(rename = "id_servicio")]
    pub service_id: String,
    #[serde(rename = "fecha", deserialize_with = "date")]
    pub date: NaiveDate,
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "bloqueado", default)]
    pub blocked: bool,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRestrictionPayload {
    #[serde(rename = "id_servicio")]
    pub service_id: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "bloqueado")]
    pub blocked: bool,
    #[serde(rename = "activo")]
    pub active: bool,
}

const FIELDS: &[FormField] = &[
    FormField::new("id_servicio", "ID del servicio", FieldKind::Text),
    FormField::new("fecha", "Fecha", FieldKind::Date),
    FormField::new("motivo", "Motivo", FieldKind::TextArea),
    FormField::new("bloqueado", "Bloqueo total", FieldKind::Checkbox),
    FormField::new("activo", "Activa", FieldKind::Checkbox),
];

impl FormModel for DateRestrictionPayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let service_id = r.uuid("id_servicio");
        let today = now.date_naive();
        let date = r.date("fecha").unwrap_or(today);
        if date < today {
            r.error("fecha", "La fecha no puede estar en el pasado");
        }
        let reason = r.text("motivo", 10);
        let blocked = r.flag("bloqueado");
        let active = r.flag("activo");
        r.finish(Self {
            service_id,
            date,
            reason,
            blocked,
            active,
        })
    }

    fn to_form(&self, _zone: &FixedOffset) -> FormValues {
        FormValues::new()
            .with("id_servicio", self.service_id.clone())
            .with("fecha", date_input(&self.date))
            .with("motivo", self.reason.clone())
            .with("bloqueado", flag_input(self.blocked))
            .with("activo", flag_input(self.active))
    }

    fn defaults(now: DateTime<FixedOffset>) -> FormValues {
        FormValues::new()
            .with("fecha", date_input(&now.date_naive()))
            .with("bloqueado", "true")
            .with("activo", "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap().fixed_offset()
    }

    fn valid_form() -> FormValues {
        FormValues::new()
            .with("id_servicio", "123e4567-e89b-12d3-a456-426614174000")
            .with("fecha", "2024-12-24")
            .with("motivo", "Temporada alta de Navidad")
            .with("bloqueado", "true")
            .with("activo", "true")
    }

    #[test]
    fn test_today_is_allowed_yesterday_is_not() {
        assert!(DateRestrictionPayload::from_form(&valid_form().with("fecha", "2024-06-10"), now()).is_ok());
        let errors = DateRestrictionPayload::from_form(&valid_form().with("fecha", "2024-06-09"), now())
            .unwrap_err();
        assert_eq!(errors.get("fecha"), Some("La fecha no puede estar en el pasado"));
    }

    #[test]
    fn test_today_is_the_users_local_date() {
        // 01:00 UTC on the 11th is still the evening of the 10th in Bogotá
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 6, 11, 1, 0, 0).unwrap().with_timezone(&bogota);
        let form = valid_form().with("fecha", "2024-06-10");
        assert!(DateRestrictionPayload::from_form(&form, evening).is_ok());
        assert_eq!(DateRestrictionPayload::defaults(evening).get("fecha"), "2024-06-10");
    }

    #[test]
    fn test_reason_and_service_rules() {
        let form = valid_form()
            .with("motivo", "Cierre")
            .with("id_servicio", "no-es-uuid");
        let errors = DateRestrictionPayload::from_form(&form, now()).unwrap_err();
        assert_eq!(errors.get("motivo"), Some("Debe tener al menos 10 caracteres"));
        assert_eq!(errors.get("id_servicio"), Some("Debe ser un UUID válido"));
    }

    #[test]
    fn test_wire_date_forms() {
        let json = r#"{"id_restriccion":"r1","id_servicio":"s1","fecha":"2024-12-24T00:00:00Z","motivo":"Temporada alta"}"#;
        let rec: DateRestriction = serde_json::from_str(json).unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 12, 24).unwrap());
        assert!(!rec.blocked);
        assert!(rec.active);

        let payload = DateRestrictionPayload::from_form(&valid_form(), now()).unwrap();
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["fecha"], "2024-12-24");
    }
}
