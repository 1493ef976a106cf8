use crate::shared::form::{datetime_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::{parse_local_datetime, FieldErrors};
use crate::shared::wire::opt_datetime;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Programado,
    EnCurso,
    Finalizado,
    Cancelado,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        TripStatus::Programado,
        TripStatus::EnCurso,
        TripStatus::Finalizado,
        TripStatus::Cancelado,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TripStatus::Programado => "programado",
            TripStatus::EnCurso => "en_curso",
            TripStatus::Finalizado => "finalizado",
            TripStatus::Cancelado => "cancelado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Programado => "Programado",
            TripStatus::EnCurso => "En curso",
            TripStatus::Finalizado => "Finalizado",
            TripStatus::Cancelado => "Cancelado",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
}

pub const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("programado", "Programado"),
    ("en_curso", "En curso"),
    ("finalizado", "Finalizado"),
    ("cancelado", "Cancelado"),
];

/// Viaje programado sobre una ruta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "id_viaje")]
    pub id: String,
    #[serde(rename = "id_ruta", default)]
    pub route_id: String,
    #[serde(rename = "conductor", default)]
    pub driver: String,
    #[serde(rename = "fecha_inicio", default, deserialize_with = "opt_datetime")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_fin", default, deserialize_with = "opt_datetime")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(rename = "capacidad", default)]
    pub capacity: i64,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "estado", default)]
    pub status: TripStatus,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPayload {
    #[serde(rename = "id_ruta")]
    pub route_id: String,
    #[serde(rename = "conductor")]
    pub driver: String,
    /// Always set by `from_form`; `None` only for records the API sent without one.
    #[serde(rename = "fecha_inicio")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(rename = "fecha_fin")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(rename = "capacidad")]
    pub capacity: i64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "estado")]
    pub status: TripStatus,
}

const FIELDS: &[FormField] = &[
    FormField::new("id_ruta", "ID de la ruta", FieldKind::Text),
    FormField::new("conductor", "Conductor", FieldKind::Text),
    FormField::new("fecha_inicio", "Inicio", FieldKind::DateTime),
    FormField::new("fecha_fin", "Fin", FieldKind::DateTime),
    FormField::new("capacidad", "Capacidad", FieldKind::Number),
    FormField::new("precio", "Precio (COP)", FieldKind::Number),
    FormField::new("estado", "Estado", FieldKind::Select(STATUS_OPTIONS)),
];

impl FormModel for TripPayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let route_id = r.uuid("id_ruta");
        let driver = r.text("conductor", 3);
        let starts_at = r.datetime("fecha_inicio");
        let ends_at = r.datetime("fecha_fin");
        if let (Some(start), Some(end)) = (starts_at, ends_at) {
            if end <= start {
                r.error("fecha_fin", "La fecha de fin debe ser posterior al inicio");
            }
        }
        let capacity = r.int("capacidad", 1, None);
        let price = r.number("precio", 0.0, None);
        let status = TripStatus::from_code(&r.choice("estado", STATUS_OPTIONS)).unwrap_or_default();
        r.finish(Self {
            route_id,
            driver,
            starts_at,
            ends_at,
            capacity,
            price,
            status,
        })
    }

    fn to_form(&self, zone: &FixedOffset) -> FormValues {
        let input = |at: Option<DateTime<Utc>>| at.map(|at| datetime_input(&at, zone)).unwrap_or_default();
        FormValues::new()
            .with("id_ruta", self.route_id.clone())
            .with("conductor", self.driver.clone())
            .with("fecha_inicio", input(self.starts_at))
            .with("fecha_fin", input(self.ends_at))
            .with("capacidad", self.capacity.to_string())
            .with("precio", self.price.to_string())
            .with("estado", self.status.code())
    }

    fn defaults(now: DateTime<FixedOffset>) -> FormValues {
        let start = now.with_timezone(&Utc) + Duration::days(1);
        let zone = now.offset();
        FormValues::new()
            .with("fecha_inicio", datetime_input(&start, zone))
            .with("fecha_fin", datetime_input(&(start + Duration::hours(4)), zone))
            .with("capacidad", "1")
            .with("precio", "0")
            .with("estado", "programado")
    }

    /// Past start dates are kept when editing a trip that already happened.
    fn create_rules(values: &FormValues, now: DateTime<FixedOffset>, errors: &mut FieldErrors) {
        // datetime-local inputs carry no seconds; compare at minute precision.
        let floor = now - Duration::seconds(59);
        if let Ok(start) = parse_local_datetime(values.get("fecha_inicio"), now.offset()) {
            if start < floor {
                errors.add("fecha_inicio", "La fecha de inicio no puede estar en el pasado");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form::{prepare_save, FormMode};
    use crate::shared::endpoint::HttpMethod;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap().fixed_offset()
    }

    fn valid_form() -> FormValues {
        FormValues::new()
            .with("id_ruta", "1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed")
            .with("conductor", "Carlos Pérez")
            .with("fecha_inicio", "2024-06-15T07:00")
            .with("fecha_fin", "2024-06-15T11:30")
            .with("capacidad", "30")
            .with("precio", "85000")
            .with("estado", "programado")
    }

    #[test]
    fn test_end_must_follow_start() {
        let form = valid_form().with("fecha_fin", "2024-06-15T07:00");
        let errors = TripPayload::from_form(&form, now()).unwrap_err();
        assert_eq!(errors.get("fecha_fin"), Some("La fecha de fin debe ser posterior al inicio"));
    }

    #[test]
    fn test_capacity_at_least_one() {
        let errors = TripPayload::from_form(&valid_form().with("capacidad", "0"), now()).unwrap_err();
        assert_eq!(errors.get("capacidad"), Some("Debe ser mayor o igual a 1"));
    }

    #[test]
    fn test_past_start_only_rejected_on_create() {
        let form = valid_form()
            .with("fecha_inicio", "2024-06-01T07:00")
            .with("fecha_fin", "2024-06-01T11:00")
            .with("estado", "finalizado");

        let errors = prepare_save::<TripPayload>("viajes", &FormMode::Create, &form, now()).unwrap_err();
        assert_eq!(
            errors.get("fecha_inicio"),
            Some("La fecha de inicio no puede estar en el pasado")
        );

        let (payload, request) =
            prepare_save::<TripPayload>("viajes", &FormMode::Edit("v-9".into()), &form, now()).unwrap();
        assert_eq!(payload.status, TripStatus::Finalizado);
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.path, "/viajes/editar/v-9");
        assert_eq!(serde_json::to_value(&payload).unwrap()["estado"], "finalizado");
    }

    #[test]
    fn test_create_errors_are_merged_with_field_errors() {
        let form = valid_form()
            .with("fecha_inicio", "2024-06-01T07:00")
            .with("conductor", "");
        let errors = prepare_save::<TripPayload>("viajes", &FormMode::Create, &form, now()).unwrap_err();
        assert!(errors.contains("fecha_inicio"));
        assert!(errors.contains("conductor"));
    }

    #[test]
    fn test_current_minute_counts_as_not_past() {
        let form = valid_form().with("fecha_inicio", "2024-06-10T09:30");
        assert!(prepare_save::<TripPayload>("viajes", &FormMode::Create, &form, now()).is_ok());
    }

    #[test]
    fn test_start_later_today_is_not_past_in_the_users_zone() {
        // 14:00 UTC is 09:00 in Bogotá
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let local_now = Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap().with_timezone(&bogota);
        let form = valid_form()
            .with("fecha_inicio", "2024-06-10T11:00")
            .with("fecha_fin", "2024-06-10T15:00");
        let (payload, _) =
            prepare_save::<TripPayload>("viajes", &FormMode::Create, &form, local_now).unwrap();
        assert_eq!(payload.starts_at, Some(Utc.with_ymd_and_hms(2024, 6, 10, 16, 0, 0).unwrap()));

        let early = form.with("fecha_inicio", "2024-06-10T08:00");
        let errors = prepare_save::<TripPayload>("viajes", &FormMode::Create, &early, local_now).unwrap_err();
        assert!(errors.contains("fecha_inicio"));
    }

    #[test]
    fn test_defaults_start_tomorrow_in_local_time() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let local_now = Utc.with_ymd_and_hms(2024, 6, 11, 2, 15, 0).unwrap().with_timezone(&bogota);
        let form = TripPayload::defaults(local_now);
        assert_eq!(form.get("fecha_inicio"), "2024-06-11T21:15");
        assert_eq!(form.get("fecha_fin"), "2024-06-12T01:15");
    }

    #[test]
    fn test_status_wire_codes() {
        let json = r#"{"id_viaje":"v1","id_ruta":"r1","conductor":"Ana","estado":"en_curso","fecha_inicio":"2024-06-15T07:00:00Z"}"#;
        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.status, TripStatus::EnCurso);
        assert!(trip.ends_at.is_none());
        for (code, label) in STATUS_OPTIONS {
            assert_eq!(TripStatus::from_code(code).map(|s| s.label()), Some(*label));
        }
    }
}
