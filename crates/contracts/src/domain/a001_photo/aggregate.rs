use crate::shared::form::{datetime_input, flag_input, FieldKind, FormField, FormModel, FormReader, FormValues};
use crate::shared::validation::FieldErrors;
use crate::shared::wire::opt_datetime;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Foto de un servicio, tal como la entrega `fotos/listar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(rename = "id_foto")]
    pub id: String,
    #[serde(rename = "id_servicio")]
    pub service_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "orden", default)]
    pub order: i64,
    #[serde(rename = "fecha_subida", default, deserialize_with = "opt_datetime")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// Body of `fotos/crear` and `fotos/editar/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoPayload {
    #[serde(rename = "id_servicio")]
    pub service_id: String,
    pub url: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "orden")]
    pub order: i64,
    /// Always set by `from_form`; `None` only for records the API sent without one.
    #[serde(rename = "fecha_subida")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(rename = "activo")]
    pub active: bool,
}

const FIELDS: &[FormField] = &[
    FormField::new("id_servicio", "ID del servicio", FieldKind::Text),
    FormField::new("url", "URL de la imagen", FieldKind::Text),
    FormField::new("descripcion", "Descripción", FieldKind::TextArea),
    FormField::new("orden", "Orden", FieldKind::Number),
    FormField::new("fecha_subida", "Fecha de subida", FieldKind::DateTime),
    FormField::new("activo", "Activa", FieldKind::Checkbox),
];

impl FormModel for PhotoPayload {
    fn fields() -> &'static [FormField] {
        FIELDS
    }

    fn from_form(values: &FormValues, now: DateTime<FixedOffset>) -> Result<Self, FieldErrors> {
        let mut r = FormReader::new(values, *now.offset());
        let service_id = r.uuid("id_servicio");
        let url = r.image_url("url");
        let description = r.text("descripcion", 5);
        let order = r.int("orden", 0, None);
        let uploaded_at = r.datetime("fecha_subida");
        if uploaded_at.is_some_and(|at| at > now) {
            r.error("fecha_subida", "La fecha de subida no puede ser futura");
        }
        let active = r.flag("activo");
        r.finish(Self {
            service_id,
            url,
            description,
            order,
            uploaded_at,
            active,
        })
    }

    fn to_form(&self, zone: &FixedOffset) -> FormValues {
        FormValues::new()
            .with("id_servicio", self.service_id.clone())
            .with("url", self.url.clone())
            .with("descripcion", self.description.clone())
            .with("orden", self.order.to_string())
            .with(
                "fecha_subida",
                self.uploaded_at
                    .map(|at| datetime_input(&at, zone))
                    .unwrap_or_default(),
            )
            .with("activo", flag_input(self.active))
    }

    fn defaults(now: DateTime<FixedOffset>) -> FormValues {
        FormValues::new()
            .with("orden", "0")
            .with("fecha_subida", datetime_input(&now.with_timezone(&Utc), now.offset()))
            .with("activo", "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Entity;
    use crate::shared::endpoint::{Endpoint, HttpMethod};
    use crate::shared::form::{prepare_save, FormMode};
    use crate::shared::list_view::ListViewController;
    use crate::shared::pagination::{PageQuery, PaginatedResponse};
    use chrono::{Offset, TimeZone};

    fn now() -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap().fixed_offset()
    }

    fn valid_form() -> FormValues {
        FormValues::new()
            .with("id_servicio", "123e4567-e89b-12d3-a456-426614174000")
            .with("url", "https://cdn.example.com/fotos/piscina.jpg")
            .with("descripcion", "Piscina principal del hotel")
            .with("orden", "0")
            .with("fecha_subida", "2024-06-01T10:00")
            .with("activo", "true")
    }

    #[test]
    fn test_negative_order_is_rejected_without_request() {
        let form = valid_form().with("orden", "-1");
        let result = prepare_save::<PhotoPayload>(Photo::RESOURCE, &FormMode::Create, &form, now());
        let errors = result.unwrap_err();
        assert_eq!(errors.get("orden"), Some("No puede ser negativo"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_zero_order_posts_and_refreshes_everything() {
        let (payload, request) =
            prepare_save::<PhotoPayload>(Photo::RESOURCE, &FormMode::Create, &valid_form(), now())
                .unwrap();
        assert_eq!(payload.order, 0);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.endpoint, Endpoint::Create);
        assert_eq!(request.path, "/fotos/crear");
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["orden"], 0);
        assert_eq!(body["id_servicio"], "123e4567-e89b-12d3-a456-426614174000");

        let mut ctrl = ListViewController::<crate::domain::a001_photo::view::PhotoRow>::new(10);
        let t = ctrl.begin_fetch(PageQuery::first(10));
        ctrl.apply_page(t, PaginatedResponse { items: vec![], total: 0, page: 0, size: 10 });
        let plan = ctrl.after_mutation();
        assert_eq!(plan.page, PageQuery::first(10));
        assert!(plan.stats);
        assert!(plan.charts);
    }

    #[test]
    fn test_edit_uses_put_on_editar() {
        let (_, request) = prepare_save::<PhotoPayload>(
            Photo::RESOURCE,
            &FormMode::Edit("f-1".into()),
            &valid_form(),
            now(),
        )
        .unwrap();
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.endpoint, Endpoint::Update("f-1".into()));
        assert_eq!(request.path, "/fotos/editar/f-1");
    }

    #[test]
    fn test_field_rules() {
        let form = valid_form()
            .with("id_servicio", "servicio-1")
            .with("url", "https://x.com/a.txt")
            .with("descripcion", "Foto")
            .with("fecha_subida", "2024-07-01T10:00");
        let errors = PhotoPayload::from_form(&form, now()).unwrap_err();
        assert!(errors.contains("id_servicio"));
        assert!(errors.contains("url"));
        assert!(errors.contains("descripcion"));
        assert_eq!(errors.get("fecha_subida"), Some("La fecha de subida no puede ser futura"));
    }

    #[test]
    fn test_form_round_trip_for_edit() {
        let payload = PhotoPayload::from_form(&valid_form(), now()).unwrap();
        let again = PhotoPayload::from_form(&payload.to_form(&Utc.fix()), now()).unwrap();
        assert_eq!(payload, again);
    }

    #[test]
    fn test_upload_date_is_read_in_the_users_zone() {
        // 09:30 UTC is 04:30 in Bogotá; 08:00 local is still in the future there
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let local_now = now().with_timezone(&bogota);
        let form = valid_form().with("fecha_subida", "2024-06-10T08:00");
        let errors = PhotoPayload::from_form(&form, local_now).unwrap_err();
        assert_eq!(errors.get("fecha_subida"), Some("La fecha de subida no puede ser futura"));

        let payload =
            PhotoPayload::from_form(&form.with("fecha_subida", "2024-06-10T04:00"), local_now).unwrap();
        assert_eq!(payload.uploaded_at, Some(Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()));
        assert_eq!(
            PhotoPayload::defaults(local_now).get("fecha_subida"),
            "2024-06-10T04:30"
        );
    }

    #[test]
    fn test_record_without_upload_date_prefills_empty_and_is_required() {
        let json = r#"{"id_foto":"f1","id_servicio":"123e4567-e89b-12d3-a456-426614174000","url":"https://x.com/a.png","descripcion":"Vista al mar"}"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        let form = photo.to_payload().to_form(&Utc.fix());
        assert_eq!(form.get("fecha_subida"), "");
        let errors = PhotoPayload::from_form(&form, now()).unwrap_err();
        assert_eq!(errors.get("fecha_subida"), Some("Debe ingresar una fecha y hora válidas"));
    }

    #[test]
    fn test_wire_record_defaults() {
        let json = r#"{"id_foto":"f1","id_servicio":"s1","url":"https://x.com/a.png"}"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        assert!(photo.active);
        assert_eq!(photo.order, 0);
        assert!(photo.uploaded_at.is_none());
    }
}
