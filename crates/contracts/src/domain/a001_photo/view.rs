use super::aggregate::{Photo, PhotoPayload};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, monthly_trend, top_counts, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{active_label, format_datetime_long, PlaceholderLabel, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRow {
    pub id: String,
    pub service_id: String,
    pub service_label: PlaceholderLabel,
    pub url: String,
    pub description: String,
    pub order: i64,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub uploaded_at_display: String,
    pub active: bool,
}

impl PhotoRow {
    pub fn new(p: &Photo, zone: &FixedOffset) -> Self {
        Self {
            id: p.id.clone(),
            service_id: p.service_id.clone(),
            service_label: PlaceholderLabel::new("Servicio", &p.service_id),
            url: p.url.clone(),
            description: p.description.clone(),
            order: p.order,
            uploaded_at: p.uploaded_at,
            uploaded_at_display: p
                .uploaded_at
                .as_ref()
                .map(|dt| format_datetime_long(dt, zone))
                .unwrap_or_else(|| "-".to_string()),
            active: p.active,
        }
    }
}

impl Searchable for PhotoRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.description.as_str(),
            self.service_label.as_str(),
            self.url.as_str(),
        ]
    }
}

impl ExcelExportable for PhotoRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Servicio", "Descripción", "URL", "Orden", "Fecha de subida", "Estado"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.service_label.to_string(),
            self.description.clone(),
            self.url.clone(),
            self.order.to_string(),
            self.uploaded_at_display.clone(),
            active_label(self.active).to_string(),
        ]
    }
}

impl DisplayRecord for PhotoRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Orden", "Descripción", "Servicio", "Fecha de subida", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.order.to_string(),
            self.description.clone(),
            self.service_label.to_string(),
            self.uploaded_at_display.clone(),
            active_label(self.active).to_string(),
        ]
    }
}

impl Entity for Photo {
    type Payload = PhotoPayload;
    type Row = PhotoRow;

    const RESOURCE: &'static str = "fotos";
    const SINGULAR: &'static str = "Foto";
    const PLURAL: &'static str = "fotos";
    const GENDER: Gender = Gender::Feminine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> PhotoRow {
        PhotoRow::new(self, zone)
    }

    fn to_payload(&self) -> PhotoPayload {
        PhotoPayload {
            service_id: self.service_id.clone(),
            url: self.url.clone(),
            description: self.description.clone(),
            order: self.order,
            uploaded_at: self.uploaded_at,
            active: self.active,
        }
    }

    fn stat_cards(rows: &[PhotoRow]) -> Vec<StatItem> {
        let total = rows.len();
        let active = count_where(rows, |r| r.active);
        let services: HashSet<&str> = rows.iter().map(|r| r.service_id.as_str()).collect();
        vec![
            StatItem::count("Total de fotos", "image", total),
            StatItem::share("Activas", "check", active, total).with_status(IndicatorStatus::Good),
            StatItem::share("Inactivas", "x", total - active, total)
                .with_status(IndicatorStatus::Warning),
            StatItem::count("Servicios con fotos", "layers", services.len()),
        ]
    }

    fn charts(rows: &[PhotoRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        [
            Chart::new("Fotos subidas por mes", monthly_trend(rows, now, |r| r.uploaded_at)),
            Chart::new(
                "Fotos por servicio (top 5)",
                top_counts(rows, 5, |r| r.service_label.to_string()),
            ),
        ]
    }
}
