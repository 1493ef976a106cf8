use super::aggregate::{Route, RoutePayload};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, group_counts, monthly_trend, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{active_label, format_datetime_long, format_thousands, PlaceholderLabel, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DistanceBand {
    Short,
    Medium,
    Long,
    VeryLong,
}

const DISTANCE_BANDS: [(DistanceBand, &str); 4] = [
    (DistanceBand::Short, "< 50 km"),
    (DistanceBand::Medium, "50-200 km"),
    (DistanceBand::Long, "200-500 km"),
    (DistanceBand::VeryLong, "> 500 km"),
];

fn band(km: f64) -> DistanceBand {
    if km < 50.0 {
        DistanceBand::Short
    } else if km < 200.0 {
        DistanceBand::Medium
    } else if km <= 500.0 {
        DistanceBand::Long
    } else {
        DistanceBand::VeryLong
    }
}

/// "3 h 30 min", "45 min", "2 h"
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

fn format_distance(km: f64) -> String {
    let whole = km.trunc() as i64;
    let tenths = ((km - km.trunc()) * 10.0).round() as i64;
    if tenths == 0 || tenths == 10 {
        format!("{} km", format_thousands(whole + tenths / 10))
    } else {
        format!("{},{} km", format_thousands(whole), tenths)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub id: String,
    pub provider_id: String,
    pub provider_label: PlaceholderLabel,
    pub origin: String,
    pub destination: String,
    /// "Bogotá → Tunja"
    pub path: String,
    pub distance_km: f64,
    pub distance_display: String,
    pub duration_minutes: i64,
    pub duration_display: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_display: String,
}

impl RouteRow {
    pub fn new(r: &Route, zone: &FixedOffset) -> Self {
        Self {
            id: r.id.clone(),
            provider_id: r.provider_id.clone(),
            provider_label: PlaceholderLabel::new("Proveedor", &r.provider_id),
            origin: r.origin.clone(),
            destination: r.destination.clone(),
            path: format!("{} → {}", r.origin, r.destination),
            distance_km: r.distance_km,
            distance_display: format_distance(r.distance_km),
            duration_minutes: r.duration_minutes,
            duration_display: format_duration(r.duration_minutes),
            active: r.active,
            created_at: r.created_at,
            created_at_display: r
                .created_at
                .as_ref()
                .map(|dt| format_datetime_long(dt, zone))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl Searchable for RouteRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.origin.as_str(),
            self.destination.as_str(),
            self.provider_label.as_str(),
        ]
    }
}

impl ExcelExportable for RouteRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Proveedor",
            "Origen",
            "Destino",
            "Distancia",
            "Duración",
            "Estado",
            "Fecha de creación",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.provider_label.to_string(),
            self.origin.clone(),
            self.destination.clone(),
            self.distance_display.clone(),
            self.duration_display.clone(),
            active_label(self.active).to_string(),
            self.created_at_display.clone(),
        ]
    }
}

impl DisplayRecord for RouteRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Ruta", "Distancia", "Duración", "Proveedor", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.path.clone(),
            self.distance_display.clone(),
            self.duration_display.clone(),
            self.provider_label.to_string(),
            active_label(self.active).to_string(),
        ]
    }
}

impl Entity for Route {
    type Payload = RoutePayload;
    type Row = RouteRow;

    const RESOURCE: &'static str = "rutas";
    const SINGULAR: &'static str = "Ruta";
    const PLURAL: &'static str = "rutas";
    const GENDER: Gender = Gender::Feminine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> RouteRow {
        RouteRow::new(self, zone)
    }

    fn to_payload(&self) -> RoutePayload {
        RoutePayload {
            provider_id: self.provider_id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            active: self.active,
        }
    }

    fn stat_cards(rows: &[RouteRow]) -> Vec<StatItem> {
        let total = rows.len();
        let active = count_where(rows, |r| r.active);
        let total_km: f64 = rows.iter().map(|r| r.distance_km.max(0.0)).sum();
        let avg_km = if total == 0 { 0.0 } else { total_km / total as f64 };
        vec![
            StatItem::count("Total de rutas", "map", total),
            StatItem::share("Activas", "check", active, total).with_status(IndicatorStatus::Good),
            StatItem::count("Kilómetros totales", "navigation", total_km.round() as usize),
            StatItem::count("Distancia promedio (km)", "ruler", avg_km.round() as usize),
        ]
    }

    fn charts(rows: &[RouteRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        [
            Chart::new("Rutas creadas por mes", monthly_trend(rows, now, |r| r.created_at)),
            Chart::new(
                "Rutas por distancia",
                group_counts(rows, &DISTANCE_BANDS, |r| band(r.distance_km)),
            ),
        ]
    }
}
