use super::aggregate::{Trip, TripPayload, TripStatus};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, group_counts, monthly_trend, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{format_currency, format_datetime_long, PlaceholderLabel, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, Utc};

fn display_or_dash(dt: Option<&DateTime<Utc>>, zone: &FixedOffset) -> String {
    dt.map(|dt| format_datetime_long(dt, zone)).unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripRow {
    pub id: String,
    pub route_id: String,
    pub route_label: PlaceholderLabel,
    pub driver: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub starts_at_display: String,
    pub ends_at_display: String,
    pub capacity: i64,
    pub price: f64,
    pub price_display: String,
    pub status: TripStatus,
    pub status_label: &'static str,
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_display: String,
}

impl TripRow {
    pub fn new(t: &Trip, zone: &FixedOffset) -> Self {
        Self {
            id: t.id.clone(),
            route_id: t.route_id.clone(),
            route_label: PlaceholderLabel::new("Ruta", &t.route_id),
            driver: t.driver.clone(),
            starts_at: t.starts_at,
            starts_at_display: display_or_dash(t.starts_at.as_ref(), zone),
            ends_at_display: display_or_dash(t.ends_at.as_ref(), zone),
            capacity: t.capacity,
            price: t.price,
            price_display: format_currency(t.price, "COP"),
            status: t.status,
            status_label: t.status.label(),
            created_at: t.created_at,
            created_at_display: display_or_dash(t.created_at.as_ref(), zone),
        }
    }
}

impl Searchable for TripRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.driver.as_str(),
            self.route_label.as_str(),
            self.status_label,
            self.starts_at_display.as_str(),
        ]
    }
}

impl ExcelExportable for TripRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Ruta",
            "Conductor",
            "Inicio",
            "Fin",
            "Capacidad",
            "Precio",
            "Estado",
            "Fecha de creación",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.route_label.to_string(),
            self.driver.clone(),
            self.starts_at_display.clone(),
            self.ends_at_display.clone(),
            self.capacity.to_string(),
            self.price_display.clone(),
            self.status_label.to_string(),
            self.created_at_display.clone(),
        ]
    }
}

impl DisplayRecord for TripRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Ruta", "Conductor", "Inicio", "Capacidad", "Precio", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.route_label.to_string(),
            self.driver.clone(),
            self.starts_at_display.clone(),
            self.capacity.to_string(),
            self.price_display.clone(),
            self.status_label.to_string(),
        ]
    }
}

impl Entity for Trip {
    type Payload = TripPayload;
    type Row = TripRow;

    const RESOURCE: &'static str = "viajes";
    const SINGULAR: &'static str = "Viaje";
    const PLURAL: &'static str = "viajes";
    const GENDER: Gender = Gender::Masculine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> TripRow {
        TripRow::new(self, zone)
    }

    fn to_payload(&self) -> TripPayload {
        TripPayload {
            route_id: self.route_id.clone(),
            driver: self.driver.clone(),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            capacity: self.capacity,
            price: self.price,
            status: self.status,
        }
    }

    fn stat_cards(rows: &[TripRow]) -> Vec<StatItem> {
        let total = rows.len();
        let scheduled = count_where(rows, |r| r.status == TripStatus::Programado);
        let in_progress = count_where(rows, |r| r.status == TripStatus::EnCurso);
        let cancelled = count_where(rows, |r| r.status == TripStatus::Cancelado);
        vec![
            StatItem::count("Total de viajes", "truck", total),
            StatItem::share("Programados", "calendar", scheduled, total)
                .with_status(IndicatorStatus::Neutral),
            StatItem::share("En curso", "navigation", in_progress, total)
                .with_status(IndicatorStatus::Good),
            StatItem::share("Cancelados", "x", cancelled, total).with_status(IndicatorStatus::Bad),
        ]
    }

    fn charts(rows: &[TripRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        let statuses: Vec<(TripStatus, &str)> =
            TripStatus::ALL.iter().map(|s| (*s, s.label())).collect();
        [
            Chart::new("Viajes por mes de salida", monthly_trend(rows, now, |r| r.starts_at)),
            Chart::new("Viajes por estado", group_counts(rows, &statuses, |r| r.status)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};

    fn trip(status: TripStatus, month: u32) -> Trip {
        Trip {
            id: format!("v-{month}"),
            route_id: "1b9d6bcd-bbfd-4b2d-9b5d-ab8dfbbd4bed".into(),
            driver: "Luisa Gómez".into(),
            starts_at: Some(Utc.with_ymd_and_hms(2024, month, 2, 6, 0, 0).unwrap()),
            ends_at: None,
            capacity: 20,
            price: 45000.0,
            status,
            created_at: None,
        }
    }

    #[test]
    fn test_row_labels() {
        let row = trip(TripStatus::EnCurso, 5).to_row(&Utc.fix());
        assert_eq!(row.route_label.as_str(), "Ruta-fbbd4bed");
        assert_eq!(row.status_label, "En curso");
        assert_eq!(row.price_display, "45.000 COP");
        assert_eq!(row.starts_at_display, "2 de mayo de 2024, 06:00");
        assert_eq!(row.ends_at_display, "-");
        assert!(row.matches_filter("luisa"));
        assert!(row.matches_filter("en curso"));
    }

    #[test]
    fn test_row_shows_local_wall_clock() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let row = trip(TripStatus::Programado, 5).to_row(&bogota);
        assert_eq!(row.starts_at_display, "2 de mayo de 2024, 01:00");
    }

    #[test]
    fn test_status_chart_and_cards() {
        let rows: Vec<TripRow> = [
            trip(TripStatus::Programado, 6),
            trip(TripStatus::Programado, 6),
            trip(TripStatus::Cancelado, 4),
        ]
        .iter()
        .map(|e| e.to_row(&Utc.fix()))
        .collect();
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap().fixed_offset();
        let summary = Trip::summarize(&rows, now);
        let [trend, statuses] = &summary.charts;
        assert_eq!(trend.buckets[5].count, 2);
        assert_eq!(trend.buckets[3].count, 1);
        let counts: Vec<usize> = statuses.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 0, 0, 1]);
        assert_eq!(summary.cards[1].subtitle.as_deref(), Some("66,7% del total"));
    }
}
