use super::aggregate::{DateRestriction, DateRestrictionPayload};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, group_counts, monthly_trend, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{active_label, format_date_long, format_datetime_long, PlaceholderLabel, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

const KIND_BUCKETS: [(bool, &str); 2] = [(true, "Bloqueo total"), (false, "Parcial")];

fn kind_label(blocked: bool) -> &'static str {
    if blocked {
        "Bloqueo total"
    } else {
        "Parcial"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRestrictionRow {
    pub id: String,
    pub service_id: String,
    pub service_label: PlaceholderLabel,
    pub date: NaiveDate,
    pub date_display: String,
    pub reason: String,
    pub blocked: bool,
    pub kind: &'static str,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_display: String,
}

impl DateRestrictionRow {
    pub fn new(d: &DateRestriction, zone: &FixedOffset) -> Self {
        Self {
            id: d.id.clone(),
            service_id: d.service_id.clone(),
            service_label: PlaceholderLabel::new("Servicio", &d.service_id),
            date: d.date,
            date_display: format_date_long(d.date),
            reason: d.reason.clone(),
            blocked: d.blocked,
            kind: kind_label(d.blocked),
            active: d.active,
            created_at: d.created_at,
            created_at_display: d
                .created_at
                .as_ref()
                .map(|dt| format_datetime_long(dt, zone))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl Searchable for DateRestrictionRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.reason.as_str(),
            self.service_label.as_str(),
            self.date_display.as_str(),
            self.kind,
        ]
    }
}

impl ExcelExportable for DateRestrictionRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Servicio", "Fecha", "Motivo", "Tipo", "Estado", "Fecha de creación"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.service_label.to_string(),
            self.date_display.clone(),
            self.reason.clone(),
            self.kind.to_string(),
            active_label(self.active).to_string(),
            self.created_at_display.clone(),
        ]
    }
}

impl DisplayRecord for DateRestrictionRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Fecha", "Servicio", "Motivo", "Tipo", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.date_display.clone(),
            self.service_label.to_string(),
            self.reason.clone(),
            self.kind.to_string(),
            active_label(self.active).to_string(),
        ]
    }
}

impl Entity for DateRestriction {
    type Payload = DateRestrictionPayload;
    type Row = DateRestrictionRow;

    const RESOURCE: &'static str = "fechas";
    const SINGULAR: &'static str = "Fecha restringida";
    const PLURAL: &'static str = "fechas restringidas";
    const GENDER: Gender = Gender::Feminine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> DateRestrictionRow {
        DateRestrictionRow::new(self, zone)
    }

    fn to_payload(&self) -> DateRestrictionPayload {
        DateRestrictionPayload {
            service_id: self.service_id.clone(),
            date: self.date,
            reason: self.reason.clone(),
            blocked: self.blocked,
            active: self.active,
        }
    }

    fn stat_cards(rows: &[DateRestrictionRow]) -> Vec<StatItem> {
        let total = rows.len();
        let blocked = count_where(rows, |r| r.blocked);
        let active = count_where(rows, |r| r.active);
        vec![
            StatItem::count("Total de fechas", "calendar", total),
            StatItem::share("Bloqueo total", "lock", blocked, total)
                .with_status(IndicatorStatus::Bad),
            StatItem::share("Parciales", "clock", total - blocked, total)
                .with_status(IndicatorStatus::Warning),
            StatItem::share("Activas", "check", active, total).with_status(IndicatorStatus::Good),
        ]
    }

    fn charts(rows: &[DateRestrictionRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        [
            Chart::new("Restricciones creadas por mes", monthly_trend(rows, now, |r| r.created_at)),
            Chart::new("Tipo de restricción", group_counts(rows, &KIND_BUCKETS, |r| r.blocked)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;

    fn restriction(blocked: bool, reason: &str) -> DateRestriction {
        DateRestriction {
            id: "r-1".into(),
            service_id: "123e4567-e89b-12d3-a456-426614174000".into(),
            date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            reason: reason.into(),
            blocked,
            active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_row_fields() {
        let row = restriction(false, "Mantenimiento de la piscina").to_row(&Utc.fix());
        assert_eq!(row.date_display, "31 de diciembre de 2024");
        assert_eq!(row.kind, "Parcial");
        assert_eq!(row.service_label.as_str(), "Servicio-14174000");
        assert!(row.matches_filter("diciembre"));
        assert!(row.matches_filter("PISCINA"));
    }

    #[test]
    fn test_blocked_vs_partial_chart_keeps_both_buckets() {
        let rows = vec![restriction(true, "Año nuevo completo").to_row(&Utc.fix())];
        let [_, kinds] = DateRestriction::charts(&rows, Utc::now().fixed_offset());
        assert_eq!(kinds.buckets.len(), 2);
        assert_eq!(kinds.buckets[0].count, 1);
        assert_eq!(kinds.buckets[1].count, 0);
        assert_eq!(kinds.bar_widths(), vec![100.0, 0.0]);
    }
}
