use super::aggregate::{Service, ServicePayload, ServiceType};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, group_counts, monthly_trend, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{active_label, format_currency, format_datetime_long, PlaceholderLabel, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRow {
    pub id: String,
    pub provider_id: String,
    pub provider_label: PlaceholderLabel,
    pub name: String,
    pub description: String,
    pub kind: ServiceType,
    pub kind_label: &'static str,
    pub price: f64,
    pub currency: String,
    pub price_display: String,
    pub capacity: i64,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_display: String,
}

impl ServiceRow {
    pub fn new(s: &Service, zone: &FixedOffset) -> Self {
        Self {
            id: s.id.clone(),
            provider_id: s.provider_id.clone(),
            provider_label: PlaceholderLabel::new("Proveedor", &s.provider_id),
            name: s.name.clone(),
            description: s.description.clone(),
            kind: s.kind,
            kind_label: s.kind.label(),
            price: s.price,
            currency: s.currency.clone(),
            price_display: format_currency(s.price, &s.currency),
            capacity: s.capacity,
            active: s.active,
            created_at: s.created_at,
            created_at_display: s
                .created_at
                .as_ref()
                .map(|dt| format_datetime_long(dt, zone))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl Searchable for ServiceRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.kind_label,
            self.provider_label.as_str(),
        ]
    }
}

impl ExcelExportable for ServiceRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Nombre",
            "Descripción",
            "Tipo",
            "Precio",
            "Capacidad",
            "Proveedor",
            "Estado",
            "Fecha de creación",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.description.clone(),
            self.kind_label.to_string(),
            self.price_display.clone(),
            self.capacity.to_string(),
            self.provider_label.to_string(),
            active_label(self.active).to_string(),
            self.created_at_display.clone(),
        ]
    }
}

impl DisplayRecord for ServiceRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Nombre", "Tipo", "Precio", "Capacidad", "Proveedor", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind_label.to_string(),
            self.price_display.clone(),
            self.capacity.to_string(),
            self.provider_label.to_string(),
            active_label(self.active).to_string(),
        ]
    }
}

impl Entity for Service {
    type Payload = ServicePayload;
    type Row = ServiceRow;

    const RESOURCE: &'static str = "servicios";
    const SINGULAR: &'static str = "Servicio";
    const PLURAL: &'static str = "servicios";
    const GENDER: Gender = Gender::Masculine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> ServiceRow {
        ServiceRow::new(self, zone)
    }

    fn to_payload(&self) -> ServicePayload {
        ServicePayload {
            provider_id: self.provider_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            price: self.price,
            currency: self.currency.clone(),
            capacity: self.capacity,
            active: self.active,
        }
    }

    fn stat_cards(rows: &[ServiceRow]) -> Vec<StatItem> {
        let total = rows.len();
        let active = count_where(rows, |r| r.active);
        // Prices in other currencies are not converted, so the average covers COP only.
        let cop: Vec<f64> = rows
            .iter()
            .filter(|r| r.currency == "COP")
            .map(|r| r.price)
            .collect();
        let avg_price = if cop.is_empty() {
            0.0
        } else {
            cop.iter().sum::<f64>() / cop.len() as f64
        };
        let capacity: i64 = rows.iter().map(|r| r.capacity.max(0)).sum();
        vec![
            StatItem::count("Total de servicios", "briefcase", total),
            StatItem::share("Activos", "check", active, total).with_status(IndicatorStatus::Good),
            StatItem::money("Precio promedio", "dollar", avg_price, "COP"),
            StatItem::count("Capacidad total", "users", capacity as usize),
        ]
    }

    fn charts(rows: &[ServiceRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        let kinds: Vec<(ServiceType, &str)> =
            ServiceType::ALL.iter().map(|t| (*t, t.label())).collect();
        [
            Chart::new("Servicios creados por mes", monthly_trend(rows, now, |r| r.created_at)),
            Chart::new("Servicios por tipo", group_counts(rows, &kinds, |r| r.kind)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;

    fn service(kind: ServiceType, price: f64, currency: &str) -> Service {
        Service {
            id: "s-1".into(),
            provider_id: "p-0000000000".into(),
            name: "Tour por la ciudad amurallada".into(),
            description: "Recorrido guiado a pie".into(),
            kind,
            price,
            currency: currency.into(),
            capacity: 20,
            active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_price_and_type_display() {
        let row = service(ServiceType::Alimentacion, 1_250_000.4, "COP").to_row(&Utc.fix());
        assert_eq!(row.price_display, "1.250.000 COP");
        assert_eq!(row.kind_label, "Alimentación");
        assert!(row.matches_filter("alimentación"));
        assert!(row.matches_filter("amurallada"));
    }

    #[test]
    fn test_average_price_ignores_other_currencies() {
        let rows = vec![
            service(ServiceType::Tour, 100_000.0, "COP").to_row(&Utc.fix()),
            service(ServiceType::Tour, 300_000.0, "COP").to_row(&Utc.fix()),
            service(ServiceType::Otro, 50.0, "USD").to_row(&Utc.fix()),
        ];
        let cards = Service::stat_cards(&rows);
        assert_eq!(cards[2].value, 200_000.0);
        assert_eq!(cards[3].value, 60.0);
    }

    #[test]
    fn test_type_chart_lists_every_type() {
        let rows = vec![service(ServiceType::Tour, 1.0, "COP").to_row(&Utc.fix())];
        let [_, kinds] = Service::charts(&rows, Utc::now().fixed_offset());
        let labels: Vec<&str> = kinds.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Alojamiento", "Transporte", "Tour", "Alimentación", "Otro"]
        );
        assert_eq!(kinds.buckets[2].count, 1);
    }
}
