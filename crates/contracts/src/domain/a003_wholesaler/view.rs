use super::aggregate::{Wholesaler, WholesalerPayload};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, group_counts, monthly_trend, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{active_label, format_datetime_long, format_percent, location, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommissionBand {
    UpTo5,
    UpTo10,
    UpTo20,
    Above20,
}

const COMMISSION_BANDS: [(CommissionBand, &str); 4] = [
    (CommissionBand::UpTo5, "0-5%"),
    (CommissionBand::UpTo10, "5-10%"),
    (CommissionBand::UpTo20, "10-20%"),
    (CommissionBand::Above20, ">20%"),
];

fn band(commission: f64) -> CommissionBand {
    if commission <= 5.0 {
        CommissionBand::UpTo5
    } else if commission <= 10.0 {
        CommissionBand::UpTo10
    } else if commission <= 20.0 {
        CommissionBand::UpTo20
    } else {
        CommissionBand::Above20
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WholesalerRow {
    pub id: String,
    pub name: String,
    pub nit: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub commission: f64,
    pub commission_display: String,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_display: String,
}

impl WholesalerRow {
    pub fn new(w: &Wholesaler, zone: &FixedOffset) -> Self {
        Self {
            id: w.id.clone(),
            name: w.name.clone(),
            nit: w.nit.clone(),
            email: w.email.clone(),
            phone: w.phone.clone(),
            location: location(&w.city, &w.department),
            commission: w.commission,
            commission_display: format_percent(w.commission),
            active: w.active,
            created_at: w.created_at,
            created_at_display: w
                .created_at
                .as_ref()
                .map(|dt| format_datetime_long(dt, zone))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl Searchable for WholesalerRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.nit.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.location.as_str(),
        ]
    }
}

impl ExcelExportable for WholesalerRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Razón social",
            "NIT",
            "Correo",
            "Teléfono",
            "Ubicación",
            "Comisión",
            "Estado",
            "Fecha de creación",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.nit.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.location.clone(),
            self.commission_display.clone(),
            active_label(self.active).to_string(),
            self.created_at_display.clone(),
        ]
    }
}

impl DisplayRecord for WholesalerRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Razón social", "NIT", "Correo", "Ubicación", "Comisión", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.nit.clone(),
            self.email.clone(),
            self.location.clone(),
            self.commission_display.clone(),
            active_label(self.active).to_string(),
        ]
    }
}

impl Entity for Wholesaler {
    type Payload = WholesalerPayload;
    type Row = WholesalerRow;

    const RESOURCE: &'static str = "mayorista";
    const SINGULAR: &'static str = "Mayorista";
    const PLURAL: &'static str = "mayoristas";
    const GENDER: Gender = Gender::Masculine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> WholesalerRow {
        WholesalerRow::new(self, zone)
    }

    fn to_payload(&self) -> WholesalerPayload {
        WholesalerPayload {
            name: self.name.clone(),
            nit: self.nit.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            city: self.city.clone(),
            department: self.department.clone(),
            commission: self.commission,
            active: self.active,
        }
    }

    fn stat_cards(rows: &[WholesalerRow]) -> Vec<StatItem> {
        let total = rows.len();
        let active = count_where(rows, |r| r.active);
        let avg_commission = if total == 0 {
            0.0
        } else {
            rows.iter().map(|r| r.commission).sum::<f64>() / total as f64
        };
        vec![
            StatItem::count("Total de mayoristas", "users", total),
            StatItem::share("Activos", "check", active, total).with_status(IndicatorStatus::Good),
            StatItem::share("Inactivos", "x", total - active, total)
                .with_status(IndicatorStatus::Warning),
            StatItem::percent("Comisión promedio", "percent", avg_commission),
        ]
    }

    fn charts(rows: &[WholesalerRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        [
            Chart::new("Mayoristas registrados por mes", monthly_trend(rows, now, |r| r.created_at)),
            Chart::new(
                "Mayoristas por comisión",
                group_counts(rows, &COMMISSION_BANDS, |r| band(r.commission)),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;

    fn wholesaler(name: &str, commission: f64, active: bool) -> Wholesaler {
        Wholesaler {
            id: format!("m-{name}"),
            name: name.to_string(),
            nit: "900123456-7".into(),
            email: "ventas@ejemplo.co".into(),
            phone: "3001234567".into(),
            city: "Cartagena".into(),
            department: "Bolívar".into(),
            commission,
            active,
            created_at: None,
        }
    }

    #[test]
    fn test_row_display_fields() {
        let row = wholesaler("Caribe Tours", 7.5, true).to_row(&Utc.fix());
        assert_eq!(row.commission_display, "7,5%");
        assert_eq!(row.location, "Cartagena, Bolívar");
        assert!(row.matches_filter("caribe"));
        assert!(row.matches_filter("bolívar"));
    }

    #[test]
    fn test_commission_bands() {
        let rows: Vec<WholesalerRow> = [0.0, 5.0, 7.0, 15.0, 30.0, 25.0]
            .iter()
            .map(|c| wholesaler("x", *c, true).to_row(&Utc.fix()))
            .collect();
        let [_, bands] = Wholesaler::charts(&rows, Utc::now().fixed_offset());
        let counts: Vec<usize> = bands.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 2]);
    }

    #[test]
    fn test_average_commission_empty_is_zero() {
        let cards = Wholesaler::stat_cards(&[]);
        assert_eq!(cards[3].value, 0.0);
        let rows = vec![wholesaler("a", 10.0, true).to_row(&Utc.fix()), wholesaler("b", 20.0, false).to_row(&Utc.fix())];
        let cards = Wholesaler::stat_cards(&rows);
        assert_eq!(cards[1].value, 1.0);
        assert_eq!(cards[3].value, 15.0);
    }
}
