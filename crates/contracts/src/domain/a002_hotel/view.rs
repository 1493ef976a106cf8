use super::aggregate::{Hotel, HotelPayload};
use crate::domain::common::{DisplayRecord, Entity};
use crate::shared::aggregation::{count_where, group_counts, monthly_trend, Chart};
use crate::shared::export::ExcelExportable;
use crate::shared::formatting::{active_label, format_datetime_long, location, yes_no, PlaceholderLabel, Gender};
use crate::shared::indicators::{IndicatorStatus, StatItem};
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset, Utc};

const STAR_BUCKETS: [(u8, &str); 5] = [(1, "1★"), (2, "2★"), (3, "3★"), (4, "4★"), (5, "5★")];

#[derive(Debug, Clone, PartialEq)]
pub struct HotelRow {
    pub id: String,
    pub name: String,
    pub stars: u8,
    pub stars_display: String,
    pub location: String,
    pub address: String,
    pub rooms: i64,
    pub verified: bool,
    pub active: bool,
    /// Provider name when the API embeds it, placeholder label otherwise.
    pub provider_name: String,
    pub provider_document: String,
    pub provider_contact: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_at_display: String,
}

impl HotelRow {
    pub fn new(h: &Hotel, zone: &FixedOffset) -> Self {
        let provider = h.provider.clone().unwrap_or_default();
        let provider_name = if provider.name.trim().is_empty() {
            PlaceholderLabel::new("Proveedor", &h.provider_id).to_string()
        } else {
            provider.name.clone()
        };
        let provider_document = if provider.document_number.is_empty() {
            String::new()
        } else {
            format!("{} {}", provider.document_type, provider.document_number)
                .trim()
                .to_string()
        };
        Self {
            id: h.id.clone(),
            name: h.name.clone(),
            stars: h.stars,
            stars_display: "★".repeat(h.stars.min(5) as usize),
            location: location(&h.city, &h.department),
            address: h.address.clone(),
            rooms: h.rooms,
            verified: h.verified,
            active: h.active,
            provider_name,
            provider_document,
            provider_contact: [provider.email.as_str(), provider.phone.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" · "),
            created_at: h.created_at,
            created_at_display: h
                .created_at
                .as_ref()
                .map(|dt| format_datetime_long(dt, zone))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl Searchable for HotelRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.location.as_str(),
            self.address.as_str(),
            self.provider_name.as_str(),
            self.provider_document.as_str(),
        ]
    }
}

impl ExcelExportable for HotelRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "Hotel",
            "Estrellas",
            "Ubicación",
            "Dirección",
            "Habitaciones",
            "Verificado",
            "Estado",
            "Proveedor",
            "Documento",
            "Contacto",
            "Fecha de creación",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.stars.to_string(),
            self.location.clone(),
            self.address.clone(),
            self.rooms.to_string(),
            yes_no(self.verified).to_string(),
            active_label(self.active).to_string(),
            self.provider_name.clone(),
            self.provider_document.clone(),
            self.provider_contact.clone(),
            self.created_at_display.clone(),
        ]
    }
}

impl DisplayRecord for HotelRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn table_columns() -> Vec<&'static str> {
        vec!["Hotel", "Estrellas", "Ubicación", "Proveedor", "Verificado", "Estado"]
    }

    fn table_cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.stars_display.clone(),
            self.location.clone(),
            self.provider_name.clone(),
            yes_no(self.verified).to_string(),
            active_label(self.active).to_string(),
        ]
    }
}

impl Entity for Hotel {
    type Payload = HotelPayload;
    type Row = HotelRow;

    const RESOURCE: &'static str = "hoteles";
    const SINGULAR: &'static str = "Hotel";
    const PLURAL: &'static str = "hoteles";
    const GENDER: Gender = Gender::Masculine;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_row(&self, zone: &FixedOffset) -> HotelRow {
        HotelRow::new(self, zone)
    }

    fn to_payload(&self) -> HotelPayload {
        let mut provider = self.provider.clone().unwrap_or_default();
        if provider.id.is_empty() {
            provider.id = self.provider_id.clone();
        }
        HotelPayload {
            name: self.name.clone(),
            stars: self.stars,
            city: self.city.clone(),
            department: self.department.clone(),
            address: self.address.clone(),
            rooms: self.rooms,
            verified: self.verified,
            active: self.active,
            provider,
        }
    }

    fn stat_cards(rows: &[HotelRow]) -> Vec<StatItem> {
        let total = rows.len();
        let verified = count_where(rows, |r| r.verified);
        let active = count_where(rows, |r| r.active);
        let rooms: i64 = rows.iter().map(|r| r.rooms.max(0)).sum();
        vec![
            StatItem::count("Total de hoteles", "building", total),
            StatItem::share("Activos", "check", active, total).with_status(IndicatorStatus::Good),
            StatItem::share("Verificados", "shield", verified, total)
                .with_status(IndicatorStatus::Good),
            StatItem::count("Habitaciones", "bed", rooms as usize),
        ]
    }

    fn charts(rows: &[HotelRow], now: DateTime<FixedOffset>) -> [Chart; 2] {
        [
            Chart::new("Hoteles registrados por mes", monthly_trend(rows, now, |r| r.created_at)),
            Chart::new(
                "Hoteles por categoría",
                group_counts(rows, &STAR_BUCKETS, |r| r.stars),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Offset;
    use crate::domain::a002_hotel::aggregate::Provider;
    use crate::shared::list_view::{EmptyState, ListViewController};
    use crate::shared::pagination::{PageQuery, PaginatedResponse};

    fn hotel(name: &str, city: &str, stars: u8, provider: Option<Provider>) -> Hotel {
        Hotel {
            id: format!("h-{name}"),
            provider_id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            name: name.to_string(),
            stars,
            city: city.to_string(),
            department: "Antioquia".to_string(),
            address: "Cra 1".to_string(),
            rooms: 10,
            verified: stars >= 4,
            active: true,
            created_at: None,
            provider,
        }
    }

    #[test]
    fn test_provider_placeholder_when_not_embedded() {
        let row = hotel("Sol", "Medellín", 3, None).to_row(&Utc.fix());
        assert_eq!(row.provider_name, "Proveedor-14174000");
        assert_eq!(row.location, "Medellín, Antioquia");
        assert_eq!(row.stars_display, "★★★");
        assert_eq!(row.created_at_display, "-");
    }

    #[test]
    fn test_embedded_provider_is_used() {
        let provider = Provider {
            id: "p1".into(),
            name: "Hoteles del Sur SAS".into(),
            document_type: "NIT".into(),
            document_number: "900555".into(),
            email: "a@b.co".into(),
            phone: "3001234567".into(),
        };
        let row = hotel("Sol", "Medellín", 3, Some(provider)).to_row(&Utc.fix());
        assert_eq!(row.provider_name, "Hoteles del Sur SAS");
        assert_eq!(row.provider_document, "NIT 900555");
        assert_eq!(row.provider_contact, "a@b.co · 3001234567");
        assert!(row.matches_filter("900555"));
    }

    #[test]
    fn test_star_chart_has_five_buckets() {
        let rows: Vec<HotelRow> = [5, 5, 4, 1]
            .iter()
            .map(|s| hotel("x", "y", *s, None).to_row(&Utc.fix()))
            .collect();
        let [trend, stars] = Hotel::charts(&rows, Utc::now().fixed_offset());
        assert_eq!(trend.buckets.len(), 6);
        let counts: Vec<usize> = stars.buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1, 2]);
        assert_eq!(stars.bar_widths()[4], 100.0);

        let cards = Hotel::stat_cards(&rows);
        assert_eq!(cards[2].value, 3.0);
        assert_eq!(cards[3].value, 40.0);
    }

    #[test]
    fn test_search_villa_without_matches_shows_no_matches_state() {
        let mut ctrl = ListViewController::<HotelRow>::new(10).with_search_page_size(500);
        let t = ctrl.begin_fetch(PageQuery::first(10));
        let rows = vec![
            hotel("Hotel Central", "Bogotá", 3, None).to_row(&Utc.fix()),
            hotel("Casa del Mar", "Santa Marta", 4, None).to_row(&Utc.fix()),
        ];
        ctrl.apply_page(t, PaginatedResponse { items: rows, total: 2, page: 0, size: 10 });

        let widen = ctrl.set_search("villa").expect("widens the loaded set");
        let t = ctrl.begin_fetch(widen);
        ctrl.apply_page(
            t,
            PaginatedResponse {
                items: vec![
                    hotel("Hotel Central", "Bogotá", 3, None).to_row(&Utc.fix()),
                    hotel("Casa del Mar", "Santa Marta", 4, None).to_row(&Utc.fix()),
                ],
                total: 2,
                page: 0,
                size: 500,
            },
        );

        assert!(ctrl.visible_items().is_empty());
        let state = ctrl.empty_state().expect("empty");
        assert_eq!(state, EmptyState::NoMatches("villa".to_string()));
        let msg = state.message(Hotel::PLURAL, Hotel::GENDER);
        assert_ne!(msg, EmptyState::Loading.message(Hotel::PLURAL, Hotel::GENDER));
        assert_ne!(msg, EmptyState::NoRecords.message(Hotel::PLURAL, Hotel::GENDER));
        assert_eq!(ctrl.total_items(), 0);
        assert_eq!(ctrl.total_pages(), 0);
    }
}
