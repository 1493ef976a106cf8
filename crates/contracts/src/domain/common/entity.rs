use crate::shared::aggregation::Chart;
use crate::shared::export::ExcelExportable;
use crate::shared::form::FormModel;
use crate::shared::formatting::Gender;
use crate::shared::indicators::StatItem;
use crate::shared::search::Searchable;
use chrono::{DateTime, FixedOffset};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// A display record: wire record plus derived, UI-only fields.
pub trait DisplayRecord: Searchable + ExcelExportable {
    fn id(&self) -> &str;

    /// Headers of the table columns.
    fn table_columns() -> Vec<&'static str>;

    /// Cells in the order of `table_columns`.
    fn table_cells(&self) -> Vec<String>;
}

/// `(label, value)` pairs shown by the detail modal.
pub fn details_of<R: DisplayRecord>(row: &R) -> Vec<(&'static str, String)> {
    R::headers().into_iter().zip(row.to_csv_row()).collect()
}

/// Cards and charts of a section, computed from one full fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub cards: Vec<StatItem>,
    pub charts: [Chart; 2],
}

/// One entity section: wire shape, form payload, display record and summaries.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Create/update payload.
    type Payload: FormModel + Serialize + Clone + Debug + Send + Sync + 'static;
    type Row: DisplayRecord + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Path segment of the REST resource (`fotos`, `hoteles`, ...).
    const RESOURCE: &'static str;
    /// "Foto"
    const SINGULAR: &'static str;
    /// "fotos"
    const PLURAL: &'static str;
    /// Participles in messages agree with it ("fotos registradas").
    const GENDER: Gender;

    fn id(&self) -> &str;

    /// View-model mapper. Pure; timestamps are displayed in `zone`.
    fn to_row(&self, zone: &FixedOffset) -> Self::Row;

    /// Payload used to prefill the edit form.
    fn to_payload(&self) -> Self::Payload;

    fn stat_cards(rows: &[Self::Row]) -> Vec<StatItem>;

    /// The section's two bar charts: monthly trend first, then a categorical split.
    fn charts(rows: &[Self::Row], now: DateTime<FixedOffset>) -> [Chart; 2];

    fn summarize(rows: &[Self::Row], now: DateTime<FixedOffset>) -> Summary {
        Summary {
            cards: Self::stat_cards(rows),
            charts: Self::charts(rows, now),
        }
    }
}
