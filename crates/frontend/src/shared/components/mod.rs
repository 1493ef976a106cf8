pub mod bar_chart;
pub mod form_fields;
pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;
