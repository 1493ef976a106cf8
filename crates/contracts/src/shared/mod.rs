pub mod aggregation;
pub mod debounce;
pub mod endpoint;
pub mod export;
pub mod form;
pub mod formatting;
pub mod indicators;
pub mod list_view;
pub mod pagination;
pub mod search;
pub mod validation;
pub mod wire;
