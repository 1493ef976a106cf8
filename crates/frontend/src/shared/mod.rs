pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod credentials;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod section;
