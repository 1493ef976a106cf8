//! Client configuration, resolved once at startup.
//!
//! Values come from build-time environment variables when set and fall back
//! to defaults that match the dashboard's usual deployment.

use crate::shared::api_utils::api_base;
use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash.
    pub api_base_url: String,
    /// Cookie names tried in order when looking for the bearer token.
    pub token_cookie_names: Vec<String>,
    pub search_debounce_ms: u32,
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Rows loaded when a search starts, so the filter sees more than one page.
    pub search_page_size: usize,
    /// Rows fetched to compute stat cards, charts and the export.
    pub summary_page_size: usize,
    pub log_level: log::Level,
}

pub static CONFIG: Lazy<ClientConfig> = Lazy::new(ClientConfig::from_env);

impl ClientConfig {
    fn from_env() -> Self {
        let api_base_url = option_env!("TOURISM_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(api_base);
        let token_cookie_names = option_env!("TOURISM_TOKEN_COOKIES")
            .map(parse_cookie_names)
            .unwrap_or_else(|| vec!["access_token".to_string(), "token".to_string()]);
        let log_level = option_env!("TOURISM_LOG_LEVEL")
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::Level::Debug);

        Self {
            api_base_url,
            token_cookie_names,
            search_debounce_ms: 400,
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            search_page_size: 500,
            summary_page_size: 1000,
            log_level,
        }
    }
}

/// `"access_token, token"` -> `["access_token", "token"]`
fn parse_cookie_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn config() -> &'static ClientConfig {
    &CONFIG
}
