//! Access to the bearer token used by every API call.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Source of the bearer token. Read on every request, never cached.
pub trait CredentialSource {
    fn token(&self) -> Option<String>;
}

/// Reads the token from `document.cookie`, trying each name in order.
#[derive(Debug, Clone)]
pub struct CookieCredentials {
    names: Vec<String>,
}

impl CookieCredentials {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::config().token_cookie_names.clone())
    }
}

impl CredentialSource for CookieCredentials {
    fn token(&self) -> Option<String> {
        let cookies = document_cookie()?;
        self.names
            .iter()
            .find_map(|name| parse_cookie(&cookies, name))
    }
}

fn document_cookie() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()
}

/// Value of cookie `name` in a `document.cookie` string. Empty values count as missing.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_picks_exact_name() {
        let cookies = "theme=dark; my_token=nope; token=abc.def.ghi";
        assert_eq!(parse_cookie(cookies, "token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(cookies, "access_token"), None);
    }

    #[test]
    fn test_parse_cookie_decodes_value() {
        assert_eq!(parse_cookie("token=a%2Bb%3D", "token").as_deref(), Some("a+b="));
    }

    #[test]
    fn test_parse_cookie_ignores_empty_values() {
        assert_eq!(parse_cookie("access_token=; token=x", "access_token"), None);
        assert_eq!(parse_cookie("", "token"), None);
    }
}
