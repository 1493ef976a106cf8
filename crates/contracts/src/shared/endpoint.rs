//! REST paths: `<base>/<resource>/<action>[/:id]`.

use crate::shared::pagination::PageQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One operation against an entity resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Create,
    List(PageQuery),
    Get(String),
    Update(String),
    Delete(String),
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::Create => HttpMethod::Post,
            Endpoint::List(_) | Endpoint::Get(_) => HttpMethod::Get,
            Endpoint::Update(_) => HttpMethod::Put,
            Endpoint::Delete(_) => HttpMethod::Delete,
        }
    }

    /// Path relative to the API base, without query string.
    pub fn path(&self, resource: &str) -> String {
        match self {
            Endpoint::Create => format!("/{resource}/crear"),
            Endpoint::List(_) => format!("/{resource}/listar"),
            Endpoint::Get(id) => format!("/{resource}/consultar/{}", encode_segment(id)),
            Endpoint::Update(id) => format!("/{resource}/editar/{}", encode_segment(id)),
            Endpoint::Delete(id) => format!("/{resource}/eliminar/{}", encode_segment(id)),
        }
    }

    /// Query string without the leading `?`, only for list calls.
    pub fn query(&self) -> Option<String> {
        match self {
            Endpoint::List(q) => serde_qs::to_string(q).ok(),
            _ => None,
        }
    }

    /// Path plus query string.
    pub fn url(&self, base: &str, resource: &str) -> String {
        let base = base.trim_end_matches('/');
        match self.query() {
            Some(q) => format!("{base}{}?{q}", self.path(resource)),
            None => format!("{base}{}", self.path(resource)),
        }
    }
}

fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_per_action() {
        assert_eq!(Endpoint::Create.path("fotos"), "/fotos/crear");
        assert_eq!(Endpoint::Get("abc".into()).path("hoteles"), "/hoteles/consultar/abc");
        assert_eq!(Endpoint::Update("abc".into()).path("rutas"), "/rutas/editar/abc");
        assert_eq!(Endpoint::Delete("abc".into()).path("viajes"), "/viajes/eliminar/abc");
        assert_eq!(Endpoint::Create.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Delete("x".into()).method().as_str(), "DELETE");
    }

    #[test]
    fn test_list_url_has_zero_based_page() {
        let url = Endpoint::List(PageQuery::new(0, 10)).url("https://api.example.com/", "mayorista");
        assert_eq!(url, "https://api.example.com/mayorista/listar?page=0&size=10");
    }

    #[test]
    fn test_ids_are_encoded() {
        assert_eq!(Endpoint::Get("a b/c".into()).path("fechas"), "/fechas/consultar/a%20b%2Fc");
    }
}
