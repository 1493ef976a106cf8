//! REST client for one entity resource.
//!
//! Every call builds its URL from `Endpoint`, attaches the bearer token read
//! from the credential source and turns non-2xx responses into `ApiError`.

use crate::config::config;
use crate::shared::credentials::{CookieCredentials, CredentialSource};
use contracts::domain::common::Entity;
use contracts::shared::endpoint::{Endpoint, HttpMethod};
use contracts::shared::pagination::{PageQuery, PaginatedResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use std::marker::PhantomData;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Builds a status error, pulling `detail` or `message` out of a JSON error body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["detail", "message", "error"].iter().find_map(|key| {
                    v.get(key)
                        .map(|d| d.as_str().map(str::to_string).unwrap_or_else(|| d.to_string()))
                })
            })
            .unwrap_or_else(|| body.trim().to_string());
        ApiError::Status { status, detail }
    }

    /// Message shown to the user. Raw details stay in the console log.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status: 401 | 403, .. } => {
                "Su sesión no es válida o expiró. Inicie sesión nuevamente.".to_string()
            }
            ApiError::Status { status: 404, .. } => {
                "El registro no existe o ya fue eliminado.".to_string()
            }
            ApiError::Status { status: 400 | 409 | 422, .. } => {
                "El servidor rechazó los datos enviados.".to_string()
            }
            ApiError::Status { status, .. } if *status >= 500 => {
                "Error del servidor. Intente de nuevo más tarde.".to_string()
            }
            ApiError::Status { .. } => "No se pudo completar la operación.".to_string(),
            ApiError::Network(_) => "No se pudo conectar con el servidor.".to_string(),
            ApiError::Decode(_) => {
                "La respuesta del servidor no tiene el formato esperado.".to_string()
            }
            ApiError::Encode(_) => "No se pudo preparar la solicitud.".to_string(),
        }
    }
}

pub struct EntityClient<E> {
    base_url: String,
    credentials: Arc<dyn CredentialSource + Send + Sync>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityClient<E> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            credentials: Arc::clone(&self.credentials),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityClient<E> {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialSource + Send + Sync>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            _entity: PhantomData,
        }
    }

    /// Client for the configured API base, reading the token from cookies.
    pub fn from_config() -> Self {
        Self::new(
            config().api_base_url.clone(),
            Arc::new(CookieCredentials::from_config()),
        )
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => {
                log::warn!("no auth token cookie found, sending {} request without it", E::RESOURCE);
                builder
            }
        }
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let url = endpoint.url(&self.base_url, E::RESOURCE);
        let method = endpoint.method();
        log::debug!("{} {}", method.as_str(), url);

        let builder = match method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
        };
        let builder = self.authorize(builder).header("Accept", "application/json");
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &text));
        }
        Ok(response)
    }

    pub async fn list(&self, query: PageQuery) -> Result<PaginatedResponse<E>, ApiError> {
        let response = self.send(&Endpoint::List(query), None).await?;
        let mut page: PaginatedResponse<E> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if page.size == 0 {
            page.page = query.page;
            page.size = query.size;
        }
        Ok(page)
    }

    pub async fn get(&self, id: &str) -> Result<E, ApiError> {
        let response = self.send(&Endpoint::Get(id.to_string()), None).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn create(&self, payload: &E::Payload) -> Result<(), ApiError> {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send(&Endpoint::Create, Some(&body)).await?;
        Ok(())
    }

    pub async fn update(&self, id: &str, payload: &E::Payload) -> Result<(), ApiError> {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send(&Endpoint::Update(id.to_string()), Some(&body)).await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.send(&Endpoint::Delete(id.to_string()), None).await?;
        Ok(())
    }

    /// First `size` records, used by summaries and the export.
    pub async fn list_all(&self, size: usize) -> Result<Vec<E>, ApiError> {
        Ok(self.list(PageQuery::first(size)).await?.items)
    }
}
