// src/api/client.rs

//! JSON GET client with bearer auth and error normalization.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;
use crate::utils::http;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(AppError::config("API URL is not set"));
        }
        Ok(Self {
            client: http::create_client(config)?,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/articles/`.
    pub fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// URL for one item of a collection such as `/articles/`. The id is
    /// escaped as a single path segment.
    pub fn item_endpoint(&self, collection: &str, id: &str) -> Result<Url> {
        if matches!(id, "." | "..") {
            return Err(AppError::validation(format!("invalid id '{id}'")));
        }
        let mut url = self.endpoint(collection, &[])?;
        url.path_segments_mut()
            .map_err(|_| AppError::config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(id)
            .push("");
        Ok(url)
    }

    /// GET `path` with query `params` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.fetch(self.endpoint(path, params)?).await
    }

    /// GET one item of `collection` by id.
    pub async fn get_item<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<T> {
        self.fetch(self.item_endpoint(collection, id)?).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        log::debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(token) = self.access_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("GET {} rejected: unauthorized", url);
            return Err(AppError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = http::error_message(status, &body);
        log::warn!("GET {} failed with {}: {}", url, status, message);
        Err(AppError::api(status.as_u16(), message))
    }
}
