//! HTTP client for the `/cats` endpoints of the record service.
//!
//! Every call is bounded by the configured timeout, and failures are
//! classified into [`EditorError`] variants: transport problems become
//! `Network`, non-success statuses become `Server` (or `NotFound` for a 404
//! on a single cat), and bodies that are not the expected JSON become
//! `Decode`.

use std::time::Duration;

use async_trait::async_trait;
use catmander_db::models::cat::{Cat, CreateCat, UpdateCat};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::source::CatSource;

/// HTTP client for the record service.
#[derive(Clone)]
pub struct CatClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CatClient {
    /// Create a client for the service at `base_url`, e.g.
    /// `http://localhost:9090/api/v1`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, timeout)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across editors).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    /// `GET /cats`, optionally filtered by adoption status.
    pub async fn list(&self, is_adopted: Option<bool>) -> Result<Vec<Cat>, EditorError> {
        let mut url = self.cats_url(None)?;
        if let Some(flag) = is_adopted {
            url.query_pairs_mut()
                .append_pair("isAdopted", if flag { "true" } else { "false" });
        }
        self.execute(self.client.get(url), None).await
    }

    /// `GET /cats/{id}`.
    pub async fn get(&self, id: &str) -> Result<Cat, EditorError> {
        let url = self.cats_url(Some(id))?;
        self.execute(self.client.get(url), Some(id)).await
    }

    /// `POST /cats`.
    pub async fn create(&self, input: &CreateCat) -> Result<Cat, EditorError> {
        let url = self.cats_url(None)?;
        self.execute(self.client.post(url).json(input), None).await
    }

    /// `PUT /cats/{id}` with only the fields present in `changes`.
    pub async fn update(&self, id: &str, changes: &UpdateCat) -> Result<Cat, EditorError> {
        let url = self.cats_url(Some(id))?;
        self.execute(self.client.put(url).json(changes), Some(id)).await
    }

    /// `DELETE /cats/{id}`. Returns the removed cat, or `None` if there was
    /// nothing to delete.
    pub async fn delete(&self, id: &str) -> Result<Option<Cat>, EditorError> {
        let url = self.cats_url(Some(id))?;
        self.execute(self.client.delete(url), None).await
    }

    // ---- private helpers ----

    /// Build `{base}/cats` or `{base}/cats/{id}`, percent-encoding the id.
    fn cats_url(&self, id: Option<&str>) -> Result<Url, EditorError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            EditorError::Network(format!("invalid base URL '{}': {e}", self.base_url))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                EditorError::Network(format!("base URL '{}' cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().push("cats");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// Send a request and decode its JSON body, all within `self.timeout`.
    ///
    /// `not_found_id` names the cat a 404 refers to; without it a 404 is an
    /// ordinary server error.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        not_found_id: Option<&str>,
    ) -> Result<T, EditorError> {
        let exchange = async {
            let response = request.send().await.map_err(|e| self.transport_error(e))?;
            let response = Self::ensure_success(response, not_found_id).await?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.transport_error(e))?;
            serde_json::from_slice::<T>(&bytes).map_err(|e| EditorError::Decode(e.to_string()))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(EditorError::Timeout(self.timeout)),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> EditorError {
        if err.is_timeout() {
            EditorError::Timeout(self.timeout)
        } else {
            EditorError::Network(err.to_string())
        }
    }

    /// Return the response unchanged on a success status, or the matching
    /// error carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
        not_found_id: Option<&str>,
    ) -> Result<reqwest::Response, EditorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = not_found_id {
                return Err(EditorError::NotFound { id: id.to_string() });
            }
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(EditorError::Server {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CatSource for CatClient {
    async fn fetch(&self, id: &str) -> Result<Cat, EditorError> {
        self.get(id).await
    }

    async fn update(&self, id: &str, changes: &UpdateCat) -> Result<Cat, EditorError> {
        CatClient::update(self, id, changes).await
    }
}
