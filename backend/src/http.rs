// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with API key and bearer token handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::BackendConfig;
use crate::error::BackendError;

/// HTTP client for the remote data service.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: BackendConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        if config.base_url.trim().is_empty() {
            return Err(BackendError::Config("base_url must not be empty".into()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Joins `path` onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Builds a request carrying the API key, authorized either by the user's
    /// access token or, when signed out, by the API key itself.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        let token = access_token.unwrap_or(&self.config.api_key);
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }

    /// Executes a request and maps HTTP failures to [`BackendError`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, BackendError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let url = resp.url().path().to_string();
        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        let message = error_message(&text);
        tracing::debug!(status = status.as_u16(), url, message, "request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(message),
            StatusCode::NOT_FOUND => BackendError::NotFound(url),
            status => BackendError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Extracts a human readable message from an error body.
///
/// The services answer with JSON objects using one of several keys depending
/// on the component (`message` for tables, `msg`/`error_description` for
/// auth, `error` for storage). Plain text bodies are returned unchanged.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map_or_else(|| body.trim().to_string(), ToString::to_string)
}
