// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Table access over the REST endpoint.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::http::HttpClient;
use crate::query::Query;
use crate::types::Session;

const REST_PREFIX: &str = "rest/v1";

/// Client for the remote data service.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use studybuddy_backend::{BackendClient, BackendConfig, Query};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = BackendConfig {
///     base_url: "https://project.example.com".to_string(),
///     api_key: "anon-key".to_string(),
///     ..Default::default()
/// };
///
/// let client = BackendClient::new(config)?;
/// let session = client.sign_in("ada@example.com", "secret").await?;
/// let client = client.with_session(&session);
/// let rows: Vec<serde_json::Value> = client.select("exams", &Query::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    pub(crate) http: Arc<HttpClient>,
    pub(crate) access_token: Option<String>,
}

impl BackendClient {
    /// Creates a new client, not yet signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
            access_token: None,
        })
    }

    /// Returns a client whose requests are authorized as the session's user.
    #[must_use]
    pub fn with_session(&self, session: &Session) -> Self {
        Self {
            http: Arc::clone(&self.http),
            access_token: Some(session.access_token.clone()),
        }
    }

    /// Returns a client that only presents the API key.
    #[must_use]
    pub fn anonymous(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            access_token: None,
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        self.http.config()
    }

    /// Fetches the rows of `table` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the rows cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let req = self.request(Method::GET, table).query(&query.to_params());
        let resp = self.http.execute(req).await?;
        Ok(resp.json().await?)
    }

    /// Inserts one row and returns it as stored, including server defaults
    /// such as the generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns no row.
    pub async fn insert<R, T>(&self, table: &str, row: &R) -> Result<T, BackendError>
    where
        R: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(table, "inserting row");
        let req = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(row);
        let resp = self.http.execute(req).await?;
        let rows: Vec<T> = resp.json().await?;
        let message = format!("insert into {table} returned no row");
        rows.into_iter()
            .next()
            .ok_or(BackendError::InvalidResponse(message))
    }

    /// Inserts a row unless one with the same `on_conflict` key already
    /// exists, in which case nothing happens. Safe to repeat.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn upsert<R>(
        &self,
        table: &str,
        row: &R,
        on_conflict: &str,
    ) -> Result<(), BackendError>
    where
        R: Serialize + ?Sized,
    {
        tracing::debug!(table, on_conflict, "upserting row");
        let req = self
            .request(Method::POST, table)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=ignore-duplicates,return=minimal")
            .json(row);
        self.http.execute(req).await?;
        Ok(())
    }

    /// Applies `patch` to the rows matching `query` and returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` has no filter, or if the request fails.
    pub async fn update<P, T>(
        &self,
        table: &str,
        query: &Query,
        patch: &P,
    ) -> Result<Vec<T>, BackendError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::ensure_filtered(table, "update", query)?;
        tracing::debug!(table, "updating rows");
        let req = self
            .request(Method::PATCH, table)
            .query(&query.to_params())
            .header("Prefer", "return=representation")
            .json(patch);
        let resp = self.http.execute(req).await?;
        Ok(resp.json().await?)
    }

    /// Deletes the rows matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if `query` has no filter, or if the request fails.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), BackendError> {
        Self::ensure_filtered(table, "delete", query)?;
        tracing::debug!(table, "deleting rows");
        let req = self
            .request(Method::DELETE, table)
            .query(&query.to_params());
        self.http.execute(req).await?;
        Ok(())
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.http.build_request(
            method,
            &format!("{REST_PREFIX}/{table}"),
            self.access_token.as_deref(),
        )
    }

    // An unfiltered PATCH or DELETE would touch every row the user can see.
    fn ensure_filtered(table: &str, op: &str, query: &Query) -> Result<(), BackendError> {
        if query.has_filters() {
            Ok(())
        } else {
            let message = format!("refusing to {op} {table} without a filter");
            Err(BackendError::Config(message))
        }
    }
}
