// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Object storage: upload, removal and public URLs.

use reqwest::Method;

use crate::client::BackendClient;
use crate::error::BackendError;

const STORAGE_PREFIX: &str = "storage/v1/object";

#[derive(Debug, serde::Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [&'a str],
}

impl BackendClient {
    /// Uploads `bytes` as `object` into `bucket`. With `upsert` an existing
    /// object of the same name is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload(
        &self,
        bucket: &str,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<(), BackendError> {
        let req = self
            .http
            .build_request(
                Method::POST,
                &format!("{STORAGE_PREFIX}/{bucket}/{object}"),
                self.access_token.as_deref(),
            )
            .header("Content-Type", content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);
        self.http.execute(req).await?;
        Ok(())
    }

    /// Removes `objects` from `bucket`. Missing objects are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn remove(&self, bucket: &str, objects: &[&str]) -> Result<(), BackendError> {
        tracing::debug!(bucket, ?objects, "removing objects");
        let req = self
            .http
            .build_request(
                Method::DELETE,
                &format!("{STORAGE_PREFIX}/{bucket}"),
                self.access_token.as_deref(),
            )
            .json(&RemoveRequest { prefixes: objects });
        self.http.execute(req).await?;
        Ok(())
    }

    /// Public URL of `object` in a public `bucket`. No request is made.
    #[must_use]
    pub fn public_url(&self, bucket: &str, object: &str) -> String {
        self.http
            .url(&format!("{STORAGE_PREFIX}/public/{bucket}/{object}"))
    }
}
