// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Profile photos: waiting for a freshly written file, then storing it
//! in the remote bucket.

use std::path::Path;
use std::time::Duration;

use studybuddy_backend::BackendClient;
use uuid::Uuid;

use crate::Error;

/// How many times a photo file is checked before giving up.
pub const READY_ATTEMPTS: u32 = 5;

/// Pause between two checks.
pub const READY_INTERVAL: Duration = Duration::from_millis(200);

const CONTENT_TYPE: &str = "image/jpeg";

/// Waits until `path` exists with a non-zero size.
///
/// A camera or editor may still be flushing the file when it hands the path
/// over, so the file is polled [`READY_ATTEMPTS`] times, [`READY_INTERVAL`]
/// apart, and its contents are returned on the first successful check.
#[tracing::instrument]
pub async fn wait_until_ready(path: &Path) -> Result<Vec<u8>, Error> {
    for attempt in 1..=READY_ATTEMPTS {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => {
                tracing::debug!(attempt, len = meta.len(), "photo is ready");
                return Ok(tokio::fs::read(path).await?);
            }
            Ok(_) => tracing::debug!(attempt, "photo is still empty"),
            Err(err) => tracing::debug!(attempt, %err, "photo is not there yet"),
        }
        if attempt < READY_ATTEMPTS {
            tokio::time::sleep(READY_INTERVAL).await;
        }
    }

    Err(Error::FileNotReady {
        path: path.to_path_buf(),
        attempts: READY_ATTEMPTS,
    })
}

/// Object name of a user's profile photo.
pub fn object_name(user_id: Uuid) -> String {
    format!("profile_{user_id}.jpg")
}

/// The profile photo of one user in the storage bucket.
#[derive(Debug, Clone)]
pub struct ProfileImageStore {
    client: BackendClient,
    bucket: String,
    user_id: Uuid,
}

impl ProfileImageStore {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        let bucket = client.config().storage_bucket.clone();
        Self {
            client,
            bucket,
            user_id,
        }
    }

    pub fn object_name(&self) -> String {
        object_name(self.user_id)
    }

    /// Uploads the photo at `path`, replacing any previous one, and returns
    /// its public URL.
    pub async fn upload(&self, path: &Path) -> Result<String, Error> {
        let bytes = wait_until_ready(path).await?;
        let object = self.object_name();
        self.client
            .upload(&self.bucket, &object, bytes, CONTENT_TYPE, true)
            .await?;
        tracing::info!(bucket = %self.bucket, object = %object, "profile photo uploaded");
        Ok(self.public_url())
    }

    pub async fn remove(&self) -> Result<(), Error> {
        self.client
            .remove(&self.bucket, &[self.object_name().as_str()])
            .await?;
        Ok(())
    }

    pub fn public_url(&self) -> String {
        self.client.public_url(&self.bucket, &self.object_name())
    }
}
