// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use studybuddy_backend::{BackendClient, Query};
use uuid::Uuid;

use crate::Error;
use crate::user::{NewProfile, ProfilePatch, UserProfile};

const TABLE: &str = "users";

/// Profile row of the signed-in user.
#[derive(Debug, Clone)]
pub struct UserRepository {
    client: BackendClient,
    user_id: Uuid,
}

impl UserRepository {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        Self { client, user_id }
    }

    fn own_row(&self) -> Query {
        Query::new().eq("id", self.user_id)
    }

    /// The user's profile.
    pub async fn get(&self) -> Result<UserProfile, Error> {
        let rows: Vec<UserProfile> = self.client.select(TABLE, &self.own_row()).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::not_found("user", self.user_id))
    }

    /// Creates the profile row right after sign-up.
    pub async fn create(&self, email: &str, profile: &NewProfile) -> Result<UserProfile, Error> {
        let row = UserProfile {
            id: self.user_id,
            email: email.to_string(),
            name: profile.name.trim().to_string(),
            surname: profile.surname.trim().to_string(),
            degree_course: profile.degree_course.clone(),
            image_url: None,
        };
        Ok(self.client.insert(TABLE, &row).await?)
    }

    /// Applies a patch. An empty patch returns the profile unchanged.
    pub async fn update(&self, patch: &ProfilePatch) -> Result<UserProfile, Error> {
        if patch.is_empty() {
            return self.get().await;
        }
        let rows: Vec<UserProfile> = self.client.update(TABLE, &self.own_row(), patch).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::not_found("user", self.user_id))
    }

    /// Points the profile at a new image, or clears it with `None`.
    pub async fn set_image_url(&self, url: Option<String>) -> Result<UserProfile, Error> {
        let patch = ProfilePatch {
            image_url: Some(url),
            ..Default::default()
        };
        self.update(&patch).await
    }
}
