// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use studybuddy_backend::{BackendClient, Query};
use uuid::Uuid;

use crate::Error;
use crate::library::LibraryId;
use crate::remote::{LINK_CONFLICT, LibraryLink};

const TABLE: &str = "favorite_libraries";

/// Favourite libraries of one user.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    client: BackendClient,
    user_id: Uuid,
}

impl FavoriteRepository {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        Self { client, user_id }
    }

    /// Ids of the user's favourite libraries.
    pub async fn list(&self) -> Result<BTreeSet<LibraryId>, Error> {
        let query = Query::new()
            .select("user_id,library_id")
            .eq("user_id", self.user_id);
        let rows: Vec<LibraryLink> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().map(|r| r.library_id).collect())
    }

    /// Marks a favourite. Adding one twice is a no-op.
    pub async fn add(&self, library_id: LibraryId) -> Result<(), Error> {
        let link = LibraryLink {
            user_id: self.user_id,
            library_id,
        };
        self.client.upsert(TABLE, &link, LINK_CONFLICT).await?;
        Ok(())
    }

    /// Drops a favourite. Removing one that is not there is a no-op.
    pub async fn remove(&self, library_id: LibraryId) -> Result<(), Error> {
        let query = Query::new()
            .eq("user_id", self.user_id)
            .eq("library_id", library_id);
        self.client.delete(TABLE, &query).await?;
        Ok(())
    }
}
