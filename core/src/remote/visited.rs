// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use studybuddy_backend::{BackendClient, Query};
use uuid::Uuid;

use crate::Error;
use crate::library::{LibraryId, VisitedSet};
use crate::remote::{LINK_CONFLICT, LibraryLink};

const TABLE: &str = "visited_libraries";

/// Libraries one user has visited.
#[derive(Debug, Clone)]
pub struct VisitedRepository {
    client: BackendClient,
    user_id: Uuid,
}

impl VisitedRepository {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        Self { client, user_id }
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Ids of every library the user has visited.
    pub async fn list(&self) -> Result<VisitedSet, Error> {
        let query = Query::new()
            .select("user_id,library_id")
            .eq("user_id", self.user_id);
        let rows: Vec<LibraryLink> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().map(|r| r.library_id).collect())
    }

    /// Records a visit. The link table's unique pair makes repeats harmless.
    pub async fn mark(&self, library_id: LibraryId) -> Result<(), Error> {
        let link = LibraryLink {
            user_id: self.user_id,
            library_id,
        };
        self.client.upsert(TABLE, &link, LINK_CONFLICT).await?;
        Ok(())
    }
}
