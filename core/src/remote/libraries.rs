// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use studybuddy_backend::{BackendClient, Order, Query};

use crate::Error;
use crate::geo::Coordinate;
use crate::library::{Library, LibraryId};

const TABLE: &str = "libraries";

#[derive(Debug, serde::Deserialize)]
struct LibraryRow {
    id: LibraryId,
    name: String,
    #[serde(default)]
    address: String,
    latitude: f64,
    longitude: f64,
    opening_hours: Option<String>,
}

impl LibraryRow {
    fn into_library(self) -> Option<Library> {
        match Coordinate::new(self.latitude, self.longitude) {
            Ok(position) => Some(Library {
                id: self.id,
                name: self.name,
                address: self.address,
                position,
                opening_hours: self.opening_hours,
            }),
            Err(err) => {
                tracing::warn!(id = self.id, %err, "library has an invalid position, skipping");
                None
            }
        }
    }
}

/// Read access to the shared catalogue of libraries.
#[derive(Debug, Clone)]
pub struct LibraryRepository {
    client: BackendClient,
}

impl LibraryRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// The whole catalogue by name. Rows with an invalid position are skipped.
    pub async fn list(&self) -> Result<Vec<Library>, Error> {
        let query = Query::new().order("name", Order::Asc);
        let rows: Vec<LibraryRow> = self.client.select(TABLE, &query).await?;
        let libraries = rows
            .into_iter()
            .filter_map(LibraryRow::into_library)
            .collect();
        Ok(libraries)
    }

    /// One library by id.
    pub async fn get(&self, id: LibraryId) -> Result<Library, Error> {
        let query = Query::new().eq("id", id);
        let rows: Vec<LibraryRow> = self.client.select(TABLE, &query).await?;
        rows.into_iter()
            .next()
            .and_then(LibraryRow::into_library)
            .ok_or_else(|| Error::not_found("library", id))
    }
}
