// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

mod auth;
mod preferences;
mod study_sessions;
mod visited;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::Error;

pub use crate::localdb::auth::AuthSessions;
pub use crate::localdb::preferences::Preferences;
pub use crate::localdb::study_sessions::{StudySessionRecord, StudySessions};
pub use crate::localdb::visited::VisitedCache;

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub auth: AuthSessions,
    pub preferences: Preferences,
    pub study_sessions: StudySessions,
    pub visited: VisitedCache,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Error> {
        let options = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true)
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            SqliteConnectOptions::new().in_memory(true)
        };

        // an in-memory database lives and dies with its connection
        let pool = SqlitePoolOptions::new()
            .max_connections(if filename.is_some() { 4 } else { 1 })
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await?;

        tracing::debug!("ensuring tables in the database");
        Ok(LocalDb {
            auth: AuthSessions::new(pool.clone()),
            preferences: Preferences::new(pool.clone()),
            study_sessions: StudySessions::new(pool.clone()),
            visited: VisitedCache::new(pool.clone()),
            pool,
        })
    }

    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}
