// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use sqlx::SqlitePool;
use studybuddy_backend::{AuthUser, Session};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AuthSessions {
    pool: SqlitePool,
}

impl AuthSessions {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The stored session, if any. A row that cannot be decoded is treated as
    /// signed out.
    pub async fn get(&self) -> Result<Option<Session>, sqlx::Error> {
        const SQL: &str = "\
SELECT user_id, email, access_token, refresh_token, expires_at
FROM auth_session
WHERE id = 1;
";

        let record: Option<SessionRecord> = sqlx::query_as(SQL).fetch_optional(&self.pool).await?;
        Ok(record.and_then(|r| match r.into_session() {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable stored session");
                None
            }
        }))
    }

    pub async fn save(&self, session: &Session) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO auth_session (id, user_id, email, access_token, refresh_token, expires_at)
VALUES (1, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    user_id       = excluded.user_id,
    email         = excluded.email,
    access_token  = excluded.access_token,
    refresh_token = excluded.refresh_token,
    expires_at    = excluded.expires_at;
";

        sqlx::query(SQL)
            .bind(session.user.id.to_string())
            .bind(&session.user.email)
            .bind(&session.access_token)
            .bind(&session.refresh_token)
            .bind(session.expires_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM auth_session;")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRecord {
    user_id: String,
    email: Option<String>,
    access_token: String,
    refresh_token: String,
    expires_at: String,
}

impl SessionRecord {
    fn into_session(self) -> Result<Session, String> {
        let id: Uuid = self
            .user_id
            .parse()
            .map_err(|e| format!("invalid user id {}: {e}", self.user_id))?;
        let expires_at: Timestamp = self
            .expires_at
            .parse()
            .map_err(|e| format!("invalid expiry {}: {e}", self.expires_at))?;
        Ok(Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: AuthUser {
                id,
                email: self.email,
            },
        })
    }
}
