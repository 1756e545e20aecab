// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::exam::ExamId;
use crate::study::StudySession;
use crate::types::Pager;

#[derive(Debug, Clone)]
pub struct StudySessions {
    pool: SqlitePool,
}

impl StudySessions {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Starts a session. Fails with a unique constraint violation if the user
    /// already has one running.
    pub async fn start(
        &self,
        user_id: Uuid,
        exam_id: Option<ExamId>,
        note: Option<&str>,
        started_at: Timestamp,
    ) -> Result<StudySessionRecord, sqlx::Error> {
        const SQL: &str = "\
INSERT INTO study_sessions (user_id, exam_id, started_at, note)
VALUES (?, ?, ?, ?)
RETURNING id, exam_id, started_at, ended_at, note;
";

        sqlx::query_as(SQL)
            .bind(user_id.to_string())
            .bind(exam_id)
            .bind(started_at.to_string())
            .bind(note)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn running(&self, user_id: Uuid) -> Result<Option<StudySessionRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, exam_id, started_at, ended_at, note
FROM study_sessions
WHERE user_id = ? AND ended_at IS NULL;
";

        sqlx::query_as(SQL)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn stop(
        &self,
        id: i64,
        ended_at: Timestamp,
    ) -> Result<Option<StudySessionRecord>, sqlx::Error> {
        const SQL: &str = "\
UPDATE study_sessions SET ended_at = ?
WHERE id = ? AND ended_at IS NULL
RETURNING id, exam_id, started_at, ended_at, note;
";

        sqlx::query_as(SQL)
            .bind(ended_at.to_string())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Sessions of the user, most recent first.
    ///
    /// Stored timestamps carry a variable number of fractional digits, so they
    /// are compared as instants rather than as text.
    pub async fn list(
        &self,
        user_id: Uuid,
        pager: &Pager,
    ) -> Result<Vec<StudySessionRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, exam_id, started_at, ended_at, note
FROM study_sessions
WHERE user_id = ?
ORDER BY julianday(started_at) DESC, id DESC
LIMIT ? OFFSET ?;
";

        sqlx::query_as(SQL)
            .bind(user_id.to_string())
            .bind(pager.limit)
            .bind(pager.offset)
            .fetch_all(&self.pool)
            .await
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudySessionRecord {
    id: i64,
    exam_id: Option<ExamId>,
    started_at: String,
    ended_at: Option<String>,
    note: Option<String>,
}

impl StudySessionRecord {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Converts the row, skipping timestamps that fail to parse.
    pub fn into_session(self) -> Option<StudySession> {
        let started_at = match self.started_at.parse::<Timestamp>() {
            Ok(t) => t,
            Err(err) => {
                tracing::warn!(id = self.id, %err, "invalid study session start, skipping");
                return None;
            }
        };
        let ended_at = self.ended_at.and_then(|s| match s.parse::<Timestamp>() {
            Ok(t) => Some(t),
            Err(err) => {
                tracing::warn!(id = self.id, %err, "invalid study session end, still running");
                None
            }
        });
        Some(StudySession {
            id: self.id,
            exam_id: self.exam_id,
            started_at,
            ended_at,
            note: self.note,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::localdb::LocalDb;

    use super::*;

    #[tokio::test]
    async fn start_stop_list() {
        let db = LocalDb::open(None).await.unwrap();
        let user = Uuid::new_v4();
        let start: Timestamp = "2025-03-01T10:00:00Z".parse().unwrap();
        let end: Timestamp = "2025-03-01T11:30:00Z".parse().unwrap();

        let record = db
            .study_sessions
            .start(user, Some(4), Some("chapter 3"), start)
            .await
            .unwrap();
        let running = db.study_sessions.running(user).await.unwrap().unwrap();
        assert_eq!(running.id, record.id);

        let stopped = db
            .study_sessions
            .stop(record.id, end)
            .await
            .unwrap()
            .unwrap()
            .into_session()
            .unwrap();
        assert_eq!(stopped.ended_at, Some(end));
        assert_eq!(stopped.exam_id, Some(4));
        assert!(db.study_sessions.running(user).await.unwrap().is_none());

        // stopping twice is a no-op
        let again = db.study_sessions.stop(record.id, end).await.unwrap();
        assert!(again.is_none());

        let list = db.study_sessions.list(user, &(10, 0).into()).await.unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn only_one_running_session_per_user() {
        let db = LocalDb::open(None).await.unwrap();
        let sessions = &db.study_sessions;
        let user = Uuid::new_v4();
        let now = Timestamp::now();

        sessions.start(user, None, None, now).await.unwrap();
        assert!(sessions.start(user, None, None, now).await.is_err());

        let other = Uuid::new_v4();
        assert!(sessions.start(other, None, None, now).await.is_ok());
    }

    #[tokio::test]
    async fn list_orders_by_instant_not_text() {
        let db = LocalDb::open(None).await.unwrap();
        let sessions = &db.study_sessions;
        let user = Uuid::new_v4();
        let earlier: Timestamp = "2025-03-01T10:00:00Z".parse().unwrap();
        let later: Timestamp = "2025-03-01T10:00:00.5Z".parse().unwrap();

        // the later start is written first, so insertion order cannot decide
        let first = sessions.start(user, None, None, later).await.unwrap();
        sessions.stop(first.id, later).await.unwrap();
        let second = sessions.start(user, None, None, earlier).await.unwrap();
        sessions.stop(second.id, later).await.unwrap();

        let list = sessions.list(user, &(10, 0).into()).await.unwrap();
        let ids: Vec<_> = list.iter().map(StudySessionRecord::id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
