// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::library::LibraryId;

/// Local mirror of the libraries a user has visited.
#[derive(Debug, Clone)]
pub struct VisitedCache {
    pool: SqlitePool,
}

impl VisitedCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<LibraryId>, sqlx::Error> {
        let rows: Vec<(LibraryId,)> = sqlx::query_as(
            "SELECT library_id FROM visited_cache WHERE user_id = ? ORDER BY library_id;",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Records a visit. Returns `false` if the library was already recorded.
    pub async fn insert(
        &self,
        user_id: Uuid,
        library_id: LibraryId,
        visited_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        const SQL: &str = "\
INSERT INTO visited_cache (user_id, library_id, visited_at) VALUES (?, ?, ?)
ON CONFLICT(user_id, library_id) DO NOTHING;
";

        let result = sqlx::query(SQL)
            .bind(user_id.to_string())
            .bind(library_id)
            .bind(visited_at.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Adds every id of `ids` that is not cached yet, keeping existing rows.
    pub async fn merge(
        &self,
        user_id: Uuid,
        ids: impl IntoIterator<Item = LibraryId>,
        visited_at: Timestamp,
    ) -> Result<usize, sqlx::Error> {
        let mut added = 0;
        for id in ids {
            if self.insert(user_id, id, visited_at).await? {
                added += 1;
            }
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use crate::localdb::LocalDb;

    use super::*;

    #[tokio::test]
    async fn insert_twice_keeps_one_row() {
        let db = LocalDb::open(None).await.unwrap();
        let user = Uuid::new_v4();
        let now = Timestamp::now();

        assert!(db.visited.insert(user, 7, now).await.unwrap());
        assert!(!db.visited.insert(user, 7, now).await.unwrap());
        assert_eq!(db.visited.list(user).await.unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn rows_are_scoped_by_user() {
        let db = LocalDb::open(None).await.unwrap();
        let (ada, bob) = (Uuid::new_v4(), Uuid::new_v4());
        let now = Timestamp::now();

        db.visited.insert(ada, 1, now).await.unwrap();
        db.visited.insert(bob, 2, now).await.unwrap();

        assert_eq!(db.visited.list(ada).await.unwrap(), vec![1]);
        assert_eq!(db.visited.list(bob).await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn merge_counts_new_rows() {
        let db = LocalDb::open(None).await.unwrap();
        let user = Uuid::new_v4();
        let now = Timestamp::now();

        db.visited.insert(user, 2, now).await.unwrap();
        let added = db.visited.merge(user, [1, 2, 3, 3], now).await.unwrap();

        assert_eq!(added, 2);
        assert_eq!(db.visited.list(user).await.unwrap(), vec![1, 2, 3]);
    }
}
