// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use studybuddy_backend::{BackendClient, Order, Query};
use uuid::Uuid;

use crate::Error;
use crate::exam::{Exam, ExamDraft, ExamId, ExamPatch};

const TABLE: &str = "exams";

/// Exams table, scoped to one user.
#[derive(Debug, Clone)]
pub struct ExamRepository {
    client: BackendClient,
    user_id: Uuid,
}

impl ExamRepository {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        Self { client, user_id }
    }

    fn scoped(&self) -> Query {
        Query::new().eq("user_id", self.user_id)
    }

    /// Exams of the user, by date with undated ones last.
    pub async fn list(&self) -> Result<Vec<Exam>, Error> {
        let query = self
            .scoped()
            .order("date", Order::Asc)
            .order("id", Order::Asc);
        Ok(self.client.select(TABLE, &query).await?)
    }

    /// Fetches one exam, `NotFound` if the user has no exam with that id.
    pub async fn get(&self, id: ExamId) -> Result<Exam, Error> {
        let query = self.scoped().eq("id", id);
        let rows: Vec<Exam> = self.client.select(TABLE, &query).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::not_found("exam", id))
    }

    /// Validates the draft and inserts it.
    pub async fn create(&self, draft: &ExamDraft) -> Result<Exam, Error> {
        draft.validate()?;
        let row = draft.to_row(self.user_id);
        let exam: Exam = self.client.insert(TABLE, &row).await?;
        tracing::debug!(id = exam.id, name = %exam.name, "exam created");
        Ok(exam)
    }

    /// Applies a validated patch. An empty patch returns the exam unchanged.
    pub async fn update(&self, id: ExamId, patch: &ExamPatch) -> Result<Exam, Error> {
        patch.validate()?;
        if patch.is_empty() {
            return self.get(id).await;
        }
        let rows: Vec<Exam> = self
            .client
            .update(TABLE, &self.scoped().eq("id", id), &patch.to_row())
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::not_found("exam", id))
    }

    /// Deletes the exam. Deleting a missing exam succeeds.
    pub async fn delete(&self, id: ExamId) -> Result<(), Error> {
        let query = self.scoped().eq("id", id);
        self.client.delete(TABLE, &query).await?;
        Ok(())
    }
}
