// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use studybuddy_backend::{BackendClient, Order, Query};
use uuid::Uuid;

use crate::Error;
use crate::todo::{Todo, TodoDraft, TodoId, TodoPatch};

const TABLE: &str = "todos";

/// To-do table, scoped to one user.
#[derive(Debug, Clone)]
pub struct TodoRepository {
    client: BackendClient,
    user_id: Uuid,
}

impl TodoRepository {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        Self { client, user_id }
    }

    fn scoped(&self) -> Query {
        Query::new().eq("user_id", self.user_id)
    }

    /// To-do items of the user by due date. With `include_done` unset only
    /// open items are returned.
    pub async fn list(&self, include_done: bool) -> Result<Vec<Todo>, Error> {
        let mut query = self.scoped();
        if !include_done {
            query = query.eq("done", false);
        }
        let query = query.order("due_date", Order::Asc).order("id", Order::Asc);
        Ok(self.client.select(TABLE, &query).await?)
    }

    /// Validates the draft and inserts it.
    pub async fn create(&self, draft: &TodoDraft) -> Result<Todo, Error> {
        draft.validate()?;
        let row = draft.to_row(self.user_id);
        let todo: Todo = self.client.insert(TABLE, &row).await?;
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// Applies a validated patch. An empty patch is rejected as invalid.
    pub async fn update(&self, id: TodoId, patch: &TodoPatch) -> Result<Todo, Error> {
        patch.validate()?;
        if patch.is_empty() {
            return Err(Error::invalid("todo", "nothing to update"));
        }
        let rows: Vec<Todo> = self
            .client
            .update(TABLE, &self.scoped().eq("id", id), patch)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::not_found("todo", id))
    }

    /// Marks the item done or open again.
    pub async fn set_done(&self, id: TodoId, done: bool) -> Result<Todo, Error> {
        let patch = TodoPatch {
            done: Some(done),
            ..Default::default()
        };
        self.update(id, &patch).await
    }

    /// Deletes the item. Deleting a missing item succeeds.
    pub async fn delete(&self, id: TodoId) -> Result<(), Error> {
        let query = self.scoped().eq("id", id);
        self.client.delete(TABLE, &query).await?;
        Ok(())
    }
}
