// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Identifier of a to-do row.
pub type TodoId = i64;

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "due_date")]
    pub due: Option<Date>,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    /// Whether the item is still open and its due date is before `today`.
    pub fn is_overdue(&self, today: Date) -> bool {
        !self.done && self.due.is_some_and(|due| due < today)
    }
}

/// Payload for a new to-do item.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<Date>,
}

impl TodoDraft {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::invalid("todo", "title must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn to_row(&self, user_id: Uuid) -> serde_json::Value {
        serde_json::json!({
            "user_id": user_id,
            "title": self.title.trim(),
            "description": self.description,
            "due_date": self.due,
            "done": false,
        })
    }
}

/// Partial update of a to-do item. `Some(None)` clears a nullable column.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(rename = "due_date", skip_serializing_if = "Option::is_none")]
    pub due: Option<Option<Date>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl TodoPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due.is_none()
            && self.done.is_none()
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(Error::invalid("todo", "title must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = TodoPatch {
            description: Some(None),
            done: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "description": null, "done": true })
        );
    }

    #[test]
    fn overdue_only_when_open() {
        let mut todo = Todo {
            id: 1,
            user_id: Uuid::nil(),
            title: "Consegna progetto".to_string(),
            description: None,
            due: Some(date(2025, 3, 1)),
            done: false,
        };
        assert!(todo.is_overdue(date(2025, 3, 2)));
        assert!(!todo.is_overdue(date(2025, 3, 1)));
        todo.done = true;
        assert!(!todo.is_overdue(date(2025, 3, 2)));
    }

    #[test]
    fn reads_table_row() {
        let json = r#"{
            "id": 2,
            "user_id": "00000000-0000-0000-0000-000000000000",
            "title": "Ripasso",
            "description": null,
            "due_date": "2025-05-20",
            "done": true
        }"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.due, Some(date(2025, 5, 20)));
        assert!(todo.done);
    }
}
