// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use crate::exam::ExamId;

/// A block of time spent studying, optionally for a given exam.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySession {
    pub id: i64,
    pub exam_id: Option<ExamId>,
    pub started_at: Timestamp,
    /// `None` while the session is running.
    pub ended_at: Option<Timestamp>,
    pub note: Option<String>,
}

impl StudySession {
    pub fn is_running(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Time studied, counting a running session up to `now`.
    pub fn duration(&self, now: Timestamp) -> SignedDuration {
        let end = self.ended_at.unwrap_or(now);
        end.duration_since(self.started_at)
    }
}

/// Sum of the durations of `sessions`.
pub fn total_duration(sessions: &[StudySession], now: Timestamp) -> SignedDuration {
    let add = |acc: SignedDuration, s: &StudySession| acc.saturating_add(s.duration(now));
    sessions.iter().fold(SignedDuration::ZERO, add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn running_session_counts_until_now() {
        let session = StudySession {
            id: 1,
            exam_id: None,
            started_at: ts("2025-03-01T10:00:00Z"),
            ended_at: None,
            note: None,
        };
        assert!(session.is_running());
        assert_eq!(
            session.duration(ts("2025-03-01T10:45:00Z")),
            SignedDuration::from_mins(45)
        );
    }

    #[test]
    fn total_of_closed_sessions() {
        let sessions = [
            StudySession {
                id: 1,
                exam_id: Some(2),
                started_at: ts("2025-03-01T10:00:00Z"),
                ended_at: Some(ts("2025-03-01T11:00:00Z")),
                note: None,
            },
            StudySession {
                id: 2,
                exam_id: None,
                started_at: ts("2025-03-02T09:00:00Z"),
                ended_at: Some(ts("2025-03-02T09:30:00Z")),
                note: Some("flashcards".to_string()),
            },
        ];
        let now = ts("2025-03-03T00:00:00Z");
        let total = total_duration(&sessions, now);
        assert_eq!(total, SignedDuration::from_mins(90));
    }
}
