// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Identifier of an exam row.
pub type ExamId = i64;

/// A passing grade on the Italian 18..=30 scale, optionally *cum laude*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Grade {
    score: u8,
    laude: bool,
}

impl Grade {
    /// Lowest passing score.
    pub const MIN: u8 = 18;
    /// Highest score, the only one that admits laude.
    pub const MAX: u8 = 30;

    /// Creates a grade, rejecting scores outside 18..=30 and laude below 30.
    pub fn new(score: u8, laude: bool) -> Result<Self, Error> {
        if !(Self::MIN..=Self::MAX).contains(&score) {
            return Err(Error::invalid(
                "grade",
                format!("{score} is outside {}..={}", Self::MIN, Self::MAX),
            ));
        }
        if laude && score != Self::MAX {
            return Err(Error::invalid("grade", "laude is only given with 30"));
        }
        Ok(Self { score, laude })
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn laude(&self) -> bool {
        self.laude
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.laude {
            true => write!(f, "{}L", self.score),
            false => write!(f, "{}", self.score),
        }
    }
}

impl FromStr for Grade {
    type Err = Error;

    /// Parses `28`, `30L` or `30 e lode`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let (digits, laude) = if let Some(rest) = s.strip_suffix("e lode") {
            (rest.trim_end(), true)
        } else if let Some(rest) = s.strip_suffix('l') {
            (rest, true)
        } else {
            (s.as_str(), false)
        };
        let score = digits
            .parse::<u8>()
            .map_err(|_| Error::invalid("grade", format!("`{s}` is not a number")))?;
        Self::new(score, laude)
    }
}

/// An exam in the student's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExamRow", into = "ExamRow")]
pub struct Exam {
    pub id: ExamId,
    pub user_id: Uuid,
    pub name: String,
    /// University credits (CFU).
    pub credits: u32,
    pub date: Option<Date>,
    /// `None` while the exam is still to be taken.
    pub grade: Option<Grade>,
}

impl Exam {
    pub fn is_passed(&self) -> bool {
        self.grade.is_some()
    }
}

/// Wire shape of the `exams` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExamRow {
    id: ExamId,
    user_id: Uuid,
    name: String,
    credits: u32,
    date: Option<Date>,
    grade: Option<u8>,
    #[serde(default)]
    laude: bool,
}

impl TryFrom<ExamRow> for Exam {
    type Error = Error;

    fn try_from(row: ExamRow) -> Result<Self, Self::Error> {
        let grade = row.grade.map(|g| Grade::new(g, row.laude)).transpose()?;
        Ok(Exam {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            credits: row.credits,
            date: row.date,
            grade,
        })
    }
}

impl From<Exam> for ExamRow {
    fn from(exam: Exam) -> Self {
        ExamRow {
            id: exam.id,
            user_id: exam.user_id,
            name: exam.name,
            credits: exam.credits,
            date: exam.date,
            grade: exam.grade.map(|g| g.score),
            laude: exam.grade.is_some_and(|g| g.laude),
        }
    }
}

/// Payload for a new exam.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamDraft {
    pub name: String,
    pub credits: u32,
    pub date: Option<Date>,
    pub grade: Option<Grade>,
}

impl ExamDraft {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("exam", "name must not be empty"));
        }
        if self.credits == 0 {
            return Err(Error::invalid("exam", "credits must be positive"));
        }
        Ok(())
    }

    pub(crate) fn to_row(&self, user_id: Uuid) -> serde_json::Value {
        serde_json::json!({
            "user_id": user_id,
            "name": self.name.trim(),
            "credits": self.credits,
            "date": self.date,
            "grade": self.grade.map(|g| g.score),
            "laude": self.grade.is_some_and(|g| g.laude),
        })
    }
}

/// Partial update of an exam. `Some(None)` clears a nullable column.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExamPatch {
    pub name: Option<String>,
    pub credits: Option<u32>,
    pub date: Option<Option<Date>>,
    pub grade: Option<Option<Grade>>,
}

impl ExamPatch {
    /// Is this patch empty, meaning no fields are set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.credits.is_none() && self.date.is_none() && self.grade.is_none()
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(Error::invalid("exam", "name must not be empty"));
        }
        if self.credits == Some(0) {
            return Err(Error::invalid("exam", "credits must be positive"));
        }
        Ok(())
    }

    pub(crate) fn to_row(&self) -> serde_json::Value {
        let mut row = serde_json::Map::new();
        if let Some(name) = &self.name {
            row.insert("name".into(), name.trim().into());
        }
        if let Some(credits) = self.credits {
            row.insert("credits".into(), credits.into());
        }
        if let Some(date) = self.date {
            row.insert("date".into(), serde_json::json!(date));
        }
        if let Some(grade) = self.grade {
            row.insert("grade".into(), serde_json::json!(grade.map(|g| g.score)));
            row.insert("laude".into(), grade.is_some_and(|g| g.laude).into());
        }
        serde_json::Value::Object(row)
    }
}
