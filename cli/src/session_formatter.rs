// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use jiff::Timestamp;
use studybuddy_core::{Exam, StudySession};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_duration, format_timestamp};

/// A study session with the name of its exam, when it has one.
#[derive(Debug)]
pub struct SessionEntry<'a> {
    pub session: &'a StudySession,
    pub exam: Option<&'a str>,
}

impl<'a> SessionEntry<'a> {
    pub fn collect(sessions: &'a [StudySession], exams: &'a [Exam]) -> Vec<Self> {
        sessions
            .iter()
            .map(|session| SessionEntry {
                session,
                exam: session
                    .exam_id
                    .and_then(|id| exams.iter().find(|e| e.id == id))
                    .map(|e| e.name.as_str()),
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct SessionFormatter {
    columns: Vec<SessionColumn>,
    format: ArgOutputFormat,
}

impl SessionFormatter {
    pub fn new(now: Timestamp) -> Self {
        Self {
            columns: vec![
                SessionColumn::Id,
                SessionColumn::Started,
                SessionColumn::Duration(now),
                SessionColumn::Exam,
                SessionColumn::Note,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, entries: &'a [SessionEntry<'a>]) -> Display<'a> {
        Display {
            entries,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    entries: &'a [SessionEntry<'a>],
    formatter: &'a SessionFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.entries)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.entries)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum SessionColumn {
    Id,
    Started,
    Duration(Timestamp),
    Exam,
    Note,
}

impl<'e> TableColumn<SessionEntry<'e>> for SessionColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            SessionColumn::Id => "ID",
            SessionColumn::Started => "Started",
            SessionColumn::Duration(_) => "Duration",
            SessionColumn::Exam => "Exam",
            SessionColumn::Note => "Note",
        }
        .into()
    }

    fn format<'a>(&self, entry: &'a SessionEntry<'e>) -> Cow<'a, str> {
        let session = entry.session;
        match self {
            SessionColumn::Id => session.id.to_string().into(),
            SessionColumn::Started => format_timestamp(session.started_at).into(),
            SessionColumn::Duration(now) => format_duration(session.duration(*now)).into(),
            SessionColumn::Exam => match (entry.exam, session.exam_id) {
                (Some(name), _) => name.into(),
                (None, Some(id)) => format!("#{id}").into(),
                (None, None) => "".into(),
            },
            SessionColumn::Note => session.note.as_deref().unwrap_or_default().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            SessionColumn::Id | SessionColumn::Duration(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, entry: &SessionEntry<'e>) -> Option<Color> {
        match self {
            SessionColumn::Duration(_) if entry.session.is_running() => Some(Color::Green),
            _ => None,
        }
    }
}
