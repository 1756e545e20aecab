// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use jiff::civil::Date;
use studybuddy_core::Exam;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_date};

#[derive(Debug)]
pub struct ExamFormatter {
    columns: Vec<ExamColumn>,
    format: ArgOutputFormat,
}

impl ExamFormatter {
    pub fn new(today: Date) -> Self {
        Self {
            columns: vec![
                ExamColumn::Id,
                ExamColumn::Date(today),
                ExamColumn::Credits,
                ExamColumn::Grade,
                ExamColumn::Name,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, exams: &'a [Exam]) -> Display<'a> {
        Display {
            exams,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    exams: &'a [Exam],
    formatter: &'a ExamFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.exams)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.exams)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ExamColumn {
    Id,
    Date(Date),
    Credits,
    Grade,
    Name,
}

impl TableColumn<Exam> for ExamColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ExamColumn::Id => "ID",
            ExamColumn::Date(_) => "Date",
            ExamColumn::Credits => "CFU",
            ExamColumn::Grade => "Grade",
            ExamColumn::Name => "Name",
        }
        .into()
    }

    fn format<'a>(&self, exam: &'a Exam) -> Cow<'a, str> {
        match self {
            ExamColumn::Id => exam.id.to_string().into(),
            ExamColumn::Date(_) => format_date(exam.date).into(),
            ExamColumn::Credits => exam.credits.to_string().into(),
            ExamColumn::Grade => exam
                .grade
                .map_or_else(|| "-".to_string(), |g| g.to_string())
                .into(),
            ExamColumn::Name => exam.name.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ExamColumn::Id | ExamColumn::Credits | ExamColumn::Grade => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, exam: &Exam) -> Option<Color> {
        match self {
            ExamColumn::Date(today) => date_color(exam, *today),
            ExamColumn::Grade if exam.is_passed() => Some(Color::Green),
            _ => None,
        }
    }
}

/// Yellow for exams in the coming week, dimmed once the date has passed
/// without a grade.
fn date_color(exam: &Exam, today: Date) -> Option<Color> {
    let date = exam.date?;
    if exam.is_passed() {
        None
    } else if date < today {
        Some(Color::BrightBlack)
    } else if today.until(date).ok()?.get_days() <= 7 {
        Some(Color::Yellow)
    } else {
        None
    }
}
