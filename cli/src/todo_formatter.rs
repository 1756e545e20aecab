// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use jiff::civil::Date;
use studybuddy_core::Todo;

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{ArgOutputFormat, format_date};

#[derive(Debug)]
pub struct TodoFormatter {
    columns: Vec<TodoColumn>,
    format: ArgOutputFormat,
}

impl TodoFormatter {
    pub fn new(today: Date) -> Self {
        Self {
            columns: vec![
                TodoColumn::Status,
                TodoColumn::Id,
                TodoColumn::Due(today),
                TodoColumn::Title,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, todos: &'a [Todo]) -> Display<'a> {
        Display {
            todos,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    todos: &'a [Todo],
    formatter: &'a TodoFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.todos)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.todos)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TodoColumn {
    Status,
    Id,
    Due(Date),
    Title,
}

impl TableColumn<Todo> for TodoColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            TodoColumn::Status => "Status",
            TodoColumn::Id => "ID",
            TodoColumn::Due(_) => "Due",
            TodoColumn::Title => "Title",
        }
        .into()
    }

    fn format<'a>(&self, todo: &'a Todo) -> Cow<'a, str> {
        match self {
            TodoColumn::Status if todo.done => "[x]".into(),
            TodoColumn::Status => "[ ]".into(),
            TodoColumn::Id => todo.id.to_string().into(),
            TodoColumn::Due(_) => format_date(todo.due).into(),
            TodoColumn::Title => todo.title.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            TodoColumn::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, todo: &Todo) -> Option<Color> {
        match self {
            TodoColumn::Due(today) => due_color(todo, *today),
            _ => None,
        }
    }
}

fn due_color(todo: &Todo, today: Date) -> Option<Color> {
    const COLOR_OVERDUE: Option<Color> = Some(Color::Red);
    const COLOR_TODAY: Option<Color> = Some(Color::Yellow);

    match todo.due {
        _ if todo.done => None,
        Some(due) if due < today => COLOR_OVERDUE,
        Some(due) if due == today => COLOR_TODAY,
        _ => None,
    }
}
