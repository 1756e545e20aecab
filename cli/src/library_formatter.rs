// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::{borrow::Cow, fmt};

use colored::Color;
use studybuddy_core::{Coordinate, Library, LibraryId, VisitedSet};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

/// A library together with what the user knows about it.
#[derive(Debug)]
pub struct LibraryEntry<'a> {
    pub library: &'a Library,
    pub favorite: bool,
    pub visited: bool,
    pub distance_m: Option<f64>,
}

impl<'a> LibraryEntry<'a> {
    pub fn collect(
        libraries: &'a [Library],
        favorites: &BTreeSet<LibraryId>,
        visited: &VisitedSet,
        position: Option<&Coordinate>,
    ) -> Vec<Self> {
        libraries
            .iter()
            .map(|library| LibraryEntry {
                library,
                favorite: favorites.contains(&library.id),
                visited: visited.contains(library.id),
                distance_m: position.map(|p| p.distance_to(&library.position)),
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct LibraryFormatter {
    columns: Vec<LibraryColumn>,
    format: ArgOutputFormat,
}

impl LibraryFormatter {
    pub fn new() -> Self {
        Self {
            columns: vec![
                LibraryColumn::Flags,
                LibraryColumn::Id,
                LibraryColumn::Name,
                LibraryColumn::Address,
            ],
            format: ArgOutputFormat::Table,
        }
    }

    /// Adds a distance column, for listings made from a known position.
    pub fn with_distance(mut self) -> Self {
        self.columns.insert(2, LibraryColumn::Distance);
        self
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, entries: &'a [LibraryEntry<'a>]) -> Display<'a> {
        Display {
            entries,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    entries: &'a [LibraryEntry<'a>],
    formatter: &'a LibraryFormatter,
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
pub enum LibraryColumn {
    Flags,
    Id,
    Distance,
    Name,
    Address,
}

impl<'e> TableColumn<LibraryEntry<'e>> for LibraryColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            LibraryColumn::Flags => "Flags",
            LibraryColumn::Id => "ID",
            LibraryColumn::Distance => "Distance",
            LibraryColumn::Name => "Name",
            LibraryColumn::Address => "Address",
        }
        .into()
    }

    fn format<'a>(&self, entry: &'a LibraryEntry<'e>) -> Cow<'a, str> {
        match self {
            LibraryColumn::Flags => {
                let favorite = if entry.favorite { '★' } else { ' ' };
                let visited = if entry.visited { '✓' } else { ' ' };
                format!("{favorite}{visited}").into()
            }
            LibraryColumn::Id => entry.library.id.to_string().into(),
            LibraryColumn::Distance => {
                let distance = entry.distance_m.map(format_distance);
                distance.unwrap_or_default().into()
            }
            LibraryColumn::Name => entry.library.name.as_str().into(),
            LibraryColumn::Address => entry.library.address.as_str().into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            LibraryColumn::Id | LibraryColumn::Distance => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, entry: &LibraryEntry<'e>) -> Option<Color> {
        match self {
            LibraryColumn::Flags if entry.favorite => Some(Color::Yellow),
            LibraryColumn::Flags if entry.visited => Some(Color::Green),
            _ => None,
        }
    }
}

fn format_distance(m: f64) -> String {
    if m < 1000.0 {
        format!("{m:.0} m")
    } else {
        format!("{:.1} km", m / 1000.0)
    }
}
