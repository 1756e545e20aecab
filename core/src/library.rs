// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use crate::geo::Coordinate;

/// Identifier of a library row.
pub type LibraryId = i64;

/// A library the student can visit.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Library {
    /// Row id.
    pub id: LibraryId,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Geographic position.
    pub position: Coordinate,
    /// Free-form opening hours, as published by the library.
    pub opening_hours: Option<String>,
}

/// Libraries the current user has been recorded as visiting.
///
/// Grows monotonically; inserting an id that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    ids: BTreeSet<LibraryId>,
}

impl VisitedSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as visited. Returns `true` if it was not visited before.
    pub fn insert(&mut self, id: LibraryId) -> bool {
        self.ids.insert(id)
    }

    /// Whether `id` has been visited.
    pub fn contains(&self, id: LibraryId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of visited libraries.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no library has been visited.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Visited ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = LibraryId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<LibraryId> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = LibraryId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<LibraryId> for VisitedSet {
    fn extend<I: IntoIterator<Item = LibraryId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}
