// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use crate::Error;
use crate::geo::{Coordinate, distance_meters};
use crate::library::{Library, LibraryId, VisitedSet};

/// Radius within which a library counts as visited.
pub const DEFAULT_VISIT_RADIUS_M: f64 = 50.0;

/// Effect asking for a library to be recorded as visited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkVisited {
    /// The library to mark.
    pub library_id: LibraryId,
    /// Distance from the device when the decision was made.
    pub distance_m: f64,
}

/// Decides which libraries count as visited from the current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityDetector {
    radius_m: f64,
}

impl Default for ProximityDetector {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_VISIT_RADIUS_M,
        }
    }
}

impl ProximityDetector {
    /// Creates a detector with a custom radius in metres.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the radius is not a positive finite number.
    pub fn with_radius(radius_m: f64) -> Result<Self, Error> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(Error::invalid(
                "visit radius",
                format!("{radius_m} must be a positive number of metres"),
            ));
        }
        Ok(Self { radius_m })
    }

    /// The radius in metres.
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Returns one [`MarkVisited`] for every library strictly closer than the
    /// radius that is not in `visited`. Nothing is returned without a fix.
    pub fn detect(
        &self,
        current: Option<&Coordinate>,
        libraries: &[Library],
        visited: &VisitedSet,
    ) -> Vec<MarkVisited> {
        let Some(current) = current else {
            tracing::debug!("no position fix, skipping proximity scan");
            return Vec::new();
        };

        let mut seen = HashSet::new();
        libraries
            .iter()
            .filter(|lib| !visited.contains(lib.id))
            .filter_map(|lib| {
                let distance_m = distance_meters(current, &lib.position);
                tracing::trace!(library_id = lib.id, distance_m, "library distance");
                (distance_m < self.radius_m).then_some(MarkVisited {
                    library_id: lib.id,
                    distance_m,
                })
            })
            .filter(|mark| seen.insert(mark.library_id))
            .collect()
    }
}
