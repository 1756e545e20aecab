// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;

use crate::Error;
use crate::geo::Coordinate;
use crate::library::{Library, LibraryId, VisitedSet};
use crate::localdb::VisitedCache;
use crate::proximity::{MarkVisited, ProximityDetector};
use crate::remote::VisitedRepository;

/// What a proximity pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitReport {
    /// Libraries recorded as visited in this pass.
    pub marked: Vec<MarkVisited>,
    /// Libraries within range whose remote write failed, with the error.
    pub failed: Vec<(LibraryId, String)>,
}

impl VisitReport {
    /// Whether the pass neither marked nor failed anything.
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty() && self.failed.is_empty()
    }
}

/// Applies the proximity detector's effects to the remote link table and
/// the local cache.
#[derive(Debug, Clone)]
pub struct VisitTracker {
    detector: ProximityDetector,
    remote: VisitedRepository,
    cache: VisitedCache,
}

impl VisitTracker {
    pub fn new(
        detector: ProximityDetector,
        remote: VisitedRepository,
        cache: VisitedCache,
    ) -> Self {
        Self {
            detector,
            remote,
            cache,
        }
    }

    /// Loads the remote visited set and mirrors it into the local cache.
    pub async fn load(&self) -> Result<VisitedSet, Error> {
        let user_id = self.remote.user_id();
        let remote = self.remote.list().await?;
        let added = self
            .cache
            .merge(user_id, remote.iter(), Timestamp::now())
            .await?;
        if added > 0 {
            tracing::debug!(added, "visited cache refreshed");
        }

        let mut visited: VisitedSet = self.cache.list(user_id).await?.into_iter().collect();
        visited.extend(remote.iter());
        Ok(visited)
    }

    /// Marks every library in range of `position` that is not in `visited`.
    ///
    /// Each write is independent: a failure is logged and reported, and the
    /// remaining libraries are still marked. `visited` only grows with the
    /// libraries whose remote write succeeded.
    #[tracing::instrument(skip(self, libraries, visited), fields(libraries = libraries.len()))]
    pub async fn evaluate(
        &self,
        position: Option<&Coordinate>,
        libraries: &[Library],
        visited: &mut VisitedSet,
    ) -> VisitReport {
        let mut report = VisitReport::default();
        for mark in self.detector.detect(position, libraries, visited) {
            let MarkVisited {
                library_id,
                distance_m,
            } = mark;
            tracing::debug!(library_id, distance_m, "marking library visited");

            if let Err(err) = self.remote.mark(library_id).await {
                tracing::warn!(library_id, %err, "failed to mark library visited");
                report.failed.push((library_id, err.to_string()));
                continue;
            }

            visited.insert(library_id);
            if let Err(err) = self
                .cache
                .insert(self.remote.user_id(), library_id, Timestamp::now())
                .await
            {
                tracing::warn!(library_id, %err, "failed to cache visited library");
            }
            report.marked.push(mark);
        }
        report
    }
}
