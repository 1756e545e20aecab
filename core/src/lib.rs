// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Core of `StudyBuddy`, a companion for university students: exams, to-do
//! items, study sessions and the libraries they visit.

mod app;
mod config;
mod error;
mod exam;
mod geo;
mod library;
mod localdb;
mod location;
mod photo;
mod preferences;
mod proximity;
mod remote;
mod stats;
mod study;
mod todo;
mod types;
mod user;
mod visits;

pub use crate::app::{SignUpOutcome, StudyBuddy, VisitCheck, location_acquirer};
pub use crate::config::{APP_NAME, Config, LocationConfig, expand_path, get_config_dir};
pub use crate::error::Error;
pub use crate::exam::{Exam, ExamDraft, ExamId, ExamPatch, Grade};
pub use crate::geo::{Coordinate, EARTH_RADIUS_M, distance_meters};
pub use crate::library::{Library, LibraryId, VisitedSet};
pub use crate::localdb::{
    AuthSessions, LocalDb, Preferences, StudySessionRecord, StudySessions, VisitedCache,
};
pub use crate::location::{
    AcquisitionState, DEFAULT_LOCATION_TIMEOUT, FailureReason, FixedLocationProvider,
    LocationAcquirer, LocationOutcome, LocationProvider, PermissionResult, PermissionState,
    Precision, ProviderError, Remedy, UnavailableLocationProvider,
};
pub use crate::photo::{
    ProfileImageStore, READY_ATTEMPTS, READY_INTERVAL, object_name, wait_until_ready,
};
pub use crate::preferences::{Language, ParsePreferenceError, Preference, PreferenceStore, Theme};
pub use crate::proximity::{DEFAULT_VISIT_RADIUS_M, MarkVisited, ProximityDetector};
pub use crate::remote::{
    ExamRepository, FavoriteRepository, LibraryRepository, Repositories, TodoRepository,
    UserRepository, VisitedRepository,
};
pub use crate::stats::{ExamStats, average, earned_credits, graduation_base, weighted_average};
pub use crate::study::{StudySession, total_duration};
pub use crate::todo::{Todo, TodoDraft, TodoId, TodoPatch};
pub use crate::types::Pager;
pub use crate::user::{NewProfile, ProfilePatch, UserProfile};
pub use crate::visits::{VisitReport, VisitTracker};

pub use studybuddy_backend::{BackendConfig, BackendError, Session};
