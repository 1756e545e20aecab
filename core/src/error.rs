// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use studybuddy_backend::BackendError;

/// Errors produced by the `StudyBuddy` core.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote data service failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The local database failed.
    #[error("local database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Running the local database migrations failed.
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Local file system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation needs a signed-in user.
    #[error("not signed in, run `studybuddy auth login` first")]
    NotSignedIn,

    /// Sign-up with an email that is already registered.
    #[error("a user with this email already exists")]
    UserAlreadyExists,

    /// A row the operation refers to does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Kind of the missing item, e.g. `exam`.
        kind: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// A study session is already running.
    #[error("a study session is already running since {0}")]
    SessionAlreadyRunning(jiff::Timestamp),

    /// A freshly captured photo never became readable.
    #[error("file {} is not ready after {attempts} attempts", path.display())]
    FileNotReady {
        /// Path of the photo.
        path: PathBuf,
        /// Number of polls made.
        attempts: u32,
    },

    /// Input failed validation.
    #[error("invalid {what}: {reason}")]
    Invalid {
        /// What was being validated.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration could not be used.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            what,
            reason: reason.into(),
        }
    }
}
