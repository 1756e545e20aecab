// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Errors returned by the remote data service client.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport level failure (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Missing, expired or rejected credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Sign-up attempted with an email that is already registered.
    #[error("a user with this email already exists")]
    UserAlreadyExists,

    /// Resource not found.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The response body could not be understood.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration or request construction error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O failure, e.g. while reading a file to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
