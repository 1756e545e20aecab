// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

/// A signed-in user's tokens.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    /// Short-lived bearer token for authenticated requests.
    pub access_token: String,
    /// Token used to obtain a fresh access token.
    pub refresh_token: String,
    /// Instant at which `access_token` stops being accepted.
    pub expires_at: Timestamp,
    /// The authenticated user.
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token is expired at `now`, with a small margin so a
    /// token is never used right at its deadline.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        const MARGIN: SignedDuration = SignedDuration::from_secs(30);
        now.saturating_add(MARGIN)
            .is_ok_and(|deadline| deadline >= self.expires_at)
    }
}

/// User identity as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthUser {
    /// User id, shared with the `user_id` columns of the tables.
    pub id: Uuid,
    /// Email used to sign in.
    #[serde(default)]
    pub email: Option<String>,
}

/// Outcome of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    /// The newly created user.
    pub user: AuthUser,
    /// Present when the service signs the user in right away; absent when the
    /// email address has to be confirmed first.
    pub session: Option<Session>,
}

/// Token payload of the auth endpoints.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

impl TokenResponse {
    /// Session expiring `expires_in` seconds after `now`.
    pub fn into_session(self, now: Timestamp) -> Session {
        let expires_at = now
            .saturating_add(SignedDuration::from_secs(self.expires_in))
            .unwrap_or(Timestamp::MAX);
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}
