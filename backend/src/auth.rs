// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Password authentication.

use jiff::Timestamp;
use reqwest::Method;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::{AuthUser, Session, SignUp, TokenResponse};

const AUTH_PREFIX: &str = "auth/v1";

/// Messages and codes the auth service uses for an already registered email.
const USER_EXISTS_MARKERS: &[&str] = &[
    "user_already_exists",
    "already registered",
    "already exists",
];

#[derive(Debug, serde::Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Sign-up answers either with a full token payload (auto-confirmed accounts)
/// or with the bare user when the email must be confirmed first.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(SignUpUser),
}

#[derive(Debug, serde::Deserialize)]
struct SignUpUser {
    #[serde(flatten)]
    user: AuthUser,
    #[serde(default)]
    identities: Option<Vec<serde_json::Value>>,
}

impl BackendClient {
    /// Registers a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::UserAlreadyExists`] if the email is taken, or
    /// another error if the request fails.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUp, BackendError> {
        let req = self
            .http
            .build_request(Method::POST, &format!("{AUTH_PREFIX}/signup"), None)
            .json(&Credentials { email, password });

        let resp = match self.http.execute(req).await {
            Ok(resp) => resp,
            Err(BackendError::Status { message, .. }) if is_user_exists(&message) => {
                return Err(BackendError::UserAlreadyExists);
            }
            Err(e) => return Err(e),
        };

        match resp.json::<SignUpResponse>().await? {
            SignUpResponse::Session(token) => {
                let session = token.into_session(Timestamp::now());
                Ok(SignUp {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            // With email confirmation enabled, a repeated sign-up is answered
            // with an obfuscated user that has no identities.
            SignUpResponse::User(SignUpUser {
                identities: Some(identities),
                ..
            }) if identities.is_empty() => Err(BackendError::UserAlreadyExists),
            SignUpResponse::User(SignUpUser { user, .. }) => Ok(SignUp {
                user,
                session: None,
            }),
        }
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Auth`] for wrong credentials, or another error
    /// if the request fails.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let req = self
            .http
            .build_request(Method::POST, &format!("{AUTH_PREFIX}/token"), None)
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });
        self.token_request(req).await
    }

    /// Exchanges a refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token is rejected or the request fails.
    pub async fn refresh_session(&self, session: &Session) -> Result<Session, BackendError> {
        tracing::debug!(user_id = %session.user.id, "refreshing session");
        let req = self
            .http
            .build_request(Method::POST, &format!("{AUTH_PREFIX}/token"), None)
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest {
                refresh_token: &session.refresh_token,
            });
        self.token_request(req).await
    }

    /// Revokes the session on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sign_out(&self, session: &Session) -> Result<(), BackendError> {
        tracing::debug!(user_id = %session.user.id, "signing out");
        let req = self.http.build_request(
            Method::POST,
            &format!("{AUTH_PREFIX}/logout"),
            Some(&session.access_token),
        );
        self.http.execute(req).await?;
        Ok(())
    }

    async fn token_request(&self, req: reqwest::RequestBuilder) -> Result<Session, BackendError> {
        let resp = match self.http.execute(req).await {
            Ok(resp) => resp,
            // the token endpoint reports bad credentials as 400
            Err(BackendError::Status {
                status: 400,
                message,
            }) => {
                return Err(BackendError::Auth(message));
            }
            Err(e) => return Err(e),
        };
        let token: TokenResponse = resp.json().await?;
        Ok(token.into_session(Timestamp::now()))
    }
}

fn is_user_exists(message: &str) -> bool {
    let lower = message.to_lowercase();
    USER_EXISTS_MARKERS.iter().any(|m| lower.contains(m))
}
