// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Helpers around the wiremock stand-in for the remote service.

use studybuddy_core::StudyBuddy;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{test_config, token_body};
use super::temp_dir::TempDirs;

/// Answers password sign-ins with a one hour session.
#[allow(dead_code)]
pub async fn mount_sign_in(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("user-token", 3600)))
        .mount(server)
        .await;
}

/// An instance signed in against `server`, with its state in `dirs`.
#[allow(dead_code)]
pub async fn signed_in(server: &MockServer, dirs: &TempDirs) -> StudyBuddy {
    mount_sign_in(server).await;
    let mut app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    app.sign_in("ada@example.com", "secret").await.unwrap();
    app
}
