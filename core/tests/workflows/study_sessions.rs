// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Local study sessions.

use serde_json::json;
use studybuddy_core::{Error, Pager};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{exam_row, setup_temp_dirs, signed_in};

#[tokio::test]
async fn start_stop_and_list() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/exams"))
        .and(query_param("id", "eq.2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([exam_row(2, "Fisica", 6, None)])),
        )
        .mount(&server)
        .await;

    let started = app.start_session(Some(2), Some("cap. 4")).await.unwrap();
    assert!(started.is_running());
    assert_eq!(started.exam_id, Some(2));

    let err = app.start_session(None, None).await.unwrap_err();
    match err {
        Error::SessionAlreadyRunning(at) => assert_eq!(at, started.started_at),
        other => panic!("Expected a running session error, got {other:?}"),
    }

    let stopped = app.stop_session().await.unwrap();
    assert_eq!(stopped.id, started.id);
    assert!(!stopped.is_running());
    assert!(app.running_session().await.unwrap().is_none());

    let sessions = app.list_sessions(&Pager::default()).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].note.as_deref(), Some("cap. 4"));
}

#[tokio::test]
async fn stopping_without_running_session_is_not_found() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    let stopped = app.stop_session().await;
    assert!(matches!(stopped, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn session_for_unknown_exam_is_rejected() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/exams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(matches!(
        app.start_session(Some(42), None).await,
        Err(Error::NotFound { kind: "exam", .. })
    ));
    assert!(app.running_session().await.unwrap().is_none());
}
