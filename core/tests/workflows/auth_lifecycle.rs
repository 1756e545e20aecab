// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Sign-up, sign-in, session restore and sign-out.

use serde_json::json;
use studybuddy_core::{Error, NewProfile, SignUpOutcome, StudyBuddy};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{setup_temp_dirs, signed_in, test_config, token_body, user_id, user_row};

fn profile() -> NewProfile {
    NewProfile {
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        degree_course: Some("Informatica".to_string()),
    }
}

#[tokio::test]
async fn operations_require_a_session() {
    let dirs = setup_temp_dirs().await.unwrap();
    let app = StudyBuddy::new(test_config("http://127.0.0.1:9", &dirs.state_dir))
        .await
        .unwrap();

    assert!(app.session().is_none());
    assert!(matches!(app.exams().await, Err(Error::NotSignedIn)));
    assert!(matches!(app.visited().await, Err(Error::NotSignedIn)));
    let started = app.start_session(None, None).await;
    assert!(matches!(started, Err(Error::NotSignedIn)));
}

#[tokio::test]
async fn sign_up_creates_profile_row() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("new-token", 3600)))
        .expect(1)
        .mount(&server)
        .await;
    let names = json!({ "name": "Ada", "surname": "Lovelace" });
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(body_partial_json(names))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([user_row(None)])))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    let outcome = app
        .sign_up("ada@example.com", "secret", &profile())
        .await
        .unwrap();

    let SignUpOutcome::SignedIn(created) = outcome else {
        panic!("expected an active account, got {outcome:?}");
    };
    assert_eq!(created.id, user_id());
    assert_eq!(app.session().map(|s| s.user.id), Some(user_id()));
}

#[tokio::test]
async fn sign_up_with_taken_email_is_distinct_error() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": "user_already_exists",
            "msg": "User already registered"
        })))
        .mount(&server)
        .await;

    let mut app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    let err = app
        .sign_up("ada@example.com", "secret", &profile())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserAlreadyExists), "got {err:?}");
    assert!(app.session().is_none());
}

#[tokio::test]
async fn session_survives_restart() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();

    let app = signed_in(&server, &dirs).await;
    app.close().await;

    let app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    let session = app.session().expect("session should be restored");
    assert_eq!(session.access_token, "user-token");
}

#[tokio::test]
async fn expired_session_is_refreshed_on_start() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("stale-token", 0)))
        .mount(&server)
        .await;
    let refresh = json!({ "refresh_token": "refresh-stale-token" });
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_partial_json(refresh))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("fresh-token", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    app.sign_in("ada@example.com", "secret").await.unwrap();
    app.close().await;

    let app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    assert_eq!(app.session().unwrap().access_token, "fresh-token");
}

#[tokio::test]
async fn sign_out_forgets_session_even_if_server_fails() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = signed_in(&server, &dirs).await;
    app.sign_out().await.unwrap();
    assert!(app.session().is_none());
    app.close().await;

    let app = StudyBuddy::new(test_config(&server.uri(), &dirs.state_dir))
        .await
        .unwrap();
    assert!(app.session().is_none());
}
