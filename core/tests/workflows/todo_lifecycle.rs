// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! To-do items: create, list open ones, complete.

use serde_json::json;
use studybuddy_core::TodoDraft;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{setup_temp_dirs, signed_in, todo_row};

#[tokio::test]
async fn create_list_and_complete() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/todos"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([todo_row(4, "Ripasso", false)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/todos"))
        .and(query_param("done", "eq.false"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([todo_row(4, "Ripasso", false)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/todos"))
        .and(query_param("id", "eq.4"))
        .and(body_json(json!({ "done": true })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([todo_row(4, "Ripasso", true)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = TodoDraft {
        title: "Ripasso".to_string(),
        description: None,
        due: None,
    };
    let todo = app.new_todo(&draft).await.unwrap();
    assert!(!todo.done);

    let open = app.todos(false).await.unwrap();
    assert_eq!(open.len(), 1);

    let done = app.set_todo_done(todo.id, true).await.unwrap();
    assert!(done.done);
}

#[tokio::test]
async fn listing_all_does_not_filter_on_done() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            todo_row(1, "Ripasso", false),
            todo_row(2, "Consegna", true),
        ])))
        .mount(&server)
        .await;

    let all = app.todos(true).await.unwrap();
    assert_eq!(all.len(), 2);

    let requests = server.received_requests().await.unwrap();
    let listed = requests
        .iter()
        .find(|r| r.url.path() == "/rest/v1/todos")
        .unwrap();
    assert!(!listed.url.query_pairs().any(|(k, _)| k == "done"));
}
