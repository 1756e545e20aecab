// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Proximity check-ins: position, libraries, visited links.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use studybuddy_core::{
    Coordinate, FixedLocationProvider, LocationOutcome, LocationProvider, PermissionResult,
    Precision, ProviderError, Remedy, UnavailableLocationProvider, location_acquirer,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{USER_ID, library_row, setup_temp_dirs, signed_in};

fn user_position() -> Coordinate {
    Coordinate::new(44.4950, 11.3427).unwrap()
}

/// Location on, no permission yet; the prompt answers `answer`.
struct PromptingProvider {
    answer: PermissionResult,
    granted: Mutex<Option<Precision>>,
}

impl PromptingProvider {
    fn new(answer: PermissionResult) -> Self {
        Self {
            answer,
            granted: Mutex::new(None),
        }
    }
}

#[async_trait]
impl LocationProvider for PromptingProvider {
    async fn is_enabled(&self) -> bool {
        true
    }

    async fn permission(&self) -> Option<Precision> {
        *self.granted.lock().unwrap()
    }

    async fn request_permission(&self) -> PermissionResult {
        if let PermissionResult::Granted(precision) = self.answer {
            *self.granted.lock().unwrap() = Some(precision);
        }
        self.answer
    }

    async fn current_position(&self) -> Result<Coordinate, ProviderError> {
        Ok(user_position())
    }
}

async fn mount_libraries(server: &MockServer, rows: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rows))
        .mount(server)
        .await;
}

async fn mount_no_remote_visits(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/visited_libraries"))
        .and(query_param("user_id", format!("eq.{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn nearby_library_is_marked_once() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    mount_libraries(
        &server,
        json!([
            library_row(1, "Biblioteca Salaborsa", 44.4949, 11.3426),
            library_row(2, "Biblioteca lontana", 45.0, 12.0),
        ]),
    )
    .await;
    mount_no_remote_visits(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/visited_libraries"))
        .and(query_param("on_conflict", "user_id,library_id"))
        .and(body_partial_json(json!({ "library_id": 1 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut acquirer = location_acquirer(app.config(), FixedLocationProvider::new(user_position()));
    let check = app.check_visits(&mut acquirer).await.unwrap();
    assert_eq!(check.outcome, LocationOutcome::Ready(user_position()));
    assert_eq!(check.report.marked.len(), 1);
    assert_eq!(check.report.marked[0].library_id, 1);
    assert!(check.report.marked[0].distance_m < 50.0);
    assert!(check.report.failed.is_empty());

    // the local cache remembers the visit, so a second pass marks nothing
    let check = app.check_visits(&mut acquirer).await.unwrap();
    assert!(check.report.is_empty());

    let visited = app.visited().await.unwrap();
    assert!(visited.contains(1));
    assert_eq!(visited.len(), 1);
}

#[tokio::test]
async fn one_failed_write_does_not_stop_the_others() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    mount_libraries(
        &server,
        json!([
            library_row(1, "Biblioteca Salaborsa", 44.4949, 11.3426),
            library_row(3, "Biblioteca dell'Archiginnasio", 44.49505, 11.34265),
        ]),
    )
    .await;
    mount_no_remote_visits(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/visited_libraries"))
        .and(body_partial_json(json!({ "library_id": 1 })))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "database unavailable"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/visited_libraries"))
        .and(body_partial_json(json!({ "library_id": 3 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut acquirer = location_acquirer(app.config(), FixedLocationProvider::new(user_position()));
    let check = app.check_visits(&mut acquirer).await.unwrap();

    let marked: Vec<_> = check.report.marked.iter().map(|m| m.library_id).collect();
    assert_eq!(marked, vec![3]);
    assert_eq!(check.report.failed.len(), 1);
    assert_eq!(check.report.failed[0].0, 1);
}

#[tokio::test]
async fn disabled_location_skips_the_scan() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut acquirer = location_acquirer(app.config(), UnavailableLocationProvider);
    let check = app.check_visits(&mut acquirer).await.unwrap();
    assert_eq!(check.outcome, LocationOutcome::Disabled);
    assert!(check.report.is_empty());
}

#[tokio::test]
async fn favorites_are_upserted_and_removed() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/libraries"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            library_row(1, "Biblioteca Salaborsa", 44.4949, 11.3426)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/favorite_libraries"))
        .and(query_param("on_conflict", "user_id,library_id"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/favorite_libraries"))
        .and(query_param("library_id", "eq.1"))
        .and(query_param("user_id", format!("eq.{USER_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/favorite_libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "user_id": USER_ID, "library_id": 1 }
        ])))
        .mount(&server)
        .await;

    app.add_favorite(1).await.unwrap();
    app.add_favorite(1).await.unwrap();
    assert!(app.favorites().await.unwrap().contains(&1));
    app.remove_favorite(1).await.unwrap();
}

#[tokio::test]
async fn refused_prompt_points_to_settings() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let refusal = PermissionResult::Denied {
        can_ask_again: false,
    };
    let mut acquirer = location_acquirer(app.config(), PromptingProvider::new(refusal));
    let check = app.check_visits(&mut acquirer).await.unwrap();

    assert_eq!(check.outcome, LocationOutcome::PermissionMissing);
    assert!(check.report.is_empty());
    assert_eq!(acquirer.permission().remedy(), Remedy::OpenSettings);
}

#[tokio::test]
async fn granted_prompt_retries_the_fix() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    mount_libraries(&server, json!([])).await;
    mount_no_remote_visits(&server).await;

    let grant = PermissionResult::Granted(Precision::Coarse);
    let mut acquirer = location_acquirer(app.config(), PromptingProvider::new(grant));
    let check = app.check_visits(&mut acquirer).await.unwrap();

    assert_eq!(check.outcome, LocationOutcome::Ready(user_position()));
    assert_eq!(acquirer.permission().remedy(), Remedy::None);
}
