// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Exams from creation through grading, and the statistics over them.

use jiff::civil::date;
use serde_json::json;
use studybuddy_core::{Error, ExamDraft, ExamPatch, Grade};
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{USER_ID, exam_row, setup_temp_dirs, signed_in};

#[tokio::test]
async fn create_then_grade() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/exams"))
        .and(body_json(json!({
            "user_id": USER_ID,
            "name": "Analisi I",
            "credits": 9,
            "date": "2025-06-10",
            "grade": null,
            "laude": false,
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([exam_row(7, "Analisi I", 9, None)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/exams"))
        .and(query_param("id", "eq.7"))
        .and(query_param("user_id", format!("eq.{USER_ID}")))
        .and(body_partial_json(json!({ "grade": 28, "laude": false })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([exam_row(7, "Analisi I", 9, Some(28))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = ExamDraft {
        name: " Analisi I ".to_string(),
        credits: 9,
        date: Some(date(2025, 6, 10)),
        grade: None,
    };
    let exam = app.new_exam(&draft).await.unwrap();
    assert_eq!(exam.id, 7);
    assert!(!exam.is_passed());

    let patch = ExamPatch {
        grade: Some(Some(Grade::new(28, false).unwrap())),
        ..Default::default()
    };
    let exam = app.update_exam(7, &patch).await.unwrap();
    assert_eq!(exam.grade.map(|g| g.score()), Some(28));
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_server() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/exams"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let draft = ExamDraft {
        name: "Fisica".to_string(),
        credits: 0,
        date: None,
        grade: None,
    };
    let created = app.new_exam(&draft).await;
    assert!(matches!(created, Err(Error::Invalid { .. })));
}

#[tokio::test]
async fn missing_exam_is_not_found() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/exams"))
        .and(query_param("id", "eq.99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = app.exam(99).await.unwrap_err();
    assert!(
        matches!(err, Error::NotFound { kind: "exam", .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn stats_over_listed_exams() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/exams"))
        .and(query_param("user_id", format!("eq.{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            exam_row(1, "Analisi I", 12, Some(30)),
            exam_row(2, "Fisica", 6, Some(24)),
            exam_row(3, "Basi di dati", 9, None),
        ])))
        .mount(&server)
        .await;

    let stats = app.exam_stats().await.unwrap();
    assert_eq!(stats.passed, 2);
    assert_eq!(stats.upcoming, 1);
    assert_eq!(stats.earned_credits, 18);
    assert_eq!(stats.average, Some(27.0));
    assert_eq!(stats.weighted_average, Some(28.0));
}

#[tokio::test]
async fn delete_is_scoped_to_user() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/exams"))
        .and(query_param("id", "eq.3"))
        .and(query_param("user_id", format!("eq.{USER_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    app.delete_exam(3).await.unwrap();
}
