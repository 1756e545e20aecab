// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Profile photo upload and removal.

use serde_json::json;
use studybuddy_core::Error;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{USER_ID, setup_temp_dirs, signed_in, user_row};

#[tokio::test]
async fn upload_links_public_url_from_profile() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    let object = format!("profile_{USER_ID}.jpg");
    let url = format!(
        "{}/storage/v1/object/public/profile_images/{object}",
        server.uri()
    );

    let upload_path = format!("/storage/v1/object/profile_images/{object}");
    Mock::given(method("POST"))
        .and(path(upload_path))
        .and(header("Content-Type", "image/jpeg"))
        .and(header("x-upsert", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": object })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(body_json(json!({ "image_url": url })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_row(Some(&url))])))
        .expect(1)
        .mount(&server)
        .await;

    let photo = dirs.create_photo("camera.jpg").await.unwrap();
    let profile = app.upload_profile_image(&photo).await.unwrap();
    assert_eq!(profile.image_url.as_deref(), Some(url.as_str()));
    assert_eq!(app.profile_image_url().unwrap(), url);
}

#[tokio::test]
async fn missing_photo_is_not_uploaded() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    let upload_path = format!("/storage/v1/object/profile_images/profile_{USER_ID}.jpg");
    Mock::given(method("POST"))
        .and(path(upload_path))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let missing = dirs.photos_dir.join("not-yet.jpg");
    let err = app.upload_profile_image(&missing).await.unwrap_err();
    assert!(
        matches!(err, Error::FileNotReady { attempts: 5, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn remove_clears_profile_url() {
    let server = MockServer::start().await;
    let dirs = setup_temp_dirs().await.unwrap();
    let app = signed_in(&server, &dirs).await;

    let prefixes = json!({ "prefixes": [format!("profile_{USER_ID}.jpg")] });
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/profile_images"))
        .and(body_json(prefixes))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(body_json(json!({ "image_url": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_row(None)])))
        .expect(1)
        .mount(&server)
        .await;

    let profile = app.remove_profile_image().await.unwrap();
    assert_eq!(profile.image_url, None);
}
