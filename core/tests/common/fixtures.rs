// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests: configurations and the JSON
//! rows the remote service answers with.

use std::path::Path;

use serde_json::{Value, json};
use studybuddy_core::{BackendConfig, Config, LocationConfig};
use uuid::Uuid;

/// Id of the user every fixture belongs to.
pub const USER_ID: &str = "6f1c1b8e-3b1a-4f7e-9d2a-0a4d9f6b2c11";

#[must_use]
pub fn user_id() -> Uuid {
    Uuid::parse_str(USER_ID).unwrap()
}

/// Creates a test configuration talking to `base_url` and storing its
/// state in `state_dir`.
#[must_use]
pub fn test_config(base_url: &str, state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        visit_radius_m: 50.0,
        backend: BackendConfig {
            base_url: base_url.to_string(),
            api_key: "anon-key".to_string(),
            ..Default::default()
        },
        location: LocationConfig::default(),
    }
}

/// Token payload of the auth endpoints.
#[must_use]
#[allow(dead_code)]
pub fn token_body(access_token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "refresh_token": format!("refresh-{access_token}"),
        "user": { "id": USER_ID, "email": "ada@example.com" }
    })
}

#[must_use]
pub fn exam_row(id: i64, name: &str, credits: u32, grade: Option<u8>) -> Value {
    json!({
        "id": id,
        "user_id": USER_ID,
        "name": name,
        "credits": credits,
        "date": "2025-06-10",
        "grade": grade,
        "laude": false,
    })
}

#[must_use]
#[allow(dead_code)]
pub fn todo_row(id: i64, title: &str, done: bool) -> Value {
    json!({
        "id": id,
        "user_id": USER_ID,
        "title": title,
        "description": null,
        "due_date": "2025-05-20",
        "done": done,
    })
}

#[must_use]
#[allow(dead_code)]
pub fn library_row(id: i64, name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "Piazza Maggiore 6, Bologna",
        "latitude": latitude,
        "longitude": longitude,
        "opening_hours": "Mon-Fri 9-20",
    })
}

#[must_use]
#[allow(dead_code)]
pub fn user_row(image_url: Option<&str>) -> Value {
    json!({
        "id": USER_ID,
        "email": "ada@example.com",
        "name": "Ada",
        "surname": "Lovelace",
        "degree_course": "Informatica",
        "image_url": image_url,
    })
}
