// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Integration test for the common module.
//!
//! Verifies that common test utilities work correctly.

mod common;

use common::{exam_row, setup_temp_dirs, test_config, user_id};
use studybuddy_core::Exam;

#[tokio::test]
async fn temp_dirs_are_created_and_cleaned_up() {
    let base = {
        let dirs = setup_temp_dirs().await.unwrap();
        assert!(dirs.state_dir.is_dir());
        assert!(dirs.photos_dir.is_dir());

        let photo = dirs.create_photo("me.jpg").await.unwrap();
        assert!(photo.metadata().unwrap().len() > 0);
        dirs.base()
    };
    assert!(!base.exists());
}

#[tokio::test]
async fn config_fixture_normalizes() {
    let dirs = setup_temp_dirs().await.unwrap();
    let mut config = test_config("http://127.0.0.1:9", &dirs.state_dir);
    config.normalize().unwrap();
    assert_eq!(config.state_dir.as_deref(), Some(dirs.state_dir.as_path()));
}

#[test]
fn row_fixtures_decode() {
    let exam: Exam = serde_json::from_value(exam_row(1, "Analisi I", 9, Some(28))).unwrap();
    assert_eq!(exam.user_id, user_id());
    assert!(exam.is_passed());
}
