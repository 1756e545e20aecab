// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Theme and language survive restarts and notify watchers.

use studybuddy_core::{Language, StudyBuddy, Theme};

use crate::common::{setup_temp_dirs, test_config};

#[tokio::test]
async fn preferences_persist_across_restarts() {
    let dirs = setup_temp_dirs().await.unwrap();
    let config = test_config("http://127.0.0.1:9", &dirs.state_dir);

    let app = StudyBuddy::new(config.clone()).await.unwrap();
    assert_eq!(app.theme(), Theme::System);
    assert_eq!(app.language(), Language::It);

    let mut theme_rx = app.watch_theme();
    app.set_theme(Theme::Dark).await.unwrap();
    app.set_language(Language::En).await.unwrap();
    theme_rx.changed().await.unwrap();
    assert_eq!(*theme_rx.borrow(), Theme::Dark);
    app.close().await;

    let app = StudyBuddy::new(config).await.unwrap();
    assert_eq!(app.theme(), Theme::Dark);
    assert_eq!(app.language(), Language::En);
}
