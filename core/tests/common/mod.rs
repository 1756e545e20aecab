// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - A mocked remote data service
//! - Temporary directory management with auto-cleanup

mod backend;
mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use backend::{mount_sign_in, signed_in};
#[allow(unused_imports)]
pub use fixtures::{
    USER_ID, exam_row, library_row, test_config, todo_row, token_body, user_id, user_row,
};
pub use temp_dir::setup_temp_dirs;
