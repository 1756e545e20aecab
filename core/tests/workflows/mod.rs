// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the studybuddy-core crate, run against a
//! mocked remote service and a temporary state directory.

mod auth_lifecycle;
mod exam_lifecycle;
mod library_visits;
mod preferences;
mod profile_photo;
mod study_sessions;
mod todo_lifecycle;
