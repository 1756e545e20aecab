// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of `StudyBuddy`.

mod cli;
mod cmd_auth;
mod cmd_dashboard;
mod cmd_exam;
mod cmd_generate_completion;
mod cmd_library;
mod cmd_pref;
mod cmd_profile;
mod cmd_study;
mod cmd_todo;
mod config;
mod exam_formatter;
mod library_formatter;
mod prompt;
mod session_formatter;
mod table;
mod todo_formatter;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::parse_config;
