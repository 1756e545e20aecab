// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the hosted data service behind `StudyBuddy`: table rows over a
//! `PostgREST`-style API, password authentication and object storage.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod auth;
mod client;
mod config;
mod error;
mod http;
mod query;
mod storage;
mod types;

pub use crate::client::BackendClient;
pub use crate::config::BackendConfig;
pub use crate::error::BackendError;
pub use crate::query::{Order, Query};
pub use crate::types::{AuthUser, Session, SignUp};
