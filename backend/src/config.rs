// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

/// Remote data service configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BackendConfig {
    /// Base URL of the service, e.g. `https://project.example.com`.
    pub base_url: String,
    /// Public (anonymous) API key sent with every request.
    pub api_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Bucket holding the profile pictures.
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("studybuddy-backend/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_storage_bucket() -> String {
    "profile_images".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            storage_bucket: default_storage_bucket(),
        }
    }
}
