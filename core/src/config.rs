// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::time::Duration;

use studybuddy_backend::BackendConfig;

use crate::Error;
use crate::geo::Coordinate;
use crate::location::DEFAULT_LOCATION_TIMEOUT;
use crate::proximity::{DEFAULT_VISIT_RADIUS_M, ProximityDetector};

/// The name of the application.
pub const APP_NAME: &str = "studybuddy";

/// File name of the local database inside the state directory.
const DB_FILE: &str = "studybuddy.db";

/// Configuration for the `StudyBuddy` core.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Distance in metres under which a library counts as visited.
    #[serde(default = "default_visit_radius")]
    pub visit_radius_m: f64,

    /// Remote data service.
    pub backend: BackendConfig,

    /// Location acquisition.
    #[serde(default)]
    pub location: LocationConfig,
}

fn default_visit_radius() -> f64 {
    DEFAULT_VISIT_RADIUS_M
}

/// Settings of the location acquirer.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LocationConfig {
    /// Seconds allowed for one position query.
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,

    /// Position to report when the device has no location service.
    #[serde(default)]
    pub fixed: Option<Coordinate>,
}

fn default_location_timeout() -> u64 {
    DEFAULT_LOCATION_TIMEOUT.as_secs()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_location_timeout(),
            fixed: None,
        }
    }
}

impl LocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Error> {
        match &self.state_dir {
            Some(a) => {
                let expanded = expand_path(a).map_err(|e| {
                    Error::Config(format!("failed to expand state directory path: {e}"))
                })?;
                self.state_dir = Some(expanded);
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        // rejects zero, negative and non-finite radii
        ProximityDetector::with_radius(self.visit_radius_m)?;

        if self.location.timeout_secs == 0 {
            return Err(Error::Config("location timeout must be positive".into()));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(Error::Config("backend base_url is required".into()));
        }
        Ok(())
    }

    /// Path of the local database, if a state directory is known.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|d| d.join(DB_FILE))
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config(format!("invalid path: {}", path.display())))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Error> {
    dirs::home_dir().ok_or_else(|| Error::Config("user-specific home directory not found".into()))
}

/// User-specific configuration directory.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Config("user-specific config directory not found".into()))
}

fn get_state_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| Error::Config("user-specific state directory not found".into()))
}
