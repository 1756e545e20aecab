// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Device preferences backed by the local database and observable through
//! [`tokio::sync::watch`] channels.

use std::fmt;
use std::str::FromStr;

use tokio::sync::watch;

use crate::Error;
use crate::localdb::Preferences;

/// A value stored under a fixed key in the preference table.
pub trait Preference:
    Copy + Default + PartialEq + fmt::Display + FromStr + Send + Sync + 'static
{
    /// Storage key.
    const KEY: &'static str;
}

/// Error returned when a stored or typed preference value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParsePreferenceError {
    kind: &'static str,
    value: String,
}

/// Colour scheme of the user interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Theme {
    /// Light scheme.
    Light,
    /// Dark scheme.
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl Preference for Theme {
    const KEY: &'static str = "theme";
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        })
    }
}

impl FromStr for Theme {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(ParsePreferenceError {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

/// Language of the user interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Italian.
    #[default]
    It,
    /// English.
    En,
}

impl Preference for Language {
    const KEY: &'static str = "language";
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::It => "it",
            Language::En => "en",
        })
    }
}

impl FromStr for Language {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" => Ok(Language::It),
            "en" => Ok(Language::En),
            _ => Err(ParsePreferenceError {
                kind: "language",
                value: s.to_string(),
            }),
        }
    }
}

/// One preference, loaded once and kept in sync with its subscribers.
#[derive(Debug)]
pub struct PreferenceStore<T> {
    storage: Preferences,
    tx: watch::Sender<T>,
}

impl<T: Preference> PreferenceStore<T> {
    /// Loads the stored value. Unset and unreadable values fall back to the default.
    pub async fn open(storage: Preferences) -> Result<Self, Error> {
        let value = match storage.get(T::KEY).await? {
            None => T::default(),
            Some(raw) => match raw.parse::<T>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(key = T::KEY, value = %raw, "corrupt preference, using default");
                    T::default()
                }
            },
        };
        let (tx, _) = watch::channel(value);
        Ok(Self { storage, tx })
    }

    /// Current value.
    pub fn get(&self) -> T {
        *self.tx.borrow()
    }

    /// Stream of values, starting with the current one.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Persists `value`, then publishes it to subscribers.
    pub async fn set(&self, value: T) -> Result<(), Error> {
        self.storage.set(T::KEY, &value.to_string()).await?;
        tracing::debug!(key = T::KEY, %value, "preference updated");
        self.tx.send_replace(value);
        Ok(())
    }
}
