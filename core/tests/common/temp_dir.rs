// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.

use std::path::PathBuf;

use tokio::fs;

/// Temporary directories used for testing.
///
/// Automatically cleans up all created directories when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// State directory for the database file.
    pub state_dir: PathBuf,
    /// Directory standing in for the camera roll.
    pub photos_dir: PathBuf,
}

impl TempDirs {
    /// Creates new temporary directories for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();

        let state_dir = base.join("state");
        let photos_dir = base.join("photos");

        fs::create_dir_all(&state_dir).await?;
        fs::create_dir_all(&photos_dir).await?;

        Ok(Self {
            state_dir,
            photos_dir,
        })
    }

    /// Gets the base temporary directory.
    #[must_use]
    pub fn base(&self) -> PathBuf {
        self.state_dir
            .parent()
            .expect("temp directories should have a parent")
            .to_path_buf()
    }

    /// Writes a fake JPEG into the photos directory.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub async fn create_photo(&self, name: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = self.photos_dir.join(name);
        fs::write(&path, [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]).await?;
        Ok(path)
    }
}

/// Sets up temporary directories for integration tests.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        let base = self.base();
        if let Err(e) = std::fs::remove_dir_all(&base) {
            tracing::warn!(path = %base.display(), err = %e, "failed to clean up temp directory");
        }
    }
}
