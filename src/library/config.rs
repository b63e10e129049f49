//! Persisted library location

use super::LibraryError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Library settings stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding the audio files
    pub library_path: PathBuf,
}

impl LibraryConfig {
    /// Platform config file location (e.g. `~/.config/composer/library.json`)
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NoHomeDirectory` when no home directory is known
    pub fn default_location() -> Result<PathBuf, LibraryError> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("library.json"))
    }

    /// Default library directory inside the platform data directory
    pub fn default_library_path() -> Result<PathBuf, LibraryError> {
        let dirs = project_dirs()?;
        Ok(dirs.data_dir().join("library"))
    }

    /// Read a config file
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the config file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn project_dirs() -> Result<ProjectDirs, LibraryError> {
    ProjectDirs::from("", "", "composer").ok_or(LibraryError::NoHomeDirectory)
}
