//! Remembered session: last-used paths and key settings.
//!
//! Stored as TOML in the platform config folder unless an explicit file is
//! given:
//! - macOS: ~/Library/Application Support/com.sheetdiff.sheetdiff/
//! - Windows: %APPDATA%/sheetdiff/sheetdiff/config/
//! - Linux: ~/.config/sheetdiff/

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "sheetdiff";
const APP_NAME: &str = "sheetdiff";
const STATE_FILENAME: &str = "session.toml";

/// Errors raised while saving session state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize session state: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub file1_path: Option<PathBuf>,
    pub file2_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    /// `0` means auto-detect.
    pub key_column: usize,
    /// `0` means auto-detect.
    pub key_row: usize,
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            file1_path: None,
            file2_path: None,
            output_path: None,
            key_column: 1,
            key_row: 1,
            saved_at: None,
        }
    }
}

impl SessionState {
    /// Forgets input paths that no longer exist on disk.
    fn clear_vanished_inputs(&mut self) {
        for slot in [&mut self.file1_path, &mut self.file2_path] {
            if slot.as_deref().is_some_and(|path| !path.exists()) {
                tracing::info!(path = ?slot, "remembered input no longer exists");
                *slot = None;
            }
        }
    }
}

/// Location of the session file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config folder.
    pub fn default_location() -> Result<Self, StateError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| Self::at(dirs.config_dir().join(STATE_FILENAME)))
            .ok_or(StateError::NoConfigDir)
    }

    /// Explicit file when given, platform default otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, StateError> {
        match explicit {
            Some(path) => Ok(Self::at(path)),
            None => Self::default_location(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the remembered session.
    ///
    /// A missing, unreadable or unparsable file yields defaults. Input paths
    /// that no longer exist are cleared.
    pub fn load(&self) -> SessionState {
        let mut state = match fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str::<SessionState>(&content) {
                Ok(state) => {
                    tracing::debug!(path = %self.path.display(), "loaded session state");
                    state
                }
                Err(error) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        %error,
                        "failed to parse session state, using defaults"
                    );
                    SessionState::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no session state yet");
                SessionState::default()
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to read session state, using defaults"
                );
                SessionState::default()
            }
        };
        state.clear_vanished_inputs();
        state
    }

    /// Saves `state`, stamping it with the current time.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, state: &SessionState) -> Result<SessionState, StateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StateError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let stamped = SessionState {
            saved_at: Some(Utc::now()),
            ..state.clone()
        };
        let content = toml::to_string_pretty(&stamped)?;
        fs::write(&self.path, content).map_err(|source| StateError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "saved session state");
        Ok(stamped)
    }
}
