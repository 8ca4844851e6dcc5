//! Persistent user settings.
//!
//! Stored as pretty JSON at `<config_dir>/tubeflow/settings.json`. Every field
//! has a default so older or hand-edited files keep loading.

mod download;
mod metadata;
mod summary;

pub use download::DownloadSettings;
pub use metadata::MetadataSettings;
pub use summary::SummarySettings;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::verbose;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine the user config directory")]
    NoConfigDir,
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// All user-configurable behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub summary: SummarySettings,

    #[serde(default)]
    pub download: DownloadSettings,

    #[serde(default)]
    pub metadata: MetadataSettings,
}

impl Settings {
    /// Default location of the settings file
    pub fn path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join("tubeflow").join("settings.json"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load settings, falling back to defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        let loaded = Self::path().and_then(|path| Self::load_from(&path));
        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                verbose!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating parent directories.
    ///
    /// On Unix the file is made readable by the owner only, since it may
    /// hold API keys.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }

        verbose!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummaryProvider;
    use crate::download::DownloadMode;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.summary.provider = SummaryProvider::OpenAI;
        settings.summary.language = Some("Traditional Chinese".into());
        settings.download.mode = DownloadMode::Redirect;
        settings.metadata.oembed = true;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        Settings::default().save_to(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"download": {"mode": "redirect"}}"#).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.download.mode, DownloadMode::Redirect);
        assert_eq!(loaded.download.delay_ms, DownloadSettings::default().delay_ms);
        assert_eq!(loaded.summary, SummarySettings::default());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
