//! Settings for the download grid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::download::{DEFAULT_CONVERTER_URL, DEFAULT_DELAY_MS, DownloadAction, DownloadMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadSettings {
    #[serde(default)]
    pub mode: DownloadMode,

    /// Where simulated downloads are saved (system Downloads folder when None)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Simulated download delay in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Base URL of the external conversion site used in redirect mode
    #[serde(default = "default_converter_url")]
    pub converter_url: String,

    /// Open redirect links in the default browser
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

fn default_converter_url() -> String {
    DEFAULT_CONVERTER_URL.to_string()
}

fn default_open_browser() -> bool {
    true
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            mode: DownloadMode::default(),
            output_dir: None,
            delay_ms: default_delay_ms(),
            converter_url: default_converter_url(),
            open_browser: default_open_browser(),
        }
    }
}

impl DownloadSettings {
    /// Resolved output directory: configured, else Downloads, else the current directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Action for the configured mode
    pub fn action(&self) -> DownloadAction {
        self.action_for(self.mode)
    }

    pub fn action_for(&self, mode: DownloadMode) -> DownloadAction {
        match mode {
            DownloadMode::Simulate => DownloadAction::Simulate {
                delay: Duration::from_millis(self.delay_ms),
                output_dir: self.output_dir(),
            },
            DownloadMode::Redirect => DownloadAction::Redirect {
                base_url: self.converter_url.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_mode() {
        let settings = DownloadSettings {
            output_dir: Some(PathBuf::from("/tmp/tubeflow")),
            delay_ms: 500,
            ..Default::default()
        };

        assert_eq!(
            settings.action(),
            DownloadAction::Simulate {
                delay: Duration::from_millis(500),
                output_dir: PathBuf::from("/tmp/tubeflow"),
            }
        );
        assert_eq!(
            settings.action_for(DownloadMode::Redirect),
            DownloadAction::Redirect {
                base_url: DEFAULT_CONVERTER_URL.to_string(),
            }
        );
    }
}
