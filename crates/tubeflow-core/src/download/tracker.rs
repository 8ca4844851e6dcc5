//! Which option, if any, is currently "downloading".

use super::DownloadError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DownloadState {
    #[default]
    Idle,
    Downloading {
        label: String,
    },
}

/// `idle -> downloading(label) -> idle`, with at most one active option.
///
/// While an option is active every option in the grid is disabled.
#[derive(Debug, Clone, Default)]
pub struct DownloadTracker {
    state: DownloadState,
}

impl DownloadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DownloadState {
        &self.state
    }

    /// Mark `label` as downloading. Fails if another option is active.
    pub fn begin(&mut self, label: &str) -> Result<(), DownloadError> {
        if let DownloadState::Downloading { label: active } = &self.state {
            return Err(DownloadError::Busy {
                active: active.clone(),
            });
        }
        self.state = DownloadState::Downloading {
            label: label.to_string(),
        };
        Ok(())
    }

    /// Return to idle, yielding the label that was active
    pub fn finish(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DownloadState::Downloading { label } => Some(label),
            DownloadState::Idle => None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        match &self.state {
            DownloadState::Downloading { label } => Some(label),
            DownloadState::Idle => None,
        }
    }

    /// Whether `label` shows the spinner
    pub fn is_downloading(&self, label: &str) -> bool {
        self.active() == Some(label)
    }

    /// Whether options can be clicked
    pub fn is_enabled(&self) -> bool {
        self.state == DownloadState::Idle
    }
}

/// Finishes the tracked download when dropped, so an error or a cancelled
/// future still returns the grid to idle.
pub(super) struct ActiveDownload<'a> {
    tracker: &'a mut DownloadTracker,
}

impl<'a> ActiveDownload<'a> {
    pub(super) fn start(tracker: &'a mut DownloadTracker, label: &str) -> Result<Self, DownloadError> {
        tracker.begin(label)?;
        Ok(Self { tracker })
    }
}

impl Drop for ActiveDownload<'_> {
    fn drop(&mut self) {
        self.tracker.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{DownloadFormat, quality_options};

    #[test]
    fn test_lifecycle() {
        let mut tracker = DownloadTracker::new();
        assert!(tracker.is_enabled());
        assert_eq!(tracker.active(), None);

        tracker.begin("720p (HD)").unwrap();
        assert!(!tracker.is_enabled());
        assert!(tracker.is_downloading("720p (HD)"));
        assert!(!tracker.is_downloading("360p"));

        assert_eq!(tracker.finish().as_deref(), Some("720p (HD)"));
        assert!(tracker.is_enabled());
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_only_one_active() {
        let mut tracker = DownloadTracker::new();
        tracker.begin("1080p (Full HD)").unwrap();

        for option in quality_options(DownloadFormat::Mp4) {
            let err = tracker.begin(option.label).unwrap_err();
            assert!(matches!(err, DownloadError::Busy { ref active } if active == "1080p (Full HD)"));
        }

        let downloading: Vec<_> = quality_options(DownloadFormat::Mp4)
            .iter()
            .filter(|o| tracker.is_downloading(o.label))
            .collect();
        assert_eq!(downloading.len(), 1);
    }

    #[test]
    fn test_guard_finishes_on_drop() {
        let mut tracker = DownloadTracker::new();
        {
            let _active = ActiveDownload::start(&mut tracker, "360p").unwrap();
        }
        assert!(tracker.is_enabled());

        tracker.begin("480p (SD)").unwrap();
        assert!(ActiveDownload::start(&mut tracker, "360p").is_err());
        // The failed start must not clear the existing download
        assert!(tracker.is_downloading("480p (SD)"));
    }
}
