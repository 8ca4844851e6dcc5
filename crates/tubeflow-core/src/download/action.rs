//! What happens when an option is picked.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::tracker::ActiveDownload;
use super::{DownloadError, DownloadFormat, DownloadTracker, QualityOption};
use crate::verbose;
use crate::video::{VideoId, watch_url};

/// Delay before the simulated download "completes"
pub const DEFAULT_DELAY_MS: u64 = 2000;

/// Third-party conversion page the redirect mode hands off to.
///
/// Treated as opaque; nothing checks that it is reachable.
pub const DEFAULT_CONVERTER_URL: &str = "https://www.y2mate.com/convert";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadAction {
    /// Wait `delay`, then save a placeholder text file into `output_dir`
    Simulate { delay: Duration, output_dir: PathBuf },
    /// Build a link to the conversion site at `base_url`
    Redirect { base_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Placeholder written to this path
    Saved(PathBuf),
    /// Open this URL to continue on the conversion site
    Redirect(String),
}

impl DownloadAction {
    /// Run the action for one option.
    ///
    /// Fails with [`DownloadError::Busy`] if the tracker already has an
    /// active option. A simulated download holds the tracker for its whole
    /// duration and always returns it to idle, even when the write fails.
    pub async fn run(
        &self,
        tracker: &mut DownloadTracker,
        video: &VideoId,
        format: DownloadFormat,
        option: &QualityOption,
    ) -> Result<DownloadOutcome, DownloadError> {
        match self {
            DownloadAction::Simulate { delay, output_dir } => {
                let _active = ActiveDownload::start(tracker, option.label)?;
                verbose!(
                    "Simulating {} {} download for {} ({} ms)",
                    format,
                    option.label,
                    video,
                    delay.as_millis()
                );
                tokio::time::sleep(*delay).await;
                let path = save_placeholder(output_dir, video, format, option).await?;
                Ok(DownloadOutcome::Saved(path))
            }
            DownloadAction::Redirect { base_url } => {
                if let Some(active) = tracker.active() {
                    return Err(DownloadError::Busy {
                        active: active.to_string(),
                    });
                }
                let url = converter_url(base_url, video, format, option)?;
                verbose!("Redirecting to {}", url);
                Ok(DownloadOutcome::Redirect(url))
            }
        }
    }
}

/// `<id>_<quality-slug>_<ext>.txt`, always a single path component
pub fn placeholder_file_name(video: &VideoId, format: DownloadFormat, option: &QualityOption) -> String {
    format!(
        "{}_{}_{}.txt",
        file_safe_id(video),
        option.slug(),
        format.extension()
    )
}

/// IDs are only length-checked, so anything outside `[A-Za-z0-9_-]` becomes `-`
fn file_safe_id(video: &VideoId) -> String {
    video
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn placeholder_contents(video: &VideoId, format: DownloadFormat, option: &QualityOption) -> String {
    format!(
        "TubeFlow simulated download\n\
         Video: {}\n\
         Format: {}\n\
         Quality: {} ({})\n\
         Estimated size: {}\n\
         \n\
         This is a placeholder file. No media was downloaded or converted.\n",
        watch_url(video),
        format,
        option.label,
        option.quality,
        option.size
    )
}

async fn save_placeholder(
    output_dir: &Path,
    video: &VideoId,
    format: DownloadFormat,
    option: &QualityOption,
) -> Result<PathBuf, DownloadError> {
    let path = output_dir.join(placeholder_file_name(video, format, option));
    let write_err = |source| DownloadError::Write {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(write_err)?;
    tokio::fs::write(&path, placeholder_contents(video, format, option))
        .await
        .map_err(write_err)?;

    Ok(path)
}

/// Conversion-site link carrying the video ID, format and quality as query parameters
pub fn converter_url(
    base_url: &str,
    video: &VideoId,
    format: DownloadFormat,
    option: &QualityOption,
) -> Result<String, DownloadError> {
    let url = url::Url::parse_with_params(
        base_url,
        &[
            ("v", video.as_str()),
            ("format", format.extension()),
            ("quality", option.code().as_str()),
        ],
    )
    .map_err(|source| DownloadError::InvalidConverterUrl {
        url: base_url.to_string(),
        source,
    })?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{MP3_QUALITIES, MP4_QUALITIES};
    use crate::video::extract_video_id;

    fn video() -> VideoId {
        extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap()
    }

    #[tokio::test]
    async fn test_simulate_writes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let action = DownloadAction::Simulate {
            delay: Duration::from_millis(10),
            output_dir: dir.path().join("downloads"),
        };
        let mut tracker = DownloadTracker::new();

        let outcome = action
            .run(&mut tracker, &video(), DownloadFormat::Mp4, &MP4_QUALITIES[1])
            .await
            .unwrap();

        let DownloadOutcome::Saved(path) = outcome else {
            panic!("expected a saved file");
        };
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "dQw4w9WgXcQ_720p-hd_mp4.txt"
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("720p (HD)"));
        assert!(contents.contains("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(tracker.is_enabled());
    }

    #[test]
    fn test_file_name_keeps_id_in_one_component() {
        let cases = [
            ("https://youtu.be/../../abcde", "------abcde_720p-hd_mp4.txt"),
            ("https://youtu.be/ab/cd\\efghi", "ab-cd-efghi_720p-hd_mp4.txt"),
            ("https://youtu.be/dQw4w9WgXcé", "dQw4w9WgXc-_720p-hd_mp4.txt"),
        ];
        for (url, expected) in cases {
            let id = extract_video_id(url).unwrap();
            assert_eq!(
                placeholder_file_name(&id, DownloadFormat::Mp4, &MP4_QUALITIES[1]),
                expected,
                "{url}"
            );
        }
    }

    #[tokio::test]
    async fn test_simulate_stays_inside_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("a").join("b").join("downloads");
        let action = DownloadAction::Simulate {
            delay: Duration::ZERO,
            output_dir: output_dir.clone(),
        };
        let mut tracker = DownloadTracker::new();
        let id = extract_video_id("https://youtu.be/../../abcde").unwrap();
        assert_eq!(id.as_str(), "../../abcde");

        let outcome = action
            .run(&mut tracker, &id, DownloadFormat::Mp4, &MP4_QUALITIES[0])
            .await
            .unwrap();

        let DownloadOutcome::Saved(path) = outcome else {
            panic!("expected a saved file");
        };
        assert_eq!(path.parent(), Some(output_dir.as_path()));
        let saved = path.canonicalize().unwrap();
        assert!(saved.starts_with(output_dir.canonicalize().unwrap()));
        assert!(!dir.path().join("a").join("abcde_1080p-full-hd_mp4.txt").exists());
        assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_simulate_rejects_when_busy() {
        let dir = tempfile::tempdir().unwrap();
        let action = DownloadAction::Simulate {
            delay: Duration::ZERO,
            output_dir: dir.path().to_path_buf(),
        };
        let mut tracker = DownloadTracker::new();
        tracker.begin("1080p (Full HD)").unwrap();

        let err = action
            .run(&mut tracker, &video(), DownloadFormat::Mp4, &MP4_QUALITIES[2])
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::Busy { .. }));
        assert!(tracker.is_downloading("1080p (Full HD)"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();

        let action = DownloadAction::Simulate {
            delay: Duration::ZERO,
            output_dir: blocker,
        };
        let mut tracker = DownloadTracker::new();

        let err = action
            .run(&mut tracker, &video(), DownloadFormat::Mp3, &MP3_QUALITIES[0])
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::Write { .. }));
        assert!(tracker.is_enabled());
    }

    #[tokio::test]
    async fn test_redirect_url() {
        let action = DownloadAction::Redirect {
            base_url: "https://converter.test/convert".into(),
        };
        let mut tracker = DownloadTracker::new();

        let outcome = action
            .run(&mut tracker, &video(), DownloadFormat::Mp3, &MP3_QUALITIES[0])
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::Redirect(
                "https://converter.test/convert?v=dQw4w9WgXcQ&format=mp3&quality=320kbps".into()
            )
        );
        assert!(tracker.is_enabled());
    }

    #[test]
    fn test_converter_url_keeps_existing_query() {
        let url = converter_url(
            "https://converter.test/go?lang=en",
            &video(),
            DownloadFormat::Mp4,
            &MP4_QUALITIES[0],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://converter.test/go?lang=en&v=dQw4w9WgXcQ&format=mp4&quality=1080p"
        );
    }

    #[test]
    fn test_converter_url_invalid_base() {
        let err = converter_url("not a url", &video(), DownloadFormat::Mp4, &MP4_QUALITIES[0])
            .unwrap_err();
        assert!(matches!(err, DownloadError::InvalidConverterUrl { .. }));
    }
}
