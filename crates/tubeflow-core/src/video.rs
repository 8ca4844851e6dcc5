//! YouTube link parsing and the video data model.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of every YouTube video ID
pub const VIDEO_ID_LEN: usize = 11;

/// Matches the common link shapes: `watch?v=`, `youtu.be/`, `embed/`, `v/`,
/// and the legacy `/u/<x>/` user-page form. Group 7 holds the candidate ID.
static YOUTUBE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*((youtu.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*")
        .expect("YouTube URL regex is valid")
});

/// An 11-character YouTube video ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pull the video ID out of a pasted link.
///
/// Returns `None` when no known link shape matches or when the captured
/// segment is not exactly 11 characters long.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let caps = YOUTUBE_URL_REGEX.captures(input.trim())?;
    let candidate = caps.get(7)?.as_str();
    (candidate.chars().count() == VIDEO_ID_LEN).then(|| VideoId(candidate.to_string()))
}

/// Static thumbnail on YouTube's image host. Not checked for existence.
pub fn thumbnail_url(id: &VideoId) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id)
}

/// Canonical watch page for an ID
pub fn watch_url(id: &VideoId) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// A citation returned alongside an AI summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub title: String,
    pub uri: String,
}

/// Everything shown about a video after a successful submission.
///
/// Built once per submission and replaced wholesale on the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub id: VideoId,
    pub title: String,
    pub thumbnail_url: String,
    pub author: String,
    pub duration: String,
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub sources: Vec<VideoSource>,
}

/// Shown while no real title is known
pub const PLACEHOLDER_TITLE: &str = "Video details parsed";
pub const PLACEHOLDER_AUTHOR: &str = "YouTube Creator";
pub const PLACEHOLDER_DURATION: &str = "00:00";

impl VideoMetadata {
    /// Metadata with placeholder title, author and duration
    pub fn placeholder(id: VideoId) -> Self {
        Self {
            thumbnail_url: thumbnail_url(&id),
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            author: PLACEHOLDER_AUTHOR.to_string(),
            duration: PLACEHOLDER_DURATION.to_string(),
            ai_summary: None,
            sources: Vec::new(),
        }
    }
}
