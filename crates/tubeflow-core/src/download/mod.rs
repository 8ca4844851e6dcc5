//! Download options and the actions behind them.
//!
//! Nothing here transcodes media. Each format has a fixed table of quality
//! options that exist for display; picking one either simulates a download
//! (a delay, then a placeholder text file) or builds a link to an external
//! conversion site.

mod action;
mod tracker;

pub use action::{DEFAULT_CONVERTER_URL, DEFAULT_DELAY_MS, DownloadAction, DownloadOutcome};
pub use tracker::{DownloadState, DownloadTracker};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("another download is in progress: {active}")]
    Busy { active: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid converter URL '{url}': {source}")]
    InvalidConverterUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Container the user wants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Mp4,
    Mp3,
}

impl DownloadFormat {
    /// File extension, lowercase and without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            DownloadFormat::Mp4 => "mp4",
            DownloadFormat::Mp3 => "mp3",
        }
    }

    /// Tab caption
    pub fn caption(&self) -> &'static str {
        match self {
            DownloadFormat::Mp4 => "MP4 Video",
            DownloadFormat::Mp3 => "MP3 Audio",
        }
    }

    pub fn all() -> &'static [DownloadFormat] {
        &[DownloadFormat::Mp4, DownloadFormat::Mp3]
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadFormat::Mp4 => write!(f, "MP4"),
            DownloadFormat::Mp3 => write!(f, "MP3"),
        }
    }
}

impl FromStr for DownloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "mp4" | "video" => Ok(DownloadFormat::Mp4),
            "mp3" | "audio" => Ok(DownloadFormat::Mp3),
            _ => Err(format!("Unknown format: {}. Use 'mp4' or 'mp3'", s)),
        }
    }
}

/// How a chosen option is delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Wait, then save a placeholder file
    #[default]
    Simulate,
    /// Hand off to the external conversion site
    Redirect,
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Simulate => write!(f, "simulate"),
            DownloadMode::Redirect => write!(f, "redirect"),
        }
    }
}

impl FromStr for DownloadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulate" | "simulated" => Ok(DownloadMode::Simulate),
            "redirect" => Ok(DownloadMode::Redirect),
            _ => Err(format!(
                "Unknown download mode: {}. Use 'simulate' or 'redirect'",
                s
            )),
        }
    }
}

/// Coarse quality tier of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    High,
    Mid,
    Low,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::High => write!(f, "high"),
            Quality::Mid => write!(f, "mid"),
            Quality::Low => write!(f, "low"),
        }
    }
}

/// One entry in the download grid. Display data only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityOption {
    pub label: &'static str,
    pub size: &'static str,
    pub quality: Quality,
}

impl QualityOption {
    /// Short form of the label: `1080p (Full HD)` -> `1080p`, `320 kbps (Extreme)` -> `320kbps`
    pub fn code(&self) -> String {
        self.label
            .split('(')
            .next()
            .unwrap_or(self.label)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    }

    /// Filename-safe form of the full label: `1080p (Full HD)` -> `1080p-full-hd`
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.label.len());
        for c in self.label.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        slug.trim_end_matches('-').to_string()
    }
}

pub const MP4_QUALITIES: &[QualityOption] = &[
    QualityOption { label: "1080p (Full HD)", size: "124 MB", quality: Quality::High },
    QualityOption { label: "720p (HD)", size: "68 MB", quality: Quality::Mid },
    QualityOption { label: "480p (SD)", size: "32 MB", quality: Quality::Low },
    QualityOption { label: "360p", size: "18 MB", quality: Quality::Low },
];

pub const MP3_QUALITIES: &[QualityOption] = &[
    QualityOption { label: "320 kbps (Extreme)", size: "12 MB", quality: Quality::High },
    QualityOption { label: "256 kbps (High)", size: "9 MB", quality: Quality::Mid },
    QualityOption { label: "128 kbps (Standard)", size: "4.5 MB", quality: Quality::Low },
    QualityOption { label: "64 kbps (Eco)", size: "2 MB", quality: Quality::Low },
];

/// Options shown for a format
pub fn quality_options(format: DownloadFormat) -> &'static [QualityOption] {
    match format {
        DownloadFormat::Mp4 => MP4_QUALITIES,
        DownloadFormat::Mp3 => MP3_QUALITIES,
    }
}

/// Find an option by 1-based position, full label, or short code (case-insensitive)
pub fn find_option(format: DownloadFormat, query: &str) -> Option<&'static QualityOption> {
    let options = quality_options(format);
    let query = query.trim();

    if let Ok(index) = query.parse::<usize>() {
        if (1..=options.len()).contains(&index) {
            return options.get(index - 1);
        }
    }

    let normalized: String = query
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    options.iter().find(|option| {
        option.label.eq_ignore_ascii_case(query) || option.code() == normalized
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables() {
        assert_eq!(quality_options(DownloadFormat::Mp4).len(), 4);
        assert_eq!(quality_options(DownloadFormat::Mp3).len(), 4);
        assert_eq!(quality_options(DownloadFormat::Mp4)[0].label, "1080p (Full HD)");
        assert_eq!(quality_options(DownloadFormat::Mp3)[2].size, "4.5 MB");
        assert_eq!(quality_options(DownloadFormat::Mp3)[3].quality, Quality::Low);
    }

    #[test]
    fn test_labels_unique_within_format() {
        for format in DownloadFormat::all() {
            let options = quality_options(*format);
            for (i, a) in options.iter().enumerate() {
                for b in &options[i + 1..] {
                    assert_ne!(a.label, b.label);
                    assert_ne!(a.code(), b.code());
                }
            }
        }
    }

    #[test]
    fn test_code_and_slug() {
        let hd = MP4_QUALITIES[0];
        assert_eq!(hd.code(), "1080p");
        assert_eq!(hd.slug(), "1080p-full-hd");

        let plain = MP4_QUALITIES[3];
        assert_eq!(plain.code(), "360p");
        assert_eq!(plain.slug(), "360p");

        let extreme = MP3_QUALITIES[0];
        assert_eq!(extreme.code(), "320kbps");
        assert_eq!(extreme.slug(), "320-kbps-extreme");
    }

    #[test]
    fn test_find_option() {
        assert_eq!(find_option(DownloadFormat::Mp4, "2").map(|o| o.label), Some("720p (HD)"));
        assert_eq!(find_option(DownloadFormat::Mp4, "480P").map(|o| o.label), Some("480p (SD)"));
        assert_eq!(
            find_option(DownloadFormat::Mp3, "128 kbps").map(|o| o.label),
            Some("128 kbps (Standard)")
        );
        assert_eq!(
            find_option(DownloadFormat::Mp3, "64 kbps (eco)").map(|o| o.label),
            Some("64 kbps (Eco)")
        );
        assert!(find_option(DownloadFormat::Mp4, "0").is_none());
        assert!(find_option(DownloadFormat::Mp4, "5").is_none());
        assert!(find_option(DownloadFormat::Mp4, "4k").is_none());
        // MP3 codes are not valid for MP4
        assert!(find_option(DownloadFormat::Mp4, "320kbps").is_none());
    }

    #[test]
    fn test_parse_format_and_mode() {
        assert_eq!("MP3".parse::<DownloadFormat>(), Ok(DownloadFormat::Mp3));
        assert_eq!(".mp4".parse::<DownloadFormat>(), Ok(DownloadFormat::Mp4));
        assert!("wav".parse::<DownloadFormat>().is_err());
        assert_eq!(DownloadFormat::Mp4.to_string(), "MP4");
        assert_eq!(DownloadFormat::default(), DownloadFormat::Mp4);

        assert_eq!("Redirect".parse::<DownloadMode>(), Ok(DownloadMode::Redirect));
        assert!("stream".parse::<DownloadMode>().is_err());
    }
}
