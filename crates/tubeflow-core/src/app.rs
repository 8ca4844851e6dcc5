//! Submission flow and view state.
//!
//! The view is one immutable [`ViewState`] value. Every user action replaces
//! it wholesale; nothing mutates a field in place.

use crate::metadata::VideoDetails;
use crate::summary::{SummaryBackend, VideoSummary};
use crate::verbose;
use crate::video::{VideoId, VideoMetadata, extract_video_id};

/// Shown when no video ID can be extracted
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid YouTube URL.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub video: Option<VideoMetadata>,
    pub loading: bool,
    pub error: Option<String>,
}

/// What the view should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet
    Empty,
    Loading,
    Error,
    Ready,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.video.is_some() {
            Phase::Ready
        } else {
            Phase::Empty
        }
    }
}

/// A submission whose ID was extracted and whose summary is outstanding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub id: VideoId,
    pub url: String,
}

/// Drives a submission through extraction, summary and display.
pub struct App<B> {
    backend: B,
    state: ViewState,
}

impl<B: SummaryBackend> App<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// First half of a submission.
    ///
    /// On an unrecognised URL the error is shown, the previous video is
    /// cleared and `None` is returned: no request may be made. Otherwise the
    /// view enters the loading state.
    pub fn begin_submit(&mut self, url: &str) -> Option<PendingSubmission> {
        let url = url.trim();
        let Some(id) = extract_video_id(url) else {
            verbose!("No video ID in {:?}", url);
            self.state = ViewState {
                video: None,
                loading: false,
                error: Some(INVALID_URL_MESSAGE.to_string()),
            };
            return None;
        };

        self.state = ViewState {
            video: self.state.video.clone(),
            loading: true,
            error: None,
        };

        Some(PendingSubmission {
            id,
            url: url.to_string(),
        })
    }

    /// Second half of a submission: show the result and leave the loading state.
    pub fn complete(
        &mut self,
        pending: PendingSubmission,
        summary: Option<VideoSummary>,
        details: Option<VideoDetails>,
    ) -> &ViewState {
        let mut video = VideoMetadata::placeholder(pending.id);
        if let Some(details) = details {
            if let Some(title) = details.title {
                video.title = title;
            }
            if let Some(author) = details.author {
                video.author = author;
            }
        }
        if let Some(summary) = summary {
            video.ai_summary = Some(summary.text);
            video.sources = summary.sources;
        }

        self.state = ViewState {
            video: Some(video),
            loading: false,
            error: None,
        };
        &self.state
    }

    /// Full submission: extract, request the summary once, show the result.
    ///
    /// Always ends in a non-loading state.
    pub async fn submit(&mut self, url: &str) -> &ViewState {
        let Some(pending) = self.begin_submit(url) else {
            return &self.state;
        };
        verbose!("Requesting summary from {}", self.backend.name());
        let summary = self.backend.summarize(&pending.url).await;
        self.complete(pending, Some(summary), None)
    }
}
