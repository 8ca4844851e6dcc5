//! AI-written video summaries.
//!
//! A summary is one sentence of free text plus, for providers that search
//! the web, the pages the answer was grounded on. Backends never fail
//! outward: any problem becomes [`FAILURE_MESSAGE`] with no sources, so the
//! caller can always render *something*.
//!
//! # Supported Providers
//!
//! - **Gemini** - `generateContent` with Google Search grounding (default)
//! - **OpenAI** - chat completions, no citations

mod gemini;
mod openai;

pub use gemini::{GEMINI_API_BASE, GeminiBackend, GenerateContentResponse};
pub use openai::{OPENAI_CHAT_URL, OpenAIBackend};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SummaryProvider;
use crate::settings::Settings;
use crate::video::VideoSource;

/// Returned when the request failed for any reason
pub const FAILURE_MESSAGE: &str = "AI is temporarily unable to analyze this link.";

/// Returned when the provider answered but produced no text
pub const EMPTY_MESSAGE: &str = "Unable to get a summary for this video.";

/// Language used in the prompt when none is configured
pub const DEFAULT_LANGUAGE: &str = "English";

/// Sampling temperature for summary requests
pub const SUMMARY_TEMPERATURE: f32 = 0.7;

/// Summary text and the web pages it cites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<VideoSource>,
}

impl VideoSummary {
    /// The apology shown when the provider could not be reached or understood
    pub fn failure() -> Self {
        Self {
            text: FAILURE_MESSAGE.to_string(),
            sources: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.text == FAILURE_MESSAGE
    }
}

/// A hosted model that can describe a video from its link.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Provider identifier for logs
    fn name(&self) -> &'static str;

    /// Issue one request and return the summary.
    ///
    /// Implementations swallow every error and return [`VideoSummary::failure`].
    async fn summarize(&self, video_url: &str) -> VideoSummary;
}

#[async_trait]
impl<T: SummaryBackend + ?Sized> SummaryBackend for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn summarize(&self, video_url: &str) -> VideoSummary {
        (**self).summarize(video_url).await
    }
}

/// Build the instruction sent to the model
pub fn build_prompt(video_url: &str, language: &str) -> String {
    let language = if language.trim().is_empty() {
        DEFAULT_LANGUAGE
    } else {
        language.trim()
    };
    format!(
        "This is a YouTube link: {video_url}. Based on the link (if you can find information \
         about it) or on what videos behind links like this usually cover, write a short, \
         one-sentence introduction in {language} describing what this video is probably about."
    )
}

/// Keep the first occurrence of each URI, preserving order
pub(crate) fn dedup_sources(sources: Vec<VideoSource>) -> Vec<VideoSource> {
    let mut seen = std::collections::HashSet::new();
    sources
        .into_iter()
        .filter(|s| seen.insert(s.uri.clone()))
        .collect()
}

/// Create the backend selected in settings.
///
/// A missing API key is not an error here; the backend reports the
/// failure message when asked for a summary.
pub fn backend_from_settings(settings: &Settings) -> Box<dyn SummaryBackend> {
    let summary = &settings.summary;
    let api_key = summary.api_key();
    let model = summary.model();
    let language = summary.language();

    match summary.provider {
        SummaryProvider::Gemini => Box::new(GeminiBackend::new(api_key, model, language)),
        SummaryProvider::OpenAI => Box::new(OpenAIBackend::new(api_key, model, language)),
    }
}
