//! Google Gemini summary backend.
//!
//! Sends one `generateContent` request with the Google Search tool enabled so
//! the model can look the video up, then reads the first candidate's text and
//! its grounding citations. The response is decoded into
//! [`GenerateContentResponse`] where every field may be absent.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;

use super::{
    EMPTY_MESSAGE, SUMMARY_TEMPERATURE, SummaryBackend, VideoSummary, build_prompt, dedup_sources,
};
use crate::http::get_http_client;
use crate::verbose;
use crate::video::VideoSource;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    api_key: Option<String>,
    model: String,
    language: String,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(api_key: Option<String>, model: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            language: language.into(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the backend at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn request(&self, video_url: &str) -> Result<VideoSummary> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("Gemini API key not configured"))?;

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": build_prompt(video_url, &self.language) }]
            }],
            "tools": [{ "google_search": {} }],
            "generationConfig": { "temperature": SUMMARY_TEMPERATURE }
        });

        let client = get_http_client()?;
        let response = client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send Gemini request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Gemini API error ({status}): {error_text}");
        }

        let text = response
            .text()
            .await
            .context("Failed to read Gemini response")?;
        let decoded: GenerateContentResponse =
            serde_json::from_str(&text).context("Failed to parse Gemini response")?;

        Ok(decoded.into_summary())
    }
}

#[async_trait]
impl SummaryBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn summarize(&self, video_url: &str) -> VideoSummary {
        match self.request(video_url).await {
            Ok(summary) => {
                verbose!(
                    "Gemini summary received ({} chars, {} sources)",
                    summary.text.len(),
                    summary.sources.len()
                );
                summary
            }
            Err(e) => {
                verbose!("Gemini error: {e:#}");
                VideoSummary::failure()
            }
        }
    }
}

/// `generateContent` response, reduced to the fields we read
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let parts = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Web citations of the first candidate; chunks without a URI are dropped
    pub fn sources(&self) -> Vec<VideoSource> {
        let chunks = self
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.grounding_metadata.as_ref())
            .and_then(|g| g.grounding_chunks.as_ref());

        let Some(chunks) = chunks else {
            return Vec::new();
        };

        let sources = chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| {
                let uri = web.uri.as_deref()?.trim();
                if uri.is_empty() {
                    return None;
                }
                let title = web
                    .title
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or(uri);
                Some(VideoSource {
                    title: title.to_string(),
                    uri: uri.to_string(),
                })
            })
            .collect();

        dedup_sources(sources)
    }

    pub fn into_summary(self) -> VideoSummary {
        VideoSummary {
            text: self.text().unwrap_or_else(|| EMPTY_MESSAGE.to_string()),
            sources: self.sources(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_server::serve_once;
    use super::*;
    use crate::summary::FAILURE_MESSAGE;

    const FULL_RESPONSE: &str = r#"{
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    {"text": "A classic music video "},
                    {"text": "from the late eighties."}
                ]
            },
            "finishReason": "STOP",
            "groundingMetadata": {
                "webSearchQueries": ["dQw4w9WgXcQ"],
                "groundingChunks": [
                    {"web": {"uri": "https://en.wikipedia.org/wiki/Never_Gonna_Give_You_Up", "title": "wikipedia.org"}},
                    {"web": {"uri": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}},
                    {"retrievedContext": {"uri": "ignored"}},
                    {"web": {"title": "no uri"}}
                ]
            }
        }],
        "usageMetadata": {"promptTokenCount": 42}
    }"#;

    #[test]
    fn test_decode_full_response() {
        let decoded: GenerateContentResponse = serde_json::from_str(FULL_RESPONSE).unwrap();
        let summary = decoded.into_summary();
        assert_eq!(summary.text, "A classic music video from the late eighties.");
        assert_eq!(summary.sources.len(), 2);
        assert_eq!(summary.sources[0].title, "wikipedia.org");
        // Missing title falls back to the URI
        assert_eq!(
            summary.sources[1].title,
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        for body in [
            "{}",
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
            r#"{"candidates": null}"#,
        ] {
            let decoded: GenerateContentResponse = serde_json::from_str(body).unwrap();
            let summary = decoded.into_summary();
            assert_eq!(summary.text, EMPTY_MESSAGE, "body: {body}");
            assert!(summary.sources.is_empty());
        }
    }

    #[test]
    fn test_endpoint_uses_model() {
        let backend = GeminiBackend::new(Some("k".into()), "gemini-test", "English")
            .with_base_url("http://localhost:1/v1beta/");
        assert_eq!(
            backend.endpoint(),
            "http://localhost:1/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_returns_failure_without_request() {
        let backend = GeminiBackend::new(None, "gemini-test", "English")
            .with_base_url("http://127.0.0.1:9");
        let summary = backend.summarize("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(summary.text, FAILURE_MESSAGE);
        assert!(summary.sources.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_against_local_server() {
        let (base, request) = serve_once(200, FULL_RESPONSE).await;
        let backend = GeminiBackend::new(Some("test-key".into()), "gemini-test", "English")
            .with_base_url(base);

        let summary = backend.summarize("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(summary.text, "A classic music video from the late eighties.");
        assert_eq!(summary.sources.len(), 2);

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /models/gemini-test:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(raw.contains("google_search"));
        assert!(raw.contains("https://youtu.be/dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_failure() {
        let (base, _request) =
            serve_once(429, r#"{"error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}}"#).await;
        let backend =
            GeminiBackend::new(Some("test-key".into()), "gemini-test", "English").with_base_url(base);

        let summary = backend.summarize("https://youtu.be/dQw4w9WgXcQ").await;
        assert!(summary.is_failure());
        assert!(summary.sources.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_failure() {
        let (base, _request) = serve_once(200, "not json").await;
        let backend =
            GeminiBackend::new(Some("test-key".into()), "gemini-test", "English").with_base_url(base);

        let summary = backend.summarize("https://youtu.be/dQw4w9WgXcQ").await;
        assert!(summary.is_failure());
    }
}
