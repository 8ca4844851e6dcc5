//! OpenAI chat-completions summary backend.
//!
//! No web search is available here, so the model answers from the link alone
//! and the summary never carries sources.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;

use super::{EMPTY_MESSAGE, SummaryBackend, VideoSummary, build_prompt};
use crate::http::get_http_client;
use crate::verbose;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You describe YouTube videos in a single short sentence. \
Output only that sentence, no preamble.";

#[derive(Debug, Clone)]
pub struct OpenAIBackend {
    api_key: Option<String>,
    model: String,
    language: String,
    url: String,
}

impl OpenAIBackend {
    pub fn new(api_key: Option<String>, model: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            language: language.into(),
            url: OPENAI_CHAT_URL.to_string(),
        }
    }

    /// Use another OpenAI-compatible chat endpoint
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    async fn request(&self, video_url: &str) -> Result<VideoSummary> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OpenAI API key not configured"))?;

        let client = get_http_client()?;
        let response = client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": build_prompt(video_url, &self.language)}
                ]
            }))
            .send()
            .await
            .context("Failed to send OpenAI request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({status}): {error_text}");
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let text = chat
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| EMPTY_MESSAGE.to_string());

        Ok(VideoSummary {
            text,
            sources: Vec::new(),
        })
    }
}

#[async_trait]
impl SummaryBackend for OpenAIBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn summarize(&self, video_url: &str) -> VideoSummary {
        self.request(video_url).await.unwrap_or_else(|e| {
            verbose!("OpenAI error: {e:#}");
            VideoSummary::failure()
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::test_server::serve_once;
    use super::*;

    #[tokio::test]
    async fn test_chat_completion() {
        let (base, request) = serve_once(
            200,
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": " A song. "}}]}"#,
        )
        .await;
        let backend = OpenAIBackend::new(Some("sk-test".into()), "gpt-test", "English")
            .with_url(format!("{base}/v1/chat/completions"));

        let summary = backend.summarize("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(summary.text, "A song.");
        assert!(summary.sources.is_empty());

        let raw = request.await.unwrap();
        assert!(raw.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains("\"gpt-test\""));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let (base, _request) = serve_once(200, r#"{"choices": []}"#).await;
        let backend =
            OpenAIBackend::new(Some("sk-test".into()), "gpt-test", "English").with_url(base);

        let summary = backend.summarize("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(summary.text, EMPTY_MESSAGE);
    }

    #[tokio::test]
    async fn test_blank_key_is_failure() {
        let backend = OpenAIBackend::new(Some("   ".into()), "gpt-test", "English")
            .with_url("http://127.0.0.1:9");
        assert!(backend.summarize("https://youtu.be/dQw4w9WgXcQ").await.is_failure());
    }
}
