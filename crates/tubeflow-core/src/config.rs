use serde::{Deserialize, Serialize};
use std::fmt;

/// Hosted AI services that can write the video summary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryProvider {
    #[default]
    Gemini,
    OpenAI,
}

impl SummaryProvider {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryProvider::Gemini => "gemini",
            SummaryProvider::OpenAI => "openai",
        }
    }

    /// Environment variables consulted for this provider's API key, in order
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            // `API_KEY` is what older deployments exported for Gemini
            SummaryProvider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            SummaryProvider::OpenAI => &["OPENAI_API_KEY"],
        }
    }

    /// Primary environment variable name, used in help messages
    pub fn api_key_env_var(&self) -> &'static str {
        self.api_key_env_vars()[0]
    }

    /// Model used when the settings do not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            SummaryProvider::Gemini => "gemini-3-flash-preview",
            SummaryProvider::OpenAI => "gpt-5-nano",
        }
    }

    /// Where users obtain a key
    pub fn api_key_url(&self) -> &'static str {
        match self {
            SummaryProvider::Gemini => "https://aistudio.google.com/apikey",
            SummaryProvider::OpenAI => "https://platform.openai.com/api-keys",
        }
    }

    /// Whether the provider can attach web citations to its answer
    pub fn supports_sources(&self) -> bool {
        matches!(self, SummaryProvider::Gemini)
    }

    pub fn all() -> &'static [SummaryProvider] {
        &[SummaryProvider::Gemini, SummaryProvider::OpenAI]
    }

    /// Human-readable display name for this provider
    pub fn display_name(&self) -> &'static str {
        match self {
            SummaryProvider::Gemini => "Google Gemini",
            SummaryProvider::OpenAI => "OpenAI",
        }
    }
}

impl fmt::Display for SummaryProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SummaryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(SummaryProvider::Gemini),
            "openai" => Ok(SummaryProvider::OpenAI),
            _ => Err(format!(
                "Unknown provider: {}. Available: gemini, openai",
                s
            )),
        }
    }
}
