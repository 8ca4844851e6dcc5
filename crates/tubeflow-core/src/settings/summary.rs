//! Settings for the AI summary provider.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::SummaryProvider;
use crate::summary::DEFAULT_LANGUAGE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySettings {
    /// Whether to request a summary at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub provider: SummaryProvider,

    /// Model override (provider default when None)
    #[serde(default)]
    pub model: Option<String>,

    /// Language the summary is written in (English when None)
    #[serde(default)]
    pub language: Option<String>,

    /// API keys by provider identifier (e.g. "gemini" -> "AIza...")
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_enabled() -> bool {
    true
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: SummaryProvider::default(),
            model: None,
            language: None,
            api_keys: HashMap::new(),
        }
    }
}

impl SummarySettings {
    /// Key for the selected provider: settings first, then environment.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_for(&self.provider)
    }

    /// Key for any provider: settings first, then its environment variables in order.
    pub fn api_key_for(&self, provider: &SummaryProvider) -> Option<String> {
        if let Some(key) = self.configured_api_key(provider) {
            return Some(key);
        }

        provider
            .api_key_env_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
    }

    /// Key stored in the settings file only (no env var fallback)
    pub fn configured_api_key(&self, provider: &SummaryProvider) -> Option<String> {
        self.api_keys
            .get(provider.as_str())
            .filter(|key| !key.trim().is_empty())
            .cloned()
    }

    pub fn has_configured_api_key(&self, provider: &SummaryProvider) -> bool {
        self.configured_api_key(provider).is_some()
    }

    pub fn set_api_key(&mut self, provider: &SummaryProvider, key: impl Into<String>) {
        self.api_keys.insert(provider.as_str().to_string(), key.into());
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn language(&self) -> String {
        self.language
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_key_wins() {
        let mut settings = SummarySettings::default();
        settings.set_api_key(&SummaryProvider::Gemini, "from-settings");
        assert_eq!(settings.api_key().as_deref(), Some("from-settings"));
        assert!(settings.has_configured_api_key(&SummaryProvider::Gemini));
        assert!(!settings.has_configured_api_key(&SummaryProvider::OpenAI));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let mut settings = SummarySettings::default();
        settings.set_api_key(&SummaryProvider::Gemini, "  ");
        assert!(!settings.has_configured_api_key(&SummaryProvider::Gemini));
    }

    #[test]
    fn test_model_and_language_defaults() {
        let mut settings = SummarySettings::default();
        assert_eq!(settings.model(), "gemini-3-flash-preview");
        assert_eq!(settings.language(), "English");

        settings.provider = SummaryProvider::OpenAI;
        assert_eq!(settings.model(), "gpt-5-nano");

        settings.model = Some("gpt-4.1-mini".into());
        settings.language = Some("Japanese".into());
        assert_eq!(settings.model(), "gpt-4.1-mini");
        assert_eq!(settings.language(), "Japanese");
    }

    #[test]
    fn test_enabled_defaults_to_true_when_missing() {
        let settings: SummarySettings = serde_json::from_str("{}").unwrap();
        assert!(settings.enabled);
        assert_eq!(settings, SummarySettings::default());
    }
}
