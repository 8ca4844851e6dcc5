//! First-time setup wizard
//!
//! 1. Pick the summary provider (with [configured] markers for existing keys)
//! 2. Enter or keep the API key, with a format check
//! 3. Summary language and download mode
//! 4. Save

use anyhow::{Result, anyhow};
use tubeflow_core::{DownloadMode, Settings, SummaryProvider};

use crate::ui;

/// Check the shape of a key before saving it
pub fn validate_key(provider: &SummaryProvider, api_key: &str) -> Result<()> {
    let api_key = api_key.trim();
    match provider {
        SummaryProvider::Gemini => {
            if !api_key.starts_with("AIza") {
                return Err(anyhow!("Invalid Gemini key format. Keys start with 'AIza'"));
            }
        }
        SummaryProvider::OpenAI => {
            if !api_key.starts_with("sk-") {
                return Err(anyhow!("Invalid OpenAI key format. Keys start with 'sk-'"));
            }
        }
    }
    if api_key.len() < 20 {
        return Err(anyhow!("API key seems too short"));
    }
    Ok(())
}

fn prompt_and_validate_key(provider: &SummaryProvider) -> Result<String> {
    loop {
        let api_key = ui::password(&format!("{} API key", provider.display_name()))?;
        match validate_key(provider, &api_key) {
            Ok(()) => return Ok(api_key.trim().to_string()),
            Err(e) => ui::error(&e.to_string()),
        }
    }
}

pub fn run() -> Result<()> {
    if !ui::is_interactive() {
        anyhow::bail!("Setup needs an interactive terminal. Use 'tubeflow config' instead.");
    }

    let mut settings = Settings::load();
    ui::header("tubeflow setup");

    // Step 1: provider
    let providers = SummaryProvider::all();
    let items: Vec<String> = providers
        .iter()
        .map(|p| {
            let marker = if settings.summary.has_configured_api_key(p) {
                " [configured]"
            } else if settings.summary.api_key_for(p).is_some() {
                " [available]"
            } else {
                ""
            };
            format!("{}{}", p.display_name(), marker)
        })
        .collect();
    let default = providers.iter().position(|p| *p == settings.summary.provider);
    let provider = providers[ui::select("Which AI provider?", &items, default)?];

    // Step 2: key
    match settings.summary.api_key_for(&provider) {
        Some(existing) if ui::confirm("Keep current key?", true)? => {
            if !settings.summary.has_configured_api_key(&provider) {
                settings.summary.set_api_key(&provider, existing);
                ui::info("API key from environment saved to settings");
            }
        }
        _ => {
            ui::info(&format!("Get your API key from: {}", provider.api_key_url()));
            let api_key = prompt_and_validate_key(&provider)?;
            settings.summary.set_api_key(&provider, api_key);
        }
    }
    settings.summary.provider = provider;

    // Step 3: language and download mode
    let current_language = settings.summary.language();
    let language = ui::input("Summary language", Some(current_language.as_str()))?;
    settings.summary.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());

    let modes = [
        "Simulate - save a placeholder file",
        "Redirect - open an external conversion site",
    ];
    let current = match settings.download.mode {
        DownloadMode::Simulate => 0,
        DownloadMode::Redirect => 1,
    };
    settings.download.mode = match ui::select("Download mode", &modes, Some(current))? {
        0 => DownloadMode::Simulate,
        _ => DownloadMode::Redirect,
    };

    let path = settings.save()?;
    println!();
    ui::success(&format!(
        "Configuration saved to {}. Run 'tubeflow <URL>' to get started.",
        path.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key(&SummaryProvider::Gemini, "AIzaSyA1234567890abcdefghijklmnopqrs").is_ok());
        assert!(validate_key(&SummaryProvider::Gemini, "sk-1234567890abcdefghijkl").is_err());
        assert!(validate_key(&SummaryProvider::Gemini, "AIza123").is_err());
        assert!(validate_key(&SummaryProvider::OpenAI, "sk-proj-1234567890abcdefgh").is_ok());
        assert!(validate_key(&SummaryProvider::OpenAI, "AIzaSyA1234567890abcdefghijklmnopqrs").is_err());
    }
}
