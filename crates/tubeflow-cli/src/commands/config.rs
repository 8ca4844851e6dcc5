use anyhow::Result;
use tubeflow_core::{Settings, SummaryProvider};

use crate::app::mask_secret;
use crate::args::ConfigArgs;
use crate::ui;

pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Settings::path()?.display());
        return Ok(());
    }

    let mut settings = Settings::load();
    let changed = apply(&mut settings, &args);

    if changed {
        let path = settings.save()?;
        ui::success(&format!("Settings saved to {}", path.display()));
    }

    if args.show || !changed {
        show(&settings);
    }

    Ok(())
}

/// Apply every flag that was given. Returns whether anything changed.
fn apply(settings: &mut Settings, args: &ConfigArgs) -> bool {
    let mut changed = false;

    if let Some(provider) = args.provider {
        settings.summary.provider = provider;
        changed = true;
    }
    if let Some(key) = &args.gemini_api_key {
        settings.summary.set_api_key(&SummaryProvider::Gemini, key.trim());
        changed = true;
    }
    if let Some(key) = &args.openai_api_key {
        settings.summary.set_api_key(&SummaryProvider::OpenAI, key.trim());
        changed = true;
    }
    if let Some(model) = &args.model {
        settings.summary.model = non_empty(model);
        changed = true;
    }
    if let Some(language) = &args.language {
        settings.summary.language = non_empty(language);
        changed = true;
    }
    if let Some(enabled) = args.summary {
        settings.summary.enabled = enabled;
        changed = true;
    }
    if let Some(mode) = args.mode {
        settings.download.mode = mode;
        changed = true;
    }
    if let Some(dir) = &args.output_dir {
        settings.download.output_dir = Some(dir.clone());
        changed = true;
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.download.delay_ms = delay_ms;
        changed = true;
    }
    if let Some(url) = &args.converter_url {
        settings.download.converter_url = url.trim().to_string();
        changed = true;
    }
    if let Some(open) = args.open_browser {
        settings.download.open_browser = open;
        changed = true;
    }
    if let Some(oembed) = args.oembed {
        settings.metadata.oembed = oembed;
        changed = true;
    }

    changed
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn show(settings: &Settings) {
    let summary = &settings.summary;
    let download = &settings.download;

    ui::header("TubeFlow settings");
    println!("Summary");
    println!("  enabled:   {}", summary.enabled);
    println!("  provider:  {}", summary.provider);
    println!("  model:     {}", summary.model());
    println!("  language:  {}", summary.language());
    for provider in SummaryProvider::all() {
        let key = match (
            summary.configured_api_key(provider),
            summary.api_key_for(provider),
        ) {
            (Some(key), _) => mask_secret(&key),
            (None, Some(key)) => format!("{} (from environment)", mask_secret(&key)),
            (None, None) => "not set".to_string(),
        };
        println!("  {} key: {}", provider.as_str(), key);
    }
    println!();
    println!("Download");
    println!("  mode:          {}", download.mode);
    println!("  output dir:    {}", download.output_dir().display());
    println!("  delay:         {} ms", download.delay_ms);
    println!("  converter URL: {}", download.converter_url);
    println!("  open browser:  {}", download.open_browser);
    println!();
    println!("Metadata");
    println!("  oembed: {}", settings.metadata.oembed);
}
