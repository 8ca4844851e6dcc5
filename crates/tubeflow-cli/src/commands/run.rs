//! Default command: analyze a link, show the preview, run a download option.

use anyhow::{Context, Result, bail};
use tubeflow_core::metadata::fetch_details;
use tubeflow_core::{
    App, DownloadFormat, DownloadOutcome, DownloadTracker, QualityOption, Settings, SummaryBackend,
    VideoMetadata, backend_from_settings, find_option, quality_options, verbose,
};

use crate::args::RunArgs;
use crate::{app, render, ui};

pub async fn run(args: RunArgs) -> Result<()> {
    let settings = Settings::load();
    let interactive = ui::is_interactive();

    let url = match args.url.clone() {
        Some(url) => url,
        None if interactive => ui::input("YouTube URL", None)?,
        None => bail!("No URL given. Usage: tubeflow <URL>"),
    };
    if url.trim().is_empty() {
        bail!("No URL given. Usage: tubeflow <URL>");
    }

    let mut app = App::new(backend_from_settings(&settings));
    let Some(pending) = app.begin_submit(&url) else {
        let message = app.state().error.clone().unwrap_or_default();
        bail!(message);
    };
    verbose!("Extracted video ID {}", pending.id);

    let want_summary = settings.summary.enabled && !args.no_summary;
    if want_summary && settings.summary.api_key().is_none() {
        let provider = settings.summary.provider;
        ui::info(&format!(
            "No {} API key configured. Run 'tubeflow setup' or set {}.",
            provider.display_name(),
            provider.api_key_env_var()
        ));
    }

    let (summary, details) = {
        let backend = app.backend();
        let summary_task = async {
            if want_summary {
                Some(backend.summarize(&pending.url).await)
            } else {
                None
            }
        };
        let details_task = async {
            if settings.metadata.oembed {
                fetch_details(&pending.id).await
            } else {
                None
            }
        };
        ui::with_spinner("Analyzing video...", async {
            tokio::join!(summary_task, details_task)
        })
        .await
    };

    let video = app
        .complete(pending, summary, details)
        .video
        .clone()
        .context("No video to show")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&video)?);
    } else {
        ui::header("TubeFlow");
        print!("{}", render::preview(&video));
        if let Some(note) = render::sources_note(settings.summary.provider, &video) {
            ui::info(&note);
        }
    }

    if !offers_download(&args, interactive) {
        return Ok(());
    }

    download(&settings, &args, &video, interactive).await
}

/// Whether the download step runs after the preview.
///
/// Piped `--json` output without a quality stops after the JSON document,
/// since the fallback grid would land on the same stdout.
fn offers_download(args: &RunArgs, interactive: bool) -> bool {
    if args.no_download {
        return false;
    }
    !(args.json && !interactive && args.quality.is_none())
}

async fn download(
    settings: &Settings,
    args: &RunArgs,
    video: &VideoMetadata,
    interactive: bool,
) -> Result<()> {
    let format = match args.format {
        Some(format) => format,
        None if interactive && args.quality.is_none() => {
            println!();
            let captions: Vec<&str> = DownloadFormat::all().iter().map(|f| f.caption()).collect();
            DownloadFormat::all()[ui::select("Format", &captions, Some(0))?]
        }
        None => DownloadFormat::default(),
    };

    let options = quality_options(format);
    let mut tracker = DownloadTracker::new();

    let option: &QualityOption = match args.quality.as_deref() {
        Some(query) => find_option(format, query).with_context(|| {
            let codes: Vec<String> = options.iter().map(|o| o.code()).collect();
            format!(
                "Unknown {} quality '{}'. Use 1-{} or one of: {}",
                format,
                query,
                options.len(),
                codes.join(", ")
            )
        })?,
        None if interactive => {
            let rows: Vec<String> = options
                .iter()
                .map(|o| render::option_row(o, format, &tracker))
                .collect();
            &options[ui::select("Download", &rows, Some(0))?]
        }
        None => {
            // Nobody to ask: show the grid and stop
            println!();
            print!("{}", render::grid(format, options, &tracker));
            return Ok(());
        }
    };

    let mode = args.mode.unwrap_or(settings.download.mode);
    let action = settings.download.action_for(mode);

    let outcome = ui::with_spinner(
        &format!("Processing {} {}...", option.label, format),
        action.run(&mut tracker, &video.id, format, option),
    )
    .await?;

    match outcome {
        DownloadOutcome::Saved(path) => {
            ui::success(&format!(
                "{} {} saved to {}",
                option.label,
                format,
                path.display()
            ));
            ui::info("This is a simulated download: the file is a text placeholder.");
        }
        DownloadOutcome::Redirect(url) => {
            ui::info(&format!("Continue on the conversion site: {url}"));
            if settings.download.open_browser && interactive {
                if let Err(e) = app::open_in_browser(&url) {
                    ui::error(&format!("{e:#}"));
                }
            }
        }
    }

    Ok(())
}
