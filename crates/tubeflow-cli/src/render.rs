//! Text rendering of the preview card and the download grid.
//!
//! Functions return strings so the layout can be tested without a terminal.

use console::style;
use tubeflow_core::{
    DownloadFormat, DownloadTracker, QualityOption, SummaryProvider, VideoMetadata,
};

pub fn preview(video: &VideoMetadata) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", style(&video.title).bold()));
    out.push_str(&format!(
        "{} {}  {}\n",
        style("YT").on_red().white().bold(),
        video.author,
        style(&video.duration).dim()
    ));
    out.push_str(&format!(
        "{} {}\n",
        style("Thumbnail:").dim(),
        video.thumbnail_url
    ));

    if let Some(summary) = &video.ai_summary {
        out.push('\n');
        out.push_str(&format!("{}\n", style("AI summary:").magenta().bold()));
        out.push_str(&format!("  \"{}\"\n", style(summary).italic()));
    }

    if !video.sources.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", style("Sources:").dim()));
        for (i, source) in video.sources.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} {}\n",
                i + 1,
                source.title,
                style(format!("<{}>", source.uri)).dim()
            ));
        }
    }

    out
}

/// Explains an empty source list when the provider cannot cite the web
pub fn sources_note(provider: SummaryProvider, video: &VideoMetadata) -> Option<String> {
    if video.ai_summary.is_none() || !video.sources.is_empty() || provider.supports_sources() {
        return None;
    }
    Some(format!(
        "{} summaries are not search-grounded, so no sources are listed.",
        provider.display_name()
    ))
}

/// One grid row: label, size and extension, plus a marker for the active option
pub fn option_row(option: &QualityOption, format: DownloadFormat, tracker: &DownloadTracker) -> String {
    let status = if tracker.is_downloading(option.label) {
        format!("  {}", style("Processing...").red())
    } else {
        String::new()
    };
    format!(
        "{:<20} {:>7} • .{}{}",
        option.label,
        option.size,
        format.extension(),
        status
    )
}

pub fn grid(format: DownloadFormat, options: &[QualityOption], tracker: &DownloadTracker) -> String {
    let mut out = format!("{}\n", style(format.caption()).bold());
    for (i, option) in options.iter().enumerate() {
        let row = option_row(option, format, tracker);
        let row = if tracker.is_enabled() || tracker.is_downloading(option.label) {
            row
        } else {
            style(row).dim().to_string()
        };
        out.push_str(&format!("  {}. {}\n", i + 1, row));
    }
    out
}
