use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tubeflow_core::{DownloadFormat, DownloadMode, SummaryProvider};

#[derive(Parser, Debug)]
#[command(
    name = "tubeflow",
    version,
    about = "Paste a YouTube link, get a one-line AI summary and download options",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Print diagnostics to stderr (also: TUBEFLOW_VERBOSE=1)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// YouTube link (prompted for when omitted)
    pub url: Option<String>,

    /// Download format tab to show
    #[arg(short, long)]
    pub format: Option<DownloadFormat>,

    /// Quality to download: position in the grid, label, or short code like 720p
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Override the configured download mode
    #[arg(long)]
    pub mode: Option<DownloadMode>,

    /// Skip the AI summary request
    #[arg(long)]
    pub no_summary: bool,

    /// Only show the preview, no download grid
    #[arg(long)]
    pub no_download: bool,

    /// Print the parsed video as JSON instead of the styled preview
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change settings
    Config(ConfigArgs),
    /// Interactive first-time setup
    Setup,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Summary provider (gemini, openai)
    #[arg(long)]
    pub provider: Option<SummaryProvider>,

    /// Save a Gemini API key
    #[arg(long, value_name = "KEY")]
    pub gemini_api_key: Option<String>,

    /// Save an OpenAI API key
    #[arg(long, value_name = "KEY")]
    pub openai_api_key: Option<String>,

    /// Model name for the selected provider (empty string resets)
    #[arg(long)]
    pub model: Option<String>,

    /// Language the summary is written in (empty string resets)
    #[arg(long)]
    pub language: Option<String>,

    /// Turn the AI summary on or off
    #[arg(long, value_name = "BOOL")]
    pub summary: Option<bool>,

    /// Default download mode (simulate, redirect)
    #[arg(long)]
    pub mode: Option<DownloadMode>,

    /// Folder for simulated downloads
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Simulated download delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Base URL of the conversion site used in redirect mode
    #[arg(long, value_name = "URL")]
    pub converter_url: Option<String>,

    /// Open redirect links in the browser
    #[arg(long, value_name = "BOOL")]
    pub open_browser: Option<bool>,

    /// Look up real titles through YouTube oEmbed
    #[arg(long, value_name = "BOOL")]
    pub oembed: Option<bool>,

    /// Print current settings (API keys masked)
    #[arg(long)]
    pub show: bool,

    /// Print the settings file location
    #[arg(long)]
    pub path: bool,
}
