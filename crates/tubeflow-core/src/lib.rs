pub mod app;
pub mod config;
pub mod download;
pub mod http;
pub mod metadata;
pub mod settings;
pub mod summary;
pub mod verbose;
pub mod video;

pub use app::{App, Phase, PendingSubmission, ViewState};
pub use config::SummaryProvider;
pub use download::{
    DownloadAction, DownloadError, DownloadFormat, DownloadMode, DownloadOutcome, DownloadTracker,
    Quality, QualityOption, find_option, quality_options,
};
pub use settings::Settings;
pub use summary::{GeminiBackend, OpenAIBackend, SummaryBackend, VideoSummary, backend_from_settings};
pub use verbose::set_verbose;
pub use video::{VideoId, VideoMetadata, VideoSource, extract_video_id, thumbnail_url};
