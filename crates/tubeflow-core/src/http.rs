//! Shared HTTP client.
//!
//! All outbound requests (summary providers, oEmbed) go through one
//! `reqwest::Client` so connections are pooled across a session.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::time::Duration;

/// Default timeout for API requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const USER_AGENT: &str = concat!("tubeflow/", env!("CARGO_PKG_VERSION"));

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the process-wide HTTP client, building it on first use
pub fn get_http_client() -> Result<&'static reqwest::Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")
    })
}
