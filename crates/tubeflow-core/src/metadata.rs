//! Real title and channel name via YouTube's oEmbed endpoint.
//!
//! Optional: the preview works with placeholders, so any failure here is
//! logged and reported as `None`.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http::get_http_client;
use crate::verbose;
use crate::video::{VideoId, watch_url};

pub const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

/// Details oEmbed knows about a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
}

/// Look up a video. Returns `None` on any failure.
pub async fn fetch_details(id: &VideoId) -> Option<VideoDetails> {
    fetch_details_from(OEMBED_ENDPOINT, id).await
}

pub async fn fetch_details_from(endpoint: &str, id: &VideoId) -> Option<VideoDetails> {
    match request(endpoint, id).await {
        Ok(details) => Some(details),
        Err(e) => {
            verbose!("oEmbed lookup failed for {}: {e:#}", id);
            None
        }
    }
}

fn oembed_url(endpoint: &str, id: &VideoId) -> Result<url::Url> {
    url::Url::parse_with_params(
        endpoint,
        &[("url", watch_url(id).as_str()), ("format", "json")],
    )
    .context("Invalid oEmbed endpoint")
}

async fn request(endpoint: &str, id: &VideoId) -> Result<VideoDetails> {
    let url = oembed_url(endpoint, id)?;
    verbose!("Fetching video details from {}", url);

    let response = get_http_client()?
        .get(url)
        .send()
        .await
        .context("Failed to reach oEmbed endpoint")?;

    if !response.status().is_success() {
        anyhow::bail!("oEmbed returned {}", response.status());
    }

    let body: OEmbedResponse = response
        .json()
        .await
        .context("Failed to parse oEmbed response")?;

    let clean = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    Ok(VideoDetails {
        title: clean(body.title),
        author: clean(body.author_name),
    })
}
