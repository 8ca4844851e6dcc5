//! Settings for fetching real video details.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSettings {
    /// Look up title and channel through YouTube's oEmbed endpoint
    #[serde(default)]
    pub oembed: bool,
}
