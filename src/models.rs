use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for a video's public watch page
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Channel identifier as issued by YouTube (e.g. `UC...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a channel's uploads playlist
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A video's identity and publish time, as listed in an uploads playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VideoItem {
    #[serde(rename = "ID")]
    pub id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
}

impl VideoItem {
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.id)
    }
}

/// Raw statistics for one video. Counts stay as the API's strings until ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsEntry {
    pub id: String,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

/// A video positioned within one ranked result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RankedVideo {
    pub item: VideoItem,
    pub view_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    pub rank: usize,
    pub upload_at: DateTime<FixedOffset>,
}
