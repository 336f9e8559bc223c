//! In-memory `VideoPlatform` for tests. Records every call it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::models::{ChannelId, PlaylistId, StatisticsEntry, VideoItem};
use crate::youtube::VideoPlatform;

#[derive(Default)]
pub struct StubPlatform {
    channels: HashMap<String, Vec<String>>,
    uploads: HashMap<String, String>,
    items: HashMap<String, Vec<VideoItem>>,
    stats: Vec<StatisticsEntry>,
    failing: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(mut self, query: &str, ids: &[&str]) -> Self {
        self.channels
            .insert(query.to_string(), ids.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn with_uploads(mut self, channel: &str, playlist: &str) -> Self {
        self.uploads.insert(channel.to_string(), playlist.to_string());
        self
    }

    pub fn with_items(mut self, playlist: &str, items: Vec<VideoItem>) -> Self {
        self.items.insert(playlist.to_string(), items);
        self
    }

    pub fn with_stats(mut self, stats: Vec<StatisticsEntry>) -> Self {
        self.stats = stats;
        self
    }

    /// Make the named endpoint (`search`, `channels`, `playlistItems`, `videos`) fail
    pub fn failing_on(mut self, endpoint: &'static str) -> Self {
        self.failing = Some(endpoint);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str, detail: String) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{}:{}", endpoint, detail));
        if self.failing == Some(endpoint) {
            return Err(Error::Upstream(format!("{} request failed (503): stub", endpoint)));
        }
        Ok(())
    }
}

#[async_trait]
impl VideoPlatform for StubPlatform {
    async fn search_channels(&self, query: &str) -> Result<Vec<ChannelId>> {
        self.record("search", query.to_string())?;
        Ok(self
            .channels
            .get(query)
            .map(|ids| ids.iter().map(ChannelId::new).collect())
            .unwrap_or_default())
    }

    async fn uploads_playlists(&self, channel: &ChannelId) -> Result<Vec<PlaylistId>> {
        self.record("channels", channel.to_string())?;
        Ok(self
            .uploads
            .get(channel.as_str())
            .map(|p| vec![PlaylistId::new(p.clone())])
            .unwrap_or_default())
    }

    async fn playlist_items(&self, playlist: &PlaylistId, max_results: u32) -> Result<Vec<VideoItem>> {
        self.record("playlistItems", format!("{}:{}", playlist, max_results))?;
        Ok(self
            .items
            .get(playlist.as_str())
            .map(|items| items.iter().take(max_results as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<StatisticsEntry>> {
        self.record("videos", video_ids.join(","))?;
        Ok(self
            .stats
            .iter()
            .filter(|entry| video_ids.contains(&entry.id))
            .cloned()
            .collect())
    }
}

/// A video published `hours_ago` hours before `now`
pub fn item_aged(id: &str, now: DateTime<Utc>, hours_ago: i64) -> VideoItem {
    VideoItem {
        id: id.to_string(),
        title: format!("Video {}", id),
        published_at: now - Duration::hours(hours_ago),
    }
}

pub fn stats(id: &str, view_count: &str) -> StatisticsEntry {
    StatisticsEntry {
        id: id.to_string(),
        view_count: Some(view_count.to_string()),
        like_count: None,
    }
}
