//! Recent-upload ranking: channel name → channel id → uploads playlist →
//! videos inside the recency window → statistics → ranked list.
//!
//! Stages run strictly in order and every failure propagates to the caller.
//! The only local recovery is a view count that does not parse, which ranks
//! as zero.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{ChannelId, PlaylistId, RankedVideo, StatisticsEntry, VideoItem};
use crate::youtube::VideoPlatform;

#[derive(Clone)]
pub struct Pipeline {
    platform: Arc<dyn VideoPlatform>,
    display_offset: FixedOffset,
}

impl Pipeline {
    pub fn new(platform: Arc<dyn VideoPlatform>, display_offset: FixedOffset) -> Self {
        Self {
            platform,
            display_offset,
        }
    }

    /// First channel returned by a channel-type search for `name`
    pub async fn resolve_channel(&self, name: &str) -> Result<ChannelId> {
        let channel = self
            .platform
            .search_channels(name)
            .await?
            .into_iter()
            .next()
            .filter(|id| !id.as_str().is_empty())
            .ok_or_else(|| Error::NotFound(format!("no channel matches '{}'", name)))?;

        debug!(%channel, query = name, "resolved channel");
        Ok(channel)
    }

    /// The channel's uploads playlist
    pub async fn resolve_uploads_collection(&self, channel: &ChannelId) -> Result<PlaylistId> {
        let playlist = self
            .platform
            .uploads_playlists(channel)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("channel '{}' has no uploads playlist", channel)))?;

        debug!(%channel, %playlist, "resolved uploads playlist");
        Ok(playlist)
    }

    /// Items from one page of `collection` published within the last `recency_hours`
    pub async fn list_recent_items(
        &self,
        collection: &PlaylistId,
        max_results: u32,
        recency_hours: u32,
    ) -> Result<Vec<VideoItem>> {
        if max_results == 0 {
            return Err(Error::InvalidInput("result count must be at least 1".to_string()));
        }

        let items = self.platform.playlist_items(collection, max_results).await?;
        let listed = items.len();
        let recent = filter_recent(items, Utc::now(), recency_hours);

        debug!(%collection, listed, kept = recent.len(), recency_hours, "filtered playlist items");
        Ok(recent)
    }

    /// Fetch statistics for `items` in one call and rank them by views
    pub async fn rank_by_views(&self, items: &[VideoItem]) -> Result<Vec<RankedVideo>> {
        if items.is_empty() {
            return Err(Error::NoCandidates);
        }

        let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        let stats = self.platform.video_statistics(&ids).await?;

        Ok(rank_items(items, stats, self.display_offset))
    }

    /// Stages 2–4 for a known channel id
    pub async fn recent_popular(
        &self,
        channel: &ChannelId,
        max_results: u32,
        recency_hours: u32,
    ) -> Result<Vec<RankedVideo>> {
        let playlist = self.resolve_uploads_collection(channel).await?;
        let recent = self.list_recent_items(&playlist, max_results, recency_hours).await?;
        let ranked = self.rank_by_views(&recent).await?;

        info!(%channel, videos = ranked.len(), recency_hours, "ranked recent uploads");
        Ok(ranked)
    }

    /// Stages 1–4 starting from a channel name
    pub async fn recent_popular_by_name(
        &self,
        name: &str,
        max_results: u32,
        recency_hours: u32,
    ) -> Result<Vec<RankedVideo>> {
        let channel = self.resolve_channel(name).await?;
        self.recent_popular(&channel, max_results, recency_hours).await
    }
}

/// Parse a caller-supplied result count (must be at least 1)
pub fn parse_result_count(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| Error::InvalidInput(format!("count must be a positive whole number, got '{}'", raw)))
}

/// Parse a caller-supplied recency window in hours
pub fn parse_recency_hours(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidInput(format!("hour must be a non-negative whole number, got '{}'", raw)))
}

/// Keep items whose age at `now` is at most `recency_hours`, in listing order.
///
/// Items dated after `now` have a negative age and are kept.
pub fn filter_recent(items: Vec<VideoItem>, now: DateTime<Utc>, recency_hours: u32) -> Vec<VideoItem> {
    let window = Duration::hours(i64::from(recency_hours));
    items
        .into_iter()
        .filter(|item| now.signed_duration_since(item.published_at) <= window)
        .collect()
}

/// View counts arrive as strings; anything unparsable counts as zero.
pub fn parse_view_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok()).unwrap_or(0)
}

/// Join statistics onto `items`, sort by views descending and assign ranks.
///
/// Every input item appears exactly once in the output. Items the statistics
/// response omits get zero views. Equal view counts keep input order.
pub fn rank_items(
    items: &[VideoItem],
    stats: Vec<StatisticsEntry>,
    display_offset: FixedOffset,
) -> Vec<RankedVideo> {
    let mut by_id: HashMap<String, StatisticsEntry> = HashMap::with_capacity(stats.len());
    for entry in stats {
        by_id.entry(entry.id.clone()).or_insert(entry);
    }

    let mut ranked: Vec<RankedVideo> = items
        .iter()
        .map(|item| {
            let entry = by_id.get(&item.id);
            if entry.is_none() {
                warn!(video_id = %item.id, "no statistics returned, ranking with zero views");
            }

            let raw_views = entry.and_then(|e| e.view_count.as_deref());
            let view_count = parse_view_count(raw_views);
            if view_count == 0 && raw_views.is_some_and(|v| v.trim().parse::<u64>().is_err()) {
                warn!(video_id = %item.id, raw = raw_views.unwrap_or_default(), "unparsable view count, using 0");
            }

            let like_count = entry
                .and_then(|e| e.like_count.as_deref())
                .and_then(|v| v.trim().parse::<u64>().ok());

            RankedVideo {
                item: item.clone(),
                view_count,
                like_count,
                rank: 0,
                upload_at: item.published_at.with_timezone(&display_offset),
            }
        })
        .collect();

    // sort_by is stable, so ties stay in listing order
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));

    for (i, video) in ranked.iter_mut().enumerate() {
        video.rank = i + 1;
    }

    ranked
}
