use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{ChannelId, PlaylistId, StatisticsEntry, VideoItem};

/// The four lookups the ranking pipeline needs from a video platform.
///
/// Each method is a single round trip. Implementations must not retry.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Channel ids matching a free-text query, best match first
    async fn search_channels(&self, query: &str) -> Result<Vec<ChannelId>>;

    /// Uploads playlist ids for a channel (at most one in practice)
    async fn uploads_playlists(&self, channel: &ChannelId) -> Result<Vec<PlaylistId>>;

    /// One page of playlist items in listing order
    async fn playlist_items(&self, playlist: &PlaylistId, max_results: u32) -> Result<Vec<VideoItem>>;

    /// Statistics for a batch of video ids
    async fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<StatisticsEntry>>;
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    id: SearchResultId,
    #[serde(default)]
    snippet: SearchSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelResource {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemResource {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    #[serde(default)]
    title: String,
    published_at: DateTime<Utc>,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoResource {
    id: String,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// `error.message` from a Google API error body, else the body cut to a readable length
fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error.message;
    }

    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_DETAIL_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_DETAIL_CHARS).collect();
    cut.push_str("...");
    cut
}

/// YouTube Data API v3 client
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base}/{endpoint}` with the API key appended and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        debug!(endpoint, "YouTube API request");

        // without_url() keeps the key out of error messages
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "{} request failed ({}): {}",
                endpoint,
                status,
                error_detail(&text)
            )));
        }

        let body = response.text().await.map_err(|e| Error::Http(e.without_url()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_channels(&self, query: &str) -> Result<Vec<ChannelId>> {
        let response: ListResponse<SearchResult> = self
            .get_json("search", &[("part", "snippet"), ("type", "channel"), ("q", query)])
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| item.id.channel_id.or(item.snippet.channel_id).unwrap_or_default())
            .map(ChannelId::new)
            .collect())
    }

    async fn uploads_playlists(&self, channel: &ChannelId) -> Result<Vec<PlaylistId>> {
        let response: ListResponse<ChannelResource> = self
            .get_json("channels", &[("part", "contentDetails"), ("id", channel.as_str())])
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| PlaylistId::new(item.content_details.related_playlists.uploads))
            .collect())
    }

    async fn playlist_items(&self, playlist: &PlaylistId, max_results: u32) -> Result<Vec<VideoItem>> {
        let max_results = max_results.to_string();
        let response: ListResponse<PlaylistItemResource> = self
            .get_json(
                "playlistItems",
                &[
                    ("part", "snippet"),
                    ("playlistId", playlist.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| VideoItem {
                id: item.snippet.resource_id.video_id,
                title: item.snippet.title,
                published_at: item.snippet.published_at,
            })
            .collect())
    }

    async fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<StatisticsEntry>> {
        let ids = video_ids.join(",");
        let response: ListResponse<VideoResource> = self
            .get_json("videos", &[("part", "statistics"), ("id", ids.as_str())])
            .await?;

        Ok(response
            .items
            .into_iter()
            .map(|item| StatisticsEntry {
                id: item.id,
                view_count: item.statistics.view_count,
                like_count: item.statistics.like_count,
            })
            .collect())
    }
}
