//! HTTP front end over the ranking pipeline.
//!
//! Failures of any kind answer 500 with a fixed message; details go to the log.

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::models::{ChannelId, RankedVideo};
use crate::pipeline::{Pipeline, parse_recency_hours, parse_result_count};

const CHANNEL_LOOKUP_FAILED: &str = "Could not find channel information.";
const VIDEO_LOOKUP_FAILED: &str = "Could not find video information.";

pub fn router(pipeline: Pipeline) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/channel", get(get_channel_id))
        .route("/video", get(get_filtered_videos))
        .with_state(pipeline)
}

pub async fn serve(pipeline: Pipeline, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}

pub struct ApiError {
    message: &'static str,
}

impl ApiError {
    fn logged(message: &'static str, err: &Error) -> Self {
        error!(code = err.code_str(), error = %err, "{}", message);
        Self { message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.message })),
        )
            .into_response()
    }
}

async fn index() -> &'static str {
    "Hello, Server!"
}

#[derive(Debug, Deserialize)]
pub struct ChannelQuery {
    #[serde(rename = "channelName", default)]
    channel_name: String,
}

async fn get_channel_id(
    State(pipeline): State<Pipeline>,
    Query(query): Query<ChannelQuery>,
) -> std::result::Result<Json<Value>, ApiError> {
    let channel = pipeline
        .resolve_channel(&query.channel_name)
        .await
        .map_err(|e| ApiError::logged(CHANNEL_LOOKUP_FAILED, &e))?;

    Ok(Json(json!({ "channelID": channel })))
}

#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    #[serde(rename = "channelID", default)]
    channel_id: String,
    #[serde(default)]
    count: String,
    #[serde(default)]
    hour: String,
}

async fn get_filtered_videos(
    State(pipeline): State<Pipeline>,
    Query(query): Query<VideoQuery>,
) -> std::result::Result<Json<Value>, ApiError> {
    let videos = filtered_videos(&pipeline, &query)
        .await
        .map_err(|e| ApiError::logged(VIDEO_LOOKUP_FAILED, &e))?;

    Ok(Json(json!({ "videos": videos })))
}

async fn filtered_videos(pipeline: &Pipeline, query: &VideoQuery) -> Result<Vec<RankedVideo>> {
    let count = parse_result_count(&query.count)?;
    let hours = parse_recency_hours(&query.hour)?;
    pipeline
        .recent_popular(&ChannelId::new(query.channel_id.clone()), count, hours)
        .await
}
