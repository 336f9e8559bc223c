use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Asia/Seoul, which has not observed DST since 1988.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base data directory (~/.yt-popular/)
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        std::env::var("YT_POPULAR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".yt-popular")
            })
    })
}

/// Get the .env file path
pub fn env_file_path() -> PathBuf {
    data_dir().join(".env")
}

/// Load environment variables from the data directory's .env file
pub fn load_env() {
    let env_path = env_file_path();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    } else {
        // Try current directory as fallback
        let _ = dotenvy::dotenv();
    }
}

/// Create the data directory if it doesn't exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}

/// Everything the pipeline needs from the environment, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub display_offset: FixedOffset,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            display_offset: default_display_offset(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("YOUTUBE_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(Error::ApiKeyMissing)?;

        let mut config = Config::new(api_key);

        if let Some(base) = lookup("YOUTUBE_API_BASE_URL").filter(|b| !b.trim().is_empty()) {
            config.api_base_url = base.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("YT_POPULAR_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    Error::Config(format!("YT_POPULAR_TIMEOUT_SECS must be a positive integer, got '{}'", raw))
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("YT_POPULAR_UTC_OFFSET_HOURS") {
            config.display_offset = raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(offset_from_hours)
                .ok_or_else(|| {
                    Error::Config(format!("YT_POPULAR_UTC_OFFSET_HOURS must be between -23 and 23, got '{}'", raw))
                })?;
        }

        Ok(config)
    }
}

fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    if !(-23..=23).contains(&hours) {
        return None;
    }
    FixedOffset::east_opt(hours * 3600)
}

fn default_display_offset() -> FixedOffset {
    offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Utc.fix())
}
