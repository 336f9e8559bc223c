use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not set. Run `yt-popular init` to configure.")]
    ApiKeyMissing,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No videos were uploaded in the requested time window")]
    NoCandidates,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YouTube API error: {0}")]
    Upstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse classification front ends use to pick a recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NoCandidates,
    Upstream,
    InvalidInput,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::NoCandidates => ErrorKind::NoCandidates,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Upstream(_) | Error::Http(_) | Error::Json(_) | Error::ApiKeyMissing => {
                ErrorKind::Upstream
            }
            Error::Config(_) | Error::Io(_) => ErrorKind::Internal,
        }
    }

    pub fn code_str(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "not_found",
            ErrorKind::NoCandidates => "no_candidates",
            ErrorKind::Upstream => "upstream_error",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Internal => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
