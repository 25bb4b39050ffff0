//! Client error type.
//!
//! HTTP failures are mapped by status the same way for every endpoint:
//! 401 → Unauthorized, 403 → Forbidden, 404 → NotFound, 429 → RateLimited,
//! 5xx → Server.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type FigmaResult<T> = Result<T, FigmaError>;

#[derive(Debug, Error)]
pub enum FigmaError {
    /// HTTP 401: the access token is missing, expired or revoked.
    #[error("unauthorized: check FIGMA_ACCESS_TOKEN")]
    Unauthorized,

    /// HTTP 403: the token cannot read this file.
    #[error("forbidden: the token has no access to this file")]
    Forbidden,

    /// HTTP 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP 429.
    #[error("rate limited")]
    RateLimited { retry_after: Option<Duration> },

    /// HTTP 5xx.
    #[error("server error: status {0}")]
    Server(u16),

    /// Any other non-success status.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    #[error("timeout")]
    Timeout,

    /// DNS/connect/reset and other transport failures.
    #[error("network error: {0}")]
    Network(String),

    /// Body was not the JSON shape we expect.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The API answered 200 with an `err` field set.
    #[error("figma api error: {0}")]
    Api(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FigmaError {
    /// Map a non-success status to an error.
    pub fn from_status(status: u16, what: &str, retry_after: Option<Duration>) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound(what.to_string()),
            429 => Self::RateLimited { retry_after },
            500..=599 => Self::Server(status),
            _ => Self::HttpStatus(status),
        }
    }

    /// Whether repeating the same request could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Server(_) | Self::Timeout | Self::Network(_)
        )
    }
}

impl From<reqwest::Error> for FigmaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }
        if e.is_decode() {
            return Self::InvalidResponse(e.to_string());
        }
        if let Some(status) = e.status() {
            return Self::from_status(status.as_u16(), e.url().map_or("", |u| u.as_str()), None);
        }
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for FigmaError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
