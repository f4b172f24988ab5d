// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names a failure mode of the client: the wiki refusing a
//! request, a response we could not read, or a traversal that ran into a
//! category loop.

use crate::types::Page;
use std::fmt;
use thiserror::Error;

/// MediaWiki API error codes as a typed vocabulary.
///
/// The API reports failures as `{"error": {"code": ..., "info": ...}}`.
/// The codes this client reacts to get their own variant; everything else
/// is kept verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiErrorCode {
    /// The title is malformed or uses an illegal namespace
    BadTitle,
    /// The requested page does not exist
    MissingTitle,
    /// The category title is not valid for `list=categorymembers`
    InvalidCategory,
    /// The client has been rate limited
    RateLimited,
    /// The replica lag exceeded the `maxlag` parameter
    MaxLag,
    /// Reading the API requires a logged-in user
    ReadApiDenied,
    /// An unrecognized or malformed parameter was passed
    BadParameter,
    /// The API crashed; the code carries the exception class
    InternalApiError(String),
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl WikiErrorCode {
    /// Parse an API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "badtitle" | "invalidtitle" => Self::BadTitle,
            "missingtitle" => Self::MissingTitle,
            "invalidcategory" => Self::InvalidCategory,
            "ratelimited" => Self::RateLimited,
            "maxlag" => Self::MaxLag,
            "readapidenied" => Self::ReadApiDenied,
            "badvalue" | "unknown_action" | "nosuchparameter" | "paramempty" => Self::BadParameter,
            other if other.starts_with("internal_api_error") => {
                Self::InternalApiError(other.to_string())
            }
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::MaxLag | Self::InternalApiError(_) => true,
            Self::HttpStatus(status) => matches!(status, 429 | 500..=599),
            _ => false,
        }
    }
}

impl fmt::Display for WikiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadTitle => write!(f, "badtitle"),
            Self::MissingTitle => write!(f, "missingtitle"),
            Self::InvalidCategory => write!(f, "invalidcategory"),
            Self::RateLimited => write!(f, "ratelimited"),
            Self::MaxLag => write!(f, "maxlag"),
            Self::ReadApiDenied => write!(f, "readapidenied"),
            Self::BadParameter => write!(f, "badparameter"),
            Self::InternalApiError(code) => write!(f, "{}", code),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Wiki API returned an error ({code}): {info}")]
    WikiService { code: WikiErrorCode, info: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Category loop detected: {}", render_path(path))]
    CategoryLoop { path: Vec<Page> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// The closed loop carried by a `CategoryLoop`, if this is one.
    pub fn loop_path(&self) -> Option<&[Page]> {
        match self {
            AppError::CategoryLoop { path } => Some(path),
            _ => None,
        }
    }
}

fn render_path(path: &[Page]) -> String {
    path.iter()
        .map(|page| page.title().as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
