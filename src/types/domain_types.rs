// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// Location of a wiki's `api.php` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Parses and validates an endpoint URL.
    ///
    /// A bare site URL such as `https://en.wikipedia.org` is completed to
    /// `https://en.wikipedia.org/w/api.php`.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let mut parsed = Url::parse(url).map_err(|e| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        if parsed.query().is_some() {
            return Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: "Endpoint must not carry query parameters".to_string(),
            });
        }

        if parsed.path() == "/" || parsed.path().is_empty() {
            parsed.set_path("/w/api.php");
        }

        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Host name, used to namespace cache entries per wiki.
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or("localhost")
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The `User-Agent` sent with every request.
///
/// Wikimedia sites reject anonymous clients, so the agent must name the tool
/// and give some way to reach its operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent(String);

impl UserAgent {
    pub fn new(agent: impl Into<String>) -> Result<Self, ValidationError> {
        let agent = agent.into();
        let agent = agent.trim();

        if agent.is_empty() {
            return Err(ValidationError::InvalidUserAgent {
                reason: "User agent cannot be empty".to_string(),
            });
        }

        if agent.chars().any(|c| c.is_control()) {
            return Err(ValidationError::InvalidUserAgent {
                reason: "User agent cannot contain control characters".to_string(),
            });
        }

        Ok(Self(agent.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        Self(format!(
            "catwalk/{} (https://github.com/catwalk-rs/catwalk)",
            env!("CARGO_PKG_VERSION")
        ))
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
