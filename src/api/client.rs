// src/api/client.rs
//! Pure HTTP client wrapper for a MediaWiki `api.php` endpoint.
//!
//! This module handles the request line and headers only; parsing lives in
//! `parser` and continuation handling in `pagination`.

use super::types::{QueryParams, QueryResponse};
use crate::constants::{API_FORMAT_VERSION, REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::types::{ApiUrl, UserAgent};
use reqwest::{Client, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client bound to one wiki.
#[derive(Clone)]
pub struct MediaWikiHttpClient {
    client: Client,
    endpoint: ApiUrl,
    batch_size: Option<u32>,
}

impl MediaWikiHttpClient {
    /// Creates a new HTTP client for the given endpoint.
    pub fn new(endpoint: ApiUrl, user_agent: &UserAgent) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(user_agent.as_str())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            batch_size: None,
        })
    }

    /// Caps `cmlimit` instead of asking for the server maximum.
    pub fn with_batch_size(mut self, batch_size: Option<u32>) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn endpoint(&self) -> &ApiUrl {
        &self.endpoint
    }

    /// Makes a GET request carrying `params` plus the response-format fields.
    pub async fn get(&self, params: &QueryParams) -> Result<Response, AppError> {
        let pairs = request_pairs(params);
        log::debug!("GET {}?{}", self.endpoint, params);

        let response = self
            .client
            .get(self.endpoint.as_url().clone())
            .query(&pairs)
            .send()
            .await?;

        log::debug!(
            "Response for {} (status: {})",
            params.action().unwrap_or("?"),
            response.status()
        );

        Ok(response)
    }
}

/// Full parameter list sent on the wire: the caller's params followed by
/// the format fields every response is parsed with.
pub(super) fn request_pairs(params: &QueryParams) -> Vec<(&str, &str)> {
    params
        .iter()
        .filter(|(key, _)| *key != "format" && *key != "formatversion")
        .chain([("format", "json"), ("formatversion", API_FORMAT_VERSION)])
        .collect()
}

#[async_trait::async_trait]
impl super::WikiRepository for MediaWikiHttpClient {
    async fn execute(&self, params: &QueryParams) -> Result<QueryResponse, AppError> {
        let response = self.get(params).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_api_response(result)
    }

    fn member_batch_size(&self) -> Option<u32> {
        self.batch_size
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
