// src/api/parser.rs
//! Turns raw response bodies into `QueryResponse`s and domain types.
//!
//! Parsing is kept apart from I/O so cached bodies and live bodies go
//! through exactly the same code.

use super::client::ApiResponse;
use super::responses::{
    RawCategoryMember, RawEnvelope, RawErrorEnvelope, RawNamespace, ToDomain,
};
use super::types::{Continuation, QueryResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, WikiErrorCode};
use crate::types::{NamespaceTable, Page};
use reqwest::StatusCode;
use serde_json::Value;

/// Parse a raw API response into the response envelope.
///
/// An `error` member becomes `AppError::WikiService` whatever the HTTP
/// status; a failing status without a readable error body falls back to
/// `WikiErrorCode::HttpStatus`.
pub fn parse_api_response(result: ApiResponse<String>) -> Result<QueryResponse, AppError> {
    if result.status.is_success() {
        parse_envelope(&result.data, &result.url)
    } else {
        parse_error_body(&result.data, result.status, &result.url)
    }
}

fn parse_envelope(body: &str, url: &str) -> Result<QueryResponse, AppError> {
    let envelope: RawEnvelope = serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })?;

    if let Some(error) = envelope.error {
        return Err(AppError::WikiService {
            code: WikiErrorCode::from_api_response(&error.code),
            info: error.info,
        });
    }

    if let Some(warnings) = &envelope.warnings {
        log_warnings(warnings);
    }

    let continuation = envelope
        .continuation
        .as_ref()
        .map(Continuation::from_json)
        .filter(|c| !c.is_empty());

    Ok(QueryResponse {
        query: envelope.query,
        continuation,
        batch_complete: envelope.batchcomplete.is_some_and(is_truthy),
        warnings: envelope.warnings,
    })
}

fn parse_error_body(body: &str, status: StatusCode, url: &str) -> Result<QueryResponse, AppError> {
    if let Ok(envelope) = serde_json::from_str::<RawErrorEnvelope>(body) {
        return Err(AppError::WikiService {
            code: WikiErrorCode::from_api_response(&envelope.error.code),
            info: envelope.error.info,
        });
    }

    Err(AppError::WikiService {
        code: WikiErrorCode::from_http_status(status.as_u16()),
        info: format!("HTTP {} from {}", status, url),
    })
}

/// Format version 1 marks flags with `""`, version 2 with `true`.
fn is_truthy(value: Value) -> bool {
    !matches!(value, Value::Bool(false) | Value::Null)
}

/// Logs every module's warning text.
fn log_warnings(warnings: &Value) {
    let Some(modules) = warnings.as_object() else {
        log::warn!("API warning: {}", warnings);
        return;
    };
    for (module, detail) in modules {
        let text = detail
            .get("warnings")
            .or_else(|| detail.get("*"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| detail.to_string());
        log::warn!("API warning from '{}': {}", module, text);
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Extracts `query.categorymembers` as pages, in API order.
pub fn parse_category_members(response: &QueryResponse) -> Result<Vec<Page>, AppError> {
    let members = response
        .query_field("categorymembers")
        .ok_or_else(|| {
            AppError::MalformedResponse("Missing 'query.categorymembers' in response".to_string())
        })?
        .clone();

    let raw: Vec<RawCategoryMember> = serde_json::from_value(members)?;
    raw.into_iter().map(ToDomain::to_domain).collect()
}

/// Extracts `query.namespaces` into a table.
///
/// Returns `None` when the response lacks the structure; individual
/// entries that cannot be read are skipped with a warning.
pub fn parse_namespaces(response: &QueryResponse) -> Option<NamespaceTable> {
    let namespaces = response.query_field("namespaces")?.as_object()?;

    let table = namespaces
        .iter()
        .filter_map(|(key, entry)| {
            let parsed = serde_json::from_value::<RawNamespace>(entry.clone())
                .map_err(AppError::from)
                .and_then(ToDomain::to_domain);
            match parsed {
                Ok(namespace) => Some(namespace),
                Err(e) => {
                    log::warn!("Skipping unreadable namespace entry '{}': {}", key, e);
                    None
                }
            }
        })
        .collect();

    Some(table)
}
