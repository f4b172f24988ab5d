// src/api/responses.rs
//! Wire shapes of the MediaWiki JSON responses this client reads.
//!
//! These mirror the API's field names exactly; `ToDomain` turns them into
//! the crate's own types.

use crate::error::AppError;
use crate::types::{CaseRule, Namespace, NamespaceId, Page, Title};
use serde::Deserialize;
use serde_json::Value;

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub error: Option<RawError>,
    #[serde(default, rename = "continue")]
    pub continuation: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub warnings: Option<Value>,
    #[serde(default)]
    pub batchcomplete: Option<Value>,
}

/// The `error` member of a failed request.
#[derive(Debug, Clone, Deserialize)]
pub struct RawError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// Envelope of a non-2xx response, which may or may not carry an `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawErrorEnvelope {
    pub error: RawError,
}

/// One entry of `query.categorymembers`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryMember {
    #[serde(default)]
    pub pageid: Option<u64>,
    pub ns: i64,
    pub title: String,
}

/// One entry of `query.namespaces`.
///
/// Format version 1 puts the local name under `"*"`, version 2 under `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNamespace {
    pub id: i64,
    #[serde(alias = "*", default)]
    pub name: String,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub case: Option<String>,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<Page> for RawCategoryMember {
    fn to_domain(self) -> Result<Page, AppError> {
        let title = Title::from_api(&self.title)?;
        Ok(Page::new(title, self.pageid, NamespaceId::new(self.ns)))
    }
}

impl ToDomain<Namespace> for RawNamespace {
    fn to_domain(self) -> Result<Namespace, AppError> {
        let case = match self.case.as_deref() {
            Some("case-sensitive") => CaseRule::CaseSensitive,
            _ => CaseRule::FirstLetter,
        };
        Ok(Namespace {
            id: NamespaceId::new(self.id),
            name: self.name,
            canonical: self.canonical,
            case,
        })
    }
}
