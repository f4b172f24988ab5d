// src/api/mod.rs
//! MediaWiki API interaction: the ability to read from a wiki.
//!
//! I/O (`client`), parsing (`parser`) and continuation (`pagination`) are
//! kept apart; traversal code only ever sees the `WikiRepository` trait.

pub mod cache;
pub mod client;
mod pagination;
pub mod parser;
mod responses;
pub mod types;

use crate::constants::CATEGORY_MEMBERS_LIMIT;
use crate::error::AppError;
use crate::types::{NamespaceTable, Page, Title};
use types::{QueryParams, QueryResponse};

/// The ability to query a wiki.
///
/// Implementors provide `execute`; namespace and category-member lookups
/// are built on top of it and may be overridden by implementations that
/// have a cheaper source (tests, fixtures).
#[async_trait::async_trait]
pub trait WikiRepository: Send + Sync {
    /// Executes one API request and returns its decoded envelope.
    async fn execute(&self, params: &QueryParams) -> Result<QueryResponse, AppError>;

    /// Fetches the site's namespace table.
    ///
    /// `Ok(None)` means the site answered but without a namespace table.
    async fn query_namespaces(&self) -> Result<Option<NamespaceTable>, AppError> {
        let params = QueryParams::query()
            .with("meta", "siteinfo")
            .with("siprop", "namespaces");
        let response = self.execute(&params).await?;
        Ok(parser::parse_namespaces(&response))
    }

    /// Members requested per batch; `None` asks for the server maximum.
    fn member_batch_size(&self) -> Option<u32> {
        None
    }

    /// Lists every direct member of `category`, resolving continuation.
    async fn list_category_members(&self, category: &Title) -> Result<Vec<Page>, AppError> {
        let params = category_members_params(category, self.member_batch_size());
        let result =
            pagination::fetch_all_continued(self, &params, parser::parse_category_members)
                .await?;
        log::debug!(
            "{} has {} members ({} requests)",
            category,
            result.items.len(),
            result.requests_made
        );
        Ok(result.items)
    }
}

/// Request for the first batch of a category's members.
pub fn category_members_params(category: &Title, batch_size: Option<u32>) -> QueryParams {
    let limit = batch_size.map_or_else(|| CATEGORY_MEMBERS_LIMIT.to_string(), |n| n.to_string());
    QueryParams::query()
        .with("list", "categorymembers")
        .with("cmtitle", category.as_str())
        .with("cmprop", "ids|title|type")
        .with("cmlimit", limit)
}

// Re-export the public interface
pub use cache::CachedWikiClient;
pub use client::MediaWikiHttpClient;
