// src/lib.rs
//! catwalk library: a MediaWiki API client whose core walks a category tree.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `WikiErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `TraversalConfig`
//! - **Domain types**: `Title`, `Page`, `NamespaceId`, `NamespaceTable`, `ApiUrl`, `UserAgent`
//! - **API client**: `WikiRepository`, `MediaWikiHttpClient`, `CachedWikiClient`
//! - **Traversal**: `CategoryTraverser`, `TraversalEvent`, `NamespaceClassifier`
//! - **Output**: `render_pages`, `deliver`

pub mod api;
pub mod config;
pub mod constants;
mod error;
pub mod output;
pub mod traversal;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result, WikiErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, TraversalConfig};

// --- Domain Types ---
pub use crate::types::{
    ApiUrl, CaseRule, Namespace, NamespaceId, NamespaceTable, Page, Title, UserAgent,
    CATEGORY_PREFIX,
};

// --- API Client ---
pub use crate::api::types::{Continuation, PaginationResult, QueryParams, QueryResponse};
pub use crate::api::{
    category_members_params, CachedWikiClient, MediaWikiHttpClient, WikiRepository,
};

// --- Traversal ---
pub use crate::traversal::{
    CallbackRegistry, CategoryTraverser, NamespaceClassifier, TraversalCallback, TraversalEvent,
};

// --- Output ---
pub use crate::output::{deliver, render_pages, DeliveryTarget, OutputFormat, OutputReport};
