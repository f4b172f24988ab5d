// src/constants.rs
//! Domain constants that define the operational boundaries of the client.

// ---------------------------------------------------------------------------
// MediaWiki API boundaries
// ---------------------------------------------------------------------------

/// Member listing batch size. `max` lets the server pick its own ceiling
/// (500 for anonymous clients, 5000 for bots).
pub const CATEGORY_MEMBERS_LIMIT: &str = "max";

/// Bounds accepted for an explicit per-request batch size.
pub const MIN_MEMBER_BATCH_SIZE: u32 = 1;
pub const MAX_MEMBER_BATCH_SIZE: u32 = 5000;

/// Response layout requested on every call.
pub const API_FORMAT_VERSION: &str = "2";

/// Canonical (language-independent) name of the category namespace.
pub const CATEGORY_NAMESPACE_CANONICAL: &str = "Category";

/// Upper bound on continuation round-trips for a single listing.
///
/// A category with more members than this many batches is a runaway
/// continuation, not real data.
pub const MAX_CONTINUATION_ROUNDS: u32 = 10_000;

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Per-request timeout applied by the HTTP client.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
