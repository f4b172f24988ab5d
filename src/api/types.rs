// src/api/types.rs
//! Request and response types shared by every wiki collaborator.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

// --- Request Types ---

/// Ordered parameter mapping for one API request.
///
/// Order is preserved so that the same request always serializes to the
/// same query string, which is what the response cache keys on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: IndexMap<String, String>,
}

impl QueryParams {
    /// An empty mapping; the caller supplies `action` itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping preset with `action=query`.
    pub fn query() -> Self {
        Self::new().with("action", "query")
    }

    /// Returns the mapping with `key` set to `value`, replacing any earlier value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The API module being called (`query`, `parse`, ...).
    pub fn action(&self) -> Option<&str> {
        self.get("action")
    }

    /// Returns a copy of these params with the continuation fields merged in.
    pub fn continued(&self, continuation: &Continuation) -> Self {
        let mut next = self.clone();
        for (key, value) in continuation.iter() {
            next.set(key, value);
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stable textual form, `key=value` pairs joined by `&` in insertion order.
    pub fn canonical_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

// --- Response Types ---

/// The `continue` object of a response: the fields to send back verbatim
/// to obtain the next batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Continuation {
    fields: IndexMap<String, String>,
}

impl Continuation {
    /// Builds a continuation from the raw JSON object; scalar values are
    /// stringified, anything else is dropped.
    pub fn from_json(object: &serde_json::Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect();
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A successfully decoded API response envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    /// The `query` payload, when the action produced one.
    pub query: Option<Value>,
    /// Fields to send back for the next batch; `None` when the listing is done.
    pub continuation: Option<Continuation>,
    pub batch_complete: bool,
    /// Raw `warnings` object, already logged by the parser.
    pub warnings: Option<Value>,
}

impl QueryResponse {
    /// A response whose `query` member is `query`, with no continuation.
    pub fn complete(query: Value) -> Self {
        Self {
            query: Some(query),
            continuation: None,
            batch_complete: true,
            warnings: None,
        }
    }

    /// Looks up `query.<key>`.
    pub fn query_field(&self, key: &str) -> Option<&Value> {
        self.query.as_ref().and_then(|q| q.get(key))
    }
}

// --- Pagination Types ---

/// Result of resolving every continuation of a listing.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub requests_made: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_keep_insertion_order() {
        let params = QueryParams::query()
            .with("list", "categorymembers")
            .with("cmtitle", "Category:A")
            .with("list", "allpages");
        assert_eq!(
            params.canonical_string(),
            "action=query&list=allpages&cmtitle=Category:A"
        );
        assert_eq!(params.action(), Some("query"));
    }

    #[test]
    fn test_continuation_merges_into_params() {
        let raw = json!({ "cmcontinue": "page|4142|77", "continue": "-||", "offset": 50 });
        let continuation = Continuation::from_json(raw.as_object().unwrap());

        let base = QueryParams::query().with("cmtitle", "Category:A");
        let next = base.continued(&continuation);

        assert_eq!(next.get("cmcontinue"), Some("page|4142|77"));
        assert_eq!(next.get("continue"), Some("-||"));
        assert_eq!(next.get("offset"), Some("50"));
        assert_eq!(base.get("cmcontinue"), None);
    }
}
