// src/types/title.rs
//! Page identity: normalized titles and the pages they name.

use super::{NamespaceId, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Characters MediaWiki never allows inside a title.
const ILLEGAL_TITLE_CHARS: &[char] = &['#', '<', '>', '[', ']', '|', '{', '}'];

/// Prefix of every title in the category namespace.
pub const CATEGORY_PREFIX: &str = "Category:";

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_]+").expect("separator pattern is valid"));

/// A normalized page title.
///
/// Normalization follows MediaWiki's display form: underscores and runs of
/// whitespace become a single space and the ends are trimmed. Titles typed
/// by a user also get their first character upper-cased; titles reported
/// by the API keep their case, since the wiki has already applied its own
/// per-namespace case rule. Two titles are equal iff their text is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Normalizes and validates a title typed by a user.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self(upper_first(&normalize(raw.as_ref())?)))
    }

    /// Accepts a title exactly as the API reported it, apart from
    /// separator cleanup. `iPhone` on a case-sensitive namespace stays
    /// `iPhone`.
    pub fn from_api(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        normalize(raw.as_ref()).map(Self)
    }

    /// Same page name under a different namespace prefix.
    pub fn with_prefix(&self, prefix: &str) -> Result<Self, ValidationError> {
        Self::from_api(format!("{}:{}", prefix, self.without_namespace()))
    }

    /// Builds a title in the category namespace, adding the prefix if missing.
    pub fn category(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let title = Self::new(name)?;
        if title.is_category_title() {
            Ok(title)
        } else {
            Self::new(format!("{}{}", CATEGORY_PREFIX, title.0))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the text carries the `Category:` prefix.
    pub fn is_category_title(&self) -> bool {
        self.0.starts_with(CATEGORY_PREFIX)
    }

    /// The title without its namespace prefix, if it has one.
    pub fn without_namespace(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, rest)) if !rest.is_empty() => rest,
            _ => &self.0,
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Title {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Title::new(raw).map_err(serde::de::Error::custom)
    }
}

fn normalize(raw: &str) -> Result<String, ValidationError> {
    let collapsed = SEPARATOR_RUN.replace_all(raw, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("title"));
    }

    if let Some(bad) = trimmed.chars().find(|c| ILLEGAL_TITLE_CHARS.contains(c)) {
        return Err(ValidationError::InvalidTitle {
            title: raw.to_string(),
            reason: format!("contains illegal character '{}'", bad),
        });
    }

    Ok(trimmed.to_string())
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A wiki page as reported by the API.
///
/// Pages are value objects: equality and hashing consider the title only,
/// so a caller-built root category compares equal to the same category
/// coming back from a member listing with its page id filled in.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_id: Option<u64>,
    namespace: NamespaceId,
}

impl Page {
    pub fn new(title: Title, page_id: Option<u64>, namespace: NamespaceId) -> Self {
        Self {
            title,
            page_id,
            namespace,
        }
    }

    /// A category page built by the caller, typically a traversal root.
    pub fn category(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self::new(Title::category(name)?, None, NamespaceId::CATEGORY))
    }

    /// An article page in the main namespace.
    pub fn article(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self::new(Title::new(name)?, None, NamespaceId::MAIN))
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn page_id(&self) -> Option<u64> {
        self.page_id
    }

    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Page {}

impl Hash for Page {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
