// src/types/namespace.rs
//! The site's namespace table as reported by `meta=siteinfo`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric namespace identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceId(i64);

impl NamespaceId {
    pub const MAIN: NamespaceId = NamespaceId(0);
    pub const CATEGORY: NamespaceId = NamespaceId(14);

    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the first letter of titles in a namespace is treated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseRule {
    #[default]
    FirstLetter,
    CaseSensitive,
}

/// Metadata for one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    pub id: NamespaceId,
    /// Localized name shown in titles on this wiki.
    pub name: String,
    /// Language-independent name; absent for the main namespace on most wikis.
    pub canonical: Option<String>,
    pub case: CaseRule,
}

/// Namespace id → metadata, in the order the site reported them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NamespaceTable {
    entries: IndexMap<NamespaceId, Namespace>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, namespace: Namespace) {
        self.entries.insert(namespace.id, namespace);
    }

    pub fn get(&self, id: NamespaceId) -> Option<&Namespace> {
        self.entries.get(&id)
    }

    pub fn canonical_name(&self, id: NamespaceId) -> Option<&str> {
        self.get(id).and_then(|ns| ns.canonical.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.entries.values()
    }
}

impl FromIterator<Namespace> for NamespaceTable {
    fn from_iter<I: IntoIterator<Item = Namespace>>(iter: I) -> Self {
        let mut table = Self::new();
        for namespace in iter {
            table.insert(namespace);
        }
        table
    }
}
