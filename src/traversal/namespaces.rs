// src/traversal/namespaces.rs
//! Lazily loaded namespace table used to tell categories from pages.

use crate::api::WikiRepository;
use crate::constants::CATEGORY_NAMESPACE_CANONICAL;
use crate::error::AppError;
use crate::types::{NamespaceId, NamespaceTable, Page};

/// Where the classifier is in its one-shot fetch.
#[derive(Debug, Clone, Default)]
enum NamespaceState {
    #[default]
    Unloaded,
    Loaded(NamespaceTable),
    /// The site answered without a namespace table. Never retried.
    Unavailable,
}

/// Decides whether a page lives in the canonical `Category` namespace.
///
/// The table is fetched on the first `ensure_loaded` and kept for the
/// classifier's lifetime. A response without the table is remembered as
/// such, and from then on nothing classifies as a category. A failed
/// request leaves the classifier unloaded and the error goes to the caller.
#[derive(Debug, Default)]
pub struct NamespaceClassifier {
    state: NamespaceState,
}

impl NamespaceClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A classifier that already holds `table` and never queries the wiki.
    pub fn with_table(table: NamespaceTable) -> Self {
        Self {
            state: NamespaceState::Loaded(table),
        }
    }

    /// Fetches the namespace table unless a previous fetch completed.
    pub async fn ensure_loaded(&mut self, repo: &dyn WikiRepository) -> Result<(), AppError> {
        if !matches!(self.state, NamespaceState::Unloaded) {
            return Ok(());
        }

        self.state = match repo.query_namespaces().await? {
            Some(table) => {
                log::debug!("Loaded {} namespaces", table.len());
                NamespaceState::Loaded(table)
            }
            None => {
                log::warn!(
                    "Site info carried no namespace table; no member will be treated as a category"
                );
                NamespaceState::Unavailable
            }
        };
        Ok(())
    }

    /// True once a fetch has completed, with or without a table.
    pub fn is_loaded(&self) -> bool {
        !matches!(self.state, NamespaceState::Unloaded)
    }

    pub fn table(&self) -> Option<&NamespaceTable> {
        match &self.state {
            NamespaceState::Loaded(table) => Some(table),
            _ => None,
        }
    }

    /// True iff the table has `id` with canonical name exactly `Category`.
    pub fn is_category_namespace(&self, id: NamespaceId) -> bool {
        self.table()
            .and_then(|table| table.canonical_name(id))
            .is_some_and(|name| name == CATEGORY_NAMESPACE_CANONICAL)
    }

    pub fn is_category(&self, page: &Page) -> bool {
        self.is_category_namespace(page.namespace())
    }

    /// The category namespace's name as it appears in this wiki's titles.
    pub fn local_category_name(&self) -> Option<&str> {
        self.table()?
            .iter()
            .find(|ns| ns.canonical.as_deref() == Some(CATEGORY_NAMESPACE_CANONICAL))
            .map(|ns| ns.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Swaps a canonical `Category:` prefix for the local one, so a
    /// caller-built page compares equal to the same page in a listing.
    /// Anything else comes back unchanged.
    pub fn localize(&self, page: &Page) -> Page {
        let Some(local) = self.local_category_name() else {
            return page.clone();
        };
        if local == CATEGORY_NAMESPACE_CANONICAL
            || !self.is_category(page)
            || !page.title().is_category_title()
        {
            return page.clone();
        }

        match page.title().with_prefix(local) {
            Ok(title) => Page::new(title, page.page_id(), page.namespace()),
            Err(e) => {
                log::warn!("Keeping {} as is: {}", page, e);
                page.clone()
            }
        }
    }
}
