// src/traversal/mod.rs
//! Recursive descent over a wiki's category graph.
//!
//! A descent lists a category's members, collects the plain pages and
//! recurses into sub-categories, notifying registered callbacks along the
//! way. Two pieces of state keep it finite:
//!
//! - the **path**, the chain of categories on the branch being walked;
//!   meeting a category already on it is a loop and aborts the descent
//! - the **visited set**, every category entered so far; meeting one of
//!   those again just skips it
//!
//! After a sub-category's descent returns, the path restarts empty for the
//! remaining siblings. Loops that only close through an already finished
//! branch are therefore skipped via the visited set rather than reported.

pub mod callbacks;
pub mod namespaces;

use crate::api::WikiRepository;
use crate::error::AppError;
use crate::types::{Page, Title};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::Arc;

pub use callbacks::{CallbackRegistry, TraversalCallback, TraversalEvent};
pub use namespaces::NamespaceClassifier;

/// Walks category hierarchies of one wiki.
///
/// The namespace table and the registered callbacks live as long as the
/// traverser; path and visited set exist only for one `descend` call.
pub struct CategoryTraverser {
    repo: Arc<dyn WikiRepository>,
    namespaces: NamespaceClassifier,
    callbacks: CallbackRegistry,
}

impl std::fmt::Debug for CategoryTraverser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryTraverser")
            .field("namespaces", &self.namespaces)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl CategoryTraverser {
    pub fn new(repo: Arc<dyn WikiRepository>) -> Self {
        Self {
            repo,
            namespaces: NamespaceClassifier::new(),
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Registers `callback` for `event`; see [`TraversalCallback`].
    pub fn add_callback<F>(&mut self, event: TraversalEvent, callback: F) -> &mut Self
    where
        F: FnMut(&Page, &Page) -> Result<(), AppError> + Send + 'static,
    {
        self.callbacks.register(event, callback);
        self
    }

    pub fn namespaces(&self) -> &NamespaceClassifier {
        &self.namespaces
    }

    /// Returns every non-category page below `root`.
    ///
    /// A root given with the canonical `Category:` prefix is renamed to the
    /// wiki's local prefix first, so callbacks and loop paths report it the
    /// way the wiki's own listings do.
    ///
    /// A page reachable through several categories appears once per
    /// category that lists it. Fails with [`AppError::CategoryLoop`] when a
    /// category turns up again on the branch that led to it; any collaborator
    /// or callback error aborts the descent as-is.
    pub async fn descend(&mut self, root: &Page) -> Result<Vec<Page>, AppError> {
        self.namespaces.ensure_loaded(self.repo.as_ref()).await?;
        let root = self.namespaces.localize(root);
        log::info!("Descending into {}", root);

        let mut visited = HashSet::new();
        let pages = self
            .descend_branch(root.clone(), Vec::new(), &mut visited)
            .await?;
        log::info!(
            "Finished {}: {} pages across {} categories",
            root,
            pages.len(),
            visited.len()
        );
        Ok(pages)
    }

    /// One frame of the descent. `path` arrives holding the categories above
    /// `root` on this branch.
    fn descend_branch<'a>(
        &'a mut self,
        root: Page,
        mut path: Vec<Page>,
        visited: &'a mut HashSet<Title>,
    ) -> BoxFuture<'a, Result<Vec<Page>, AppError>> {
        async move {
            visited.insert(root.title().clone());
            path.push(root.clone());

            let members = self.repo.list_category_members(root.title()).await?;
            log::debug!("{}: {} members", root, members.len());

            let mut descendants = Vec::new();
            for member in members {
                if !self.namespaces.is_category(&member) {
                    descendants.push(member.clone());
                    self.callbacks
                        .dispatch(TraversalEvent::PageVisited, &member, &root)?;
                    continue;
                }

                if path.contains(&member) {
                    path.push(member);
                    return Err(AppError::CategoryLoop { path });
                }

                if visited.contains(member.title()) {
                    log::trace!("{} already visited, skipping", member);
                    continue;
                }

                self.callbacks
                    .dispatch(TraversalEvent::CategoryVisited, &member, &root)?;
                let below = self.descend_branch(member, path, visited).await?;
                descendants.extend(below);
                path = Vec::new();
            }

            Ok(descendants)
        }
        .boxed()
    }
}
