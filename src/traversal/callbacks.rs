// src/traversal/callbacks.rs
//! Observers notified as the traversal visits categories and pages.

use crate::error::AppError;
use crate::types::Page;
use std::collections::HashMap;
use std::fmt;

/// What the traversal just did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalEvent {
    /// A sub-category is about to be descended into.
    CategoryVisited,
    /// A leaf page was collected.
    PageVisited,
}

/// A registered observer, called with `(member, parent)`.
///
/// Returning an error aborts the traversal with that error.
pub type TraversalCallback = Box<dyn FnMut(&Page, &Page) -> Result<(), AppError> + Send>;

/// Event kind → observers, in registration order.
#[derive(Default)]
pub struct CallbackRegistry {
    listeners: HashMap<TraversalEvent, Vec<TraversalCallback>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `callback` to the observers of `event`. Registering the same
    /// closure twice means it runs twice.
    pub fn register<F>(&mut self, event: TraversalEvent, callback: F)
    where
        F: FnMut(&Page, &Page) -> Result<(), AppError> + Send + 'static,
    {
        self.listeners
            .entry(event)
            .or_default()
            .push(Box::new(callback));
    }

    /// Calls every observer of `event` in order, stopping at the first error.
    pub fn dispatch(
        &mut self,
        event: TraversalEvent,
        member: &Page,
        parent: &Page,
    ) -> Result<(), AppError> {
        let Some(listeners) = self.listeners.get_mut(&event) else {
            return Ok(());
        };
        for listener in listeners.iter_mut() {
            listener(member, parent)?;
        }
        Ok(())
    }

    pub fn count(&self, event: TraversalEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("category_visited", &self.count(TraversalEvent::CategoryVisited))
            .field("page_visited", &self.count(TraversalEvent::PageVisited))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn dispatches_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CallbackRegistry::new();

        for tag in ["first", "second", "first"] {
            let log = Arc::clone(&log);
            registry.register(TraversalEvent::PageVisited, move |member, parent| {
                log.lock()
                    .unwrap()
                    .push(format!("{}:{}<{}", tag, member, parent));
                Ok(())
            });
        }

        let parent = Page::category("A").unwrap();
        let member = Page::article("P").unwrap();
        registry
            .dispatch(TraversalEvent::PageVisited, &member, &parent)
            .unwrap();
        registry
            .dispatch(TraversalEvent::CategoryVisited, &member, &parent)
            .unwrap();

        assert_eq!(registry.count(TraversalEvent::PageVisited), 3);
        assert_eq!(registry.count(TraversalEvent::CategoryVisited), 0);
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "first:P<Category:A",
                "second:P<Category:A",
                "first:P<Category:A"
            ]
        );
    }

    #[test]
    fn first_error_stops_dispatch() {
        let reached = Arc::new(Mutex::new(false));
        let mut registry = CallbackRegistry::new();

        registry.register(TraversalEvent::CategoryVisited, |_, _| {
            Err(anyhow::anyhow!("stop here").into())
        });
        let flag = Arc::clone(&reached);
        registry.register(TraversalEvent::CategoryVisited, move |_, _| {
            *flag.lock().unwrap() = true;
            Ok(())
        });

        let page = Page::category("A").unwrap();
        let err = registry
            .dispatch(TraversalEvent::CategoryVisited, &page, &page)
            .unwrap_err();

        assert_eq!(err.to_string(), "Internal error: stop here");
        assert!(!*reached.lock().unwrap());
    }
}
