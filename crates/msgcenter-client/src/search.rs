//! Debounced search.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use msgcenter_core::{MessageFilter, MessageType};

use crate::error::Result;
use crate::schedule::Debouncer;
use crate::store::{FetchOutcome, Store};

/// Default quiet period before a search is sent.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Buffers search input and fetches once typing pauses.
#[derive(Debug)]
pub struct SearchController {
    store: Store,
    debouncer: Debouncer,
    value: String,
    dependencies: (MessageType, MessageFilter),
    searching: Arc<AtomicBool>,
}

impl SearchController {
    /// Create a controller bound to the store's current view and filter.
    #[must_use]
    pub fn new(store: Store, delay: Duration) -> Self {
        let snapshot = store.snapshot();
        Self {
            value: snapshot.search_term,
            dependencies: (snapshot.view, snapshot.filter),
            store,
            debouncer: Debouncer::new(delay),
            searching: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current input value, which may not have been searched yet.
    #[must_use]
    pub fn search_value(&self) -> &str {
        &self.value
    }

    /// True while a debounced search request is in flight.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::SeqCst)
    }

    /// True while a search is waiting for the quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record new input and schedule a search after the quiet period.
    ///
    /// Returns false, leaving any pending search alone, when the value is
    /// unchanged.
    pub fn set_search_value(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.value {
            return false;
        }
        self.value = value;
        self.schedule();
        true
    }

    /// Follow a view or filter change.
    ///
    /// Returns true if the dependencies changed and a search was scheduled.
    pub fn set_dependencies(&mut self, view: MessageType, filter: MessageFilter) -> bool {
        let filter = if filter.is_legal_for(view) {
            filter
        } else {
            MessageFilter::All
        };
        if self.dependencies == (view, filter) {
            return false;
        }
        self.dependencies = (view, filter);
        self.store.set_view(view);
        self.store.set_filter(filter);
        self.schedule();
        true
    }

    /// Drop any pending search, reset the term and fetch immediately.
    ///
    /// # Errors
    ///
    /// Returns the failure of the fetch.
    pub async fn clear_search(&mut self) -> Result<FetchOutcome> {
        self.debouncer.cancel();
        self.value.clear();
        self.store.set_search_term("");
        self.store.fetch_messages().await
    }

    fn schedule(&mut self) {
        let store = self.store.clone();
        let term = self.value.clone();
        let searching = Arc::clone(&self.searching);
        self.debouncer.schedule(async move {
            searching.store(true, Ordering::SeqCst);
            store.set_search_term(term);
            if let Err(e) = store.fetch_messages().await {
                debug!(error = %e, "Search fetch failed");
            }
            searching.store(false, Ordering::SeqCst);
        });
    }
}
