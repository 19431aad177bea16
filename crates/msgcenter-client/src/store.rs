//! Request orchestration over the view state.
//!
//! `Store` issues API calls, turns their progress into `Action`s and feeds
//! them to the reducer. Failures are reported once; nothing is retried
//! unless the caller asks for it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;
use tracing::{debug, info};

use msgcenter_core::{
    Directory, Message, MessageFilter, MessageId, MessageQuery, MessageTemplate, MessageType,
    NewMessage, Vendor,
};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::schedule::Throttle;
use crate::state::{Action, MessagesState};

/// What happened to a list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the state.
    Applied,
    /// The fetch came too soon after the previous one and was not sent.
    Throttled,
    /// A newer fetch was dispatched before this one resolved.
    Superseded,
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    state: Mutex<MessagesState>,
    throttle: Mutex<Throttle>,
    directory: Mutex<Directory>,
    next_seq: AtomicU64,
}

/// Shared handle to the client state and the API.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Store {
    /// Create a store over an API client.
    #[must_use]
    pub fn new(api: ApiClient, config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(MessagesState::default()),
                throttle: Mutex::new(Throttle::new(config.fetch_cooldown)),
                directory: Mutex::new(Directory::default()),
                next_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Build the API client and store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(ApiClient::new(config)?, config))
    }

    /// The API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> MessagesState {
        lock(&self.inner.state).clone()
    }

    /// Apply an action to the state.
    pub fn dispatch(&self, action: Action) {
        lock(&self.inner.state).apply(action);
    }

    fn with_state<T>(&self, f: impl FnOnce(&MessagesState) -> T) -> T {
        f(&lock(&self.inner.state))
    }

    /// Switch between inbox and sent. Does not fetch.
    pub fn set_view(&self, view: MessageType) {
        self.dispatch(Action::SetView(view));
    }

    /// Change the status filter. Does not fetch.
    pub fn set_filter(&self, filter: MessageFilter) {
        self.dispatch(Action::SetFilter(filter));
    }

    /// Change the search term. Does not fetch.
    pub fn set_search_term(&self, term: impl Into<String>) {
        self.dispatch(Action::SetSearchTerm(term.into()));
    }

    /// Dismiss the error banner.
    pub fn clear_error(&self) {
        self.dispatch(Action::ClearError);
    }

    /// Fetch the list for the current view, filter and search term.
    ///
    /// # Errors
    ///
    /// Returns the failure of the latest fetch. Failures of superseded
    /// fetches are reported as `FetchOutcome::Superseded`.
    pub async fn fetch_messages(&self) -> Result<FetchOutcome> {
        if !lock(&self.inner.throttle).ready(Instant::now()) {
            debug!("Fetch throttled");
            return Ok(FetchOutcome::Throttled);
        }

        let seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.with_state(|s| MessageQuery {
            kind: s.view,
            filter: s.filter,
            search: s.search_term.clone(),
        });
        self.dispatch(Action::FetchPending { seq });
        debug!(
            seq,
            kind = query.kind.as_str(),
            filter = query.filter.as_str(),
            search = %query.search,
            "Fetching messages"
        );

        let result = self.inner.api.get_messages(&query).await;
        let latest = self.with_state(|s| s.latest_fetch() == seq);
        match result {
            Ok(result) => {
                self.dispatch(Action::FetchFulfilled { seq, result });
                if latest {
                    Ok(FetchOutcome::Applied)
                } else {
                    debug!(seq, "Discarded superseded fetch");
                    Ok(FetchOutcome::Superseded)
                }
            }
            Err(error) => {
                self.dispatch(Action::FetchRejected {
                    seq,
                    error: error.clone(),
                });
                if latest {
                    Err(error)
                } else {
                    Ok(FetchOutcome::Superseded)
                }
            }
        }
    }

    /// Clear the error banner and fetch again.
    ///
    /// # Errors
    ///
    /// Returns the failure of the new fetch.
    pub async fn retry(&self) -> Result<FetchOutcome> {
        self.clear_error();
        self.fetch_messages().await
    }

    /// Select a message for the detail view, marking it read if needed.
    ///
    /// Uses the cached copy when the message is in the current list.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the read update fails.
    pub async fn open_message(&self, id: &MessageId) -> Result<Message> {
        let cached = self.with_state(|s| s.cached(id).cloned());
        let message = if let Some(message) = cached {
            self.dispatch(Action::FetchMessageFulfilled(message.clone()));
            message
        } else {
            self.dispatch(Action::FetchMessagePending);
            match self.inner.api.get_message(id).await {
                Ok(message) => {
                    self.dispatch(Action::FetchMessageFulfilled(message.clone()));
                    message
                }
                Err(error) => {
                    self.dispatch(Action::FetchMessageRejected(error.clone()));
                    return Err(error);
                }
            }
        };

        if message.is_read {
            Ok(message)
        } else {
            self.mark_read(id).await
        }
    }

    /// Leave the detail view.
    pub fn close_message(&self) {
        self.dispatch(Action::ClearSelectedMessage);
    }

    fn settle(&self, result: Result<Message>, on_success: fn(Message) -> Action) -> Result<Message> {
        match result {
            Ok(message) => {
                self.dispatch(on_success(message.clone()));
                Ok(message)
            }
            Err(error) => {
                self.dispatch(Action::MutationRejected(error.clone()));
                Err(error)
            }
        }
    }

    /// Mark a message read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_read(&self, id: &MessageId) -> Result<Message> {
        let result = self.inner.api.mark_read(id).await;
        self.settle(result, Action::MarkReadFulfilled)
    }

    /// Mark a message unread.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn mark_unread(&self, id: &MessageId) -> Result<Message> {
        let result = self.inner.api.mark_unread(id).await;
        self.settle(result, Action::MarkUnreadFulfilled)
    }

    /// Mark a sent message acknowledged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the message is not sent.
    pub async fn acknowledge(&self, id: &MessageId) -> Result<Message> {
        let result = self.inner.api.mark_acknowledged(id).await;
        self.settle(result, Action::AcknowledgementFulfilled)
    }

    /// Mark a sent message unacknowledged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the message is not sent.
    pub async fn unacknowledge(&self, id: &MessageId) -> Result<Message> {
        let result = self.inner.api.mark_unacknowledged(id).await;
        self.settle(result, Action::AcknowledgementFulfilled)
    }

    /// Send a composed message and prepend it to the list.
    ///
    /// # Errors
    ///
    /// Returns the server's validation failure or a transport error.
    pub async fn send(&self, message: &NewMessage) -> Result<Message> {
        self.dispatch(Action::SendPending);
        match self.inner.api.send_message(message).await {
            Ok(sent) => {
                info!("Message sent: {}", sent.subject);
                self.dispatch(Action::SendFulfilled(sent.clone()));
                Ok(sent)
            }
            Err(error) => {
                self.dispatch(Action::SendRejected(error.clone()));
                Err(error)
            }
        }
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &MessageId) -> Result<()> {
        match self.inner.api.delete_message(id).await {
            Ok(()) => {
                self.dispatch(Action::DeleteFulfilled(id.clone()));
                Ok(())
            }
            Err(error) => {
                self.dispatch(Action::DeleteRejected(error.clone()));
                Err(error)
            }
        }
    }

    /// Request the next page. Returns whether further pages exist.
    ///
    /// The API returns every match in one response, so the first call
    /// always reports the end of the list.
    pub fn load_more(&self) -> bool {
        let skip = self.with_state(|s| !s.has_more || s.loading_more);
        if skip {
            return false;
        }
        self.dispatch(Action::LoadMorePending);
        debug!("No further pages");
        self.dispatch(Action::LoadMoreFulfilled { has_more: false });
        false
    }

    /// Fetch vendors and templates for the compose form.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn load_directory(&self) -> Result<Directory> {
        let (vendors, templates) =
            tokio::try_join!(self.inner.api.get_vendors(), self.inner.api.get_templates())?;
        let directory = Directory::new(vendors, templates);
        *lock(&self.inner.directory) = directory.clone();
        debug!(
            vendors = directory.vendors().len(),
            templates = directory.templates().len(),
            "Loaded directory"
        );
        Ok(directory)
    }

    /// Vendors from the last `load_directory`.
    #[must_use]
    pub fn vendors(&self) -> Vec<Vendor> {
        lock(&self.inner.directory).vendors().to_vec()
    }

    /// Templates from the last `load_directory`.
    #[must_use]
    pub fn templates(&self) -> Vec<MessageTemplate> {
        lock(&self.inner.directory).templates().to_vec()
    }
}
