//! Centralized view state and its reducer.
//!
//! Every asynchronous operation is reported as actions (pending, fulfilled,
//! rejected) and `MessagesState::apply` is the only place state changes.
//! List fetches carry a sequence number; results from anything but the
//! latest dispatched fetch are discarded.

use msgcenter_core::{Message, MessageFilter, MessageId, MessageType, QueryResult};

use crate::error::ClientError;

/// Lifecycle of the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch succeeded.
    Loaded,
    /// The latest fetch failed.
    Failed,
}

/// State changes, one per step of each asynchronous operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A list fetch was dispatched.
    FetchPending {
        /// Sequence number of the request.
        seq: u64,
    },
    /// A list fetch completed.
    FetchFulfilled {
        /// Sequence number of the request.
        seq: u64,
        /// Server response.
        result: QueryResult,
    },
    /// A list fetch failed.
    FetchRejected {
        /// Sequence number of the request.
        seq: u64,
        /// Failure.
        error: ClientError,
    },
    /// A single-message lookup was dispatched.
    FetchMessagePending,
    /// A single-message lookup completed; the message becomes selected.
    FetchMessageFulfilled(Message),
    /// A single-message lookup failed.
    FetchMessageRejected(ClientError),
    /// A message was marked read.
    MarkReadFulfilled(Message),
    /// A message was marked unread.
    MarkUnreadFulfilled(Message),
    /// A sent message was acknowledged or unacknowledged.
    AcknowledgementFulfilled(Message),
    /// A read or acknowledgement change failed.
    MutationRejected(ClientError),
    /// A send was dispatched.
    SendPending,
    /// A send completed.
    SendFulfilled(Message),
    /// A send failed.
    SendRejected(ClientError),
    /// A message was deleted.
    DeleteFulfilled(MessageId),
    /// A delete failed.
    DeleteRejected(ClientError),
    /// A load-more request was dispatched.
    LoadMorePending,
    /// A load-more request completed.
    LoadMoreFulfilled {
        /// Whether further pages exist.
        has_more: bool,
    },
    /// Change the status filter.
    SetFilter(MessageFilter),
    /// Change the search term.
    SetSearchTerm(String),
    /// Switch between inbox and sent.
    SetView(MessageType),
    /// Leave the detail view.
    ClearSelectedMessage,
    /// Dismiss the error banner.
    ClearError,
}

/// Client view state.
#[derive(Debug, Clone, PartialEq)]
pub struct MessagesState {
    /// Messages of the current listing, in server order.
    pub messages: Vec<Message>,
    /// Message shown in the detail view.
    pub selected_message: Option<Message>,
    /// List lifecycle.
    pub status: ListStatus,
    /// Error banner text.
    pub error: Option<String>,
    /// Current mailbox.
    pub view: MessageType,
    /// Active status filter.
    pub filter: MessageFilter,
    /// Active search term.
    pub search_term: String,
    /// Messages of the current type, as last reported by the server.
    pub total_count: usize,
    /// Unread inbox messages.
    pub unread_count: usize,
    /// Whether more pages are believed to exist.
    pub has_more: bool,
    /// A single-message lookup is in flight.
    pub detail_loading: bool,
    /// A send is in flight.
    pub sending: bool,
    /// A load-more request is in flight.
    pub loading_more: bool,
    latest_fetch: u64,
}

impl Default for MessagesState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            selected_message: None,
            status: ListStatus::Idle,
            error: None,
            view: MessageType::Inbox,
            filter: MessageFilter::All,
            search_term: String::new(),
            total_count: 0,
            unread_count: 0,
            has_more: true,
            detail_loading: false,
            sending: false,
            loading_more: false,
            latest_fetch: 0,
        }
    }
}

impl MessagesState {
    /// True while any list, detail or send request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, ListStatus::Loading) || self.detail_loading || self.sending
    }

    /// Sequence number of the latest dispatched fetch.
    #[must_use]
    pub const fn latest_fetch(&self) -> u64 {
        self.latest_fetch
    }

    /// Cached copy of a message, from the list or the selection.
    #[must_use]
    pub fn cached(&self, id: &MessageId) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| &m.id == id)
            .or_else(|| self.selected_message.as_ref().filter(|m| &m.id == id))
    }

    /// Apply an action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::FetchPending { seq } => {
                self.latest_fetch = self.latest_fetch.max(seq);
                self.status = ListStatus::Loading;
                self.error = None;
                self.has_more = true;
            }
            Action::FetchFulfilled { seq, result } => {
                if seq < self.latest_fetch {
                    return;
                }
                self.status = ListStatus::Loaded;
                self.messages = result.messages;
                self.total_count = result.total_count;
                self.unread_count = result.unread_count;
            }
            Action::FetchRejected { seq, error } => {
                if seq < self.latest_fetch {
                    return;
                }
                self.status = ListStatus::Failed;
                if error != ClientError::Throttled {
                    self.error = Some(error.display_message());
                }
            }
            Action::FetchMessagePending => {
                self.detail_loading = true;
                self.error = None;
            }
            Action::FetchMessageFulfilled(message) => {
                self.detail_loading = false;
                self.selected_message = Some(message);
            }
            Action::FetchMessageRejected(error) => {
                self.detail_loading = false;
                self.error = Some(error.display_message());
            }
            Action::MarkReadFulfilled(message) => {
                if self.cached(&message.id).is_some_and(Message::is_unread_inbox) {
                    self.unread_count = self.unread_count.saturating_sub(1);
                }
                self.replace(message);
            }
            Action::MarkUnreadFulfilled(message) => {
                if self
                    .cached(&message.id)
                    .is_some_and(|m| m.kind == MessageType::Inbox && m.is_read)
                {
                    self.unread_count += 1;
                }
                self.replace(message);
            }
            Action::AcknowledgementFulfilled(message) => self.replace(message),
            Action::MutationRejected(error) | Action::DeleteRejected(error) => {
                self.error = Some(error.display_message());
            }
            Action::SendPending => {
                self.sending = true;
                self.error = None;
            }
            Action::SendFulfilled(message) => {
                self.sending = false;
                self.messages.insert(0, message);
                self.total_count += 1;
            }
            Action::SendRejected(error) => {
                self.sending = false;
                self.error = Some(error.display_message());
            }
            Action::DeleteFulfilled(id) => {
                if let Some(index) = self.messages.iter().position(|m| m.id == id) {
                    let removed = self.messages.remove(index);
                    self.total_count = self.total_count.saturating_sub(1);
                    if removed.is_unread_inbox() {
                        self.unread_count = self.unread_count.saturating_sub(1);
                    }
                }
                if self.selected_message.as_ref().is_some_and(|m| m.id == id) {
                    self.selected_message = None;
                }
            }
            Action::LoadMorePending => self.loading_more = true,
            Action::LoadMoreFulfilled { has_more } => {
                self.loading_more = false;
                self.has_more = has_more;
            }
            Action::SetFilter(filter) => self.filter = filter,
            Action::SetSearchTerm(term) => self.search_term = term,
            Action::SetView(view) => {
                self.view = view;
                if !self.filter.is_legal_for(view) {
                    self.filter = MessageFilter::All;
                }
            }
            Action::ClearSelectedMessage => self.selected_message = None,
            Action::ClearError => self.error = None,
        }
    }

    fn replace(&mut self, message: Message) {
        if let Some(entry) = self.messages.iter_mut().find(|m| m.id == message.id) {
            *entry = message.clone();
        }
        if let Some(selected) = self.selected_message.as_mut().filter(|m| m.id == message.id) {
            *selected = message;
        }
    }
}
