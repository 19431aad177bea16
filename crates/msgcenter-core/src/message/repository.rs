//! Message storage abstraction.

use std::future::Future;

use tokio::sync::RwLock;

use super::model::{Message, MessageId};
use crate::Result;

/// Backing store for messages.
///
/// The collection is ordered: `list` returns messages in insertion order,
/// with `insert` placing new messages at the head. `update` only persists
/// the mutable flags (`is_read`, `is_acknowledged`); identity, content and
/// type are fixed once a message is stored.
pub trait MessageRepository: Send + Sync + 'static {
    /// All messages in collection order.
    fn list(&self) -> impl Future<Output = Result<Vec<Message>>> + Send;

    /// Look up a message by id.
    fn get(&self, id: &MessageId) -> impl Future<Output = Result<Option<Message>>> + Send;

    /// Insert a message at the head of the collection.
    fn insert(&self, message: Message) -> impl Future<Output = Result<()>> + Send;

    /// Persist the mutable flags of an existing message.
    ///
    /// Returns `false` if no message with that id exists.
    fn update(&self, message: &Message) -> impl Future<Output = Result<bool>> + Send;

    /// Remove a message. Returns `false` if it did not exist.
    fn delete(&self, id: &MessageId) -> impl Future<Output = Result<bool>> + Send;

    /// Number of stored messages.
    fn count(&self) -> impl Future<Output = Result<usize>> + Send;
}

/// In-memory repository. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given messages, in that order.
    #[must_use]
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }
}

impl MessageRepository for InMemoryMessageRepository {
    async fn list(&self) -> Result<Vec<Message>> {
        Ok(self.messages.read().await.clone())
    }

    async fn get(&self, id: &MessageId) -> Result<Option<Message>> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn insert(&self, message: Message) -> Result<()> {
        self.messages.write().await.insert(0, message);
        Ok(())
    }

    async fn update(&self, message: &Message) -> Result<bool> {
        let mut messages = self.messages.write().await;
        let Some(stored) = messages.iter_mut().find(|m| m.id == message.id) else {
            return Ok(false);
        };
        stored.is_read = message.is_read;
        stored.is_acknowledged = message.is_acknowledged;
        Ok(true)
    }

    async fn delete(&self, id: &MessageId) -> Result<bool> {
        let mut messages = self.messages.write().await;
        let before = messages.len();
        messages.retain(|m| &m.id != id);
        Ok(messages.len() != before)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.messages.read().await.len())
    }
}
