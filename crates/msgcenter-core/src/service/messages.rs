//! Message store operations.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::directory::{Directory, MessageTemplate, Vendor};
use crate::message::{
    Message, MessageId, MessageRepository, MessageType, NewMessage, validate_new_message,
};
use crate::query::{MessageQuery, QueryResult, run_query};
use crate::{Error, Result};

/// Message store: listing, lookups, flag changes, compose and delete.
///
/// Generic over the backing repository so the query logic does not depend
/// on where messages live.
#[derive(Debug)]
pub struct MessageService<R> {
    repo: R,
    directory: Directory,
}

impl<R: MessageRepository> MessageService<R> {
    /// Create a service over a repository and a vendor/template directory.
    #[must_use]
    pub const fn new(repo: R, directory: Directory) -> Self {
        Self { repo, directory }
    }

    /// The underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    /// List messages of one type with filter and search applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn query(&self, query: &MessageQuery) -> Result<QueryResult> {
        let messages = self.repo.list().await?;
        let result = run_query(&messages, query);
        debug!(
            kind = query.kind.as_str(),
            filter = query.filter.as_str(),
            search = %query.search,
            matched = result.matched_count,
            "Listed messages"
        );
        Ok(result)
    }

    /// Number of unread inbox messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn unread_count(&self) -> Result<usize> {
        let messages = self.repo.list().await?;
        Ok(crate::query::unread_count(&messages))
    }

    /// Fetch a single message.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no message has this id.
    pub async fn get(&self, id: &MessageId) -> Result<Message> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    /// Mark a message read or unread. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no message has this id.
    pub async fn set_read(&self, id: &MessageId, value: bool) -> Result<Message> {
        let mut message = self.get(id).await?;
        message.is_read = value;
        self.store(&message).await?;
        debug!(%id, is_read = value, "Updated read state");
        Ok(message)
    }

    /// Mark a sent message acknowledged or unacknowledged.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no message has this id, or
    /// `Error::InvalidOperation` if the message is not a sent message.
    pub async fn set_acknowledged(&self, id: &MessageId, value: bool) -> Result<Message> {
        let mut message = self.get(id).await?;
        if message.kind != MessageType::Sent {
            warn!(%id, "Rejected acknowledgement change on inbox message");
            return Err(Error::InvalidOperation(
                "Only sent messages can be acknowledged".to_string(),
            ));
        }
        message.is_acknowledged = Some(value);
        self.store(&message).await?;
        debug!(%id, is_acknowledged = value, "Updated acknowledgement");
        Ok(message)
    }

    /// Validate and store a newly composed message at the head of the collection.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` with every failure if the input is invalid.
    pub async fn create(&self, input: &NewMessage) -> Result<Message> {
        let validated = validate_new_message(input, &self.directory).map_err(Error::Validation)?;
        let message = validated.into_message(MessageId::generate(), Utc::now());
        self.repo.insert(message.clone()).await?;
        info!(
            "New message created: {} to {}",
            message.subject,
            message.recipient.as_deref().unwrap_or_default()
        );
        Ok(message)
    }

    /// Delete a message.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no message has this id.
    pub async fn delete(&self, id: &MessageId) -> Result<()> {
        if self.repo.delete(id).await? {
            debug!(%id, "Deleted message");
            Ok(())
        } else {
            Err(Error::NotFound(id.clone()))
        }
    }

    /// Vendors available as recipients.
    #[must_use]
    pub fn vendors(&self) -> &[Vendor] {
        self.directory.vendors()
    }

    /// Templates available to the compose form.
    #[must_use]
    pub fn templates(&self) -> &[MessageTemplate] {
        self.directory.templates()
    }

    async fn store(&self, message: &Message) -> Result<()> {
        if self.repo.update(message).await? {
            Ok(())
        } else {
            // Deleted between the read and the write.
            Err(Error::NotFound(message.id.clone()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::message::{InMemoryMessageRepository, MessageFilter, OWN_SENDER, Priority};

    async fn service() -> MessageService<InMemoryMessageRepository> {
        let repo = InMemoryMessageRepository::new();
        fixtures::seed(&repo).await.unwrap();
        MessageService::new(repo, fixtures::directory())
    }

    async fn first_of(svc: &MessageService<InMemoryMessageRepository>, kind: MessageType) -> Message {
        svc.query(&MessageQuery::new(kind))
            .await
            .unwrap()
            .messages
            .remove(0)
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_everywhere() {
        let svc = service().await;
        let id = MessageId::from("does-not-exist");

        assert!(matches!(svc.get(&id).await, Err(Error::NotFound(_))));
        assert!(matches!(svc.set_read(&id, true).await, Err(Error::NotFound(_))));
        assert!(matches!(
            svc.set_acknowledged(&id, true).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(svc.delete(&id).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_acknowledge_inbox_is_invalid() {
        let svc = service().await;
        let inbox = first_of(&svc, MessageType::Inbox).await;

        for value in [true, false] {
            let err = svc.set_acknowledged(&inbox.id, value).await.unwrap_err();
            assert!(matches!(err, Error::InvalidOperation(_)));
        }
        let stored = svc.get(&inbox.id).await.unwrap();
        assert_eq!(stored.is_acknowledged, None);
    }

    #[tokio::test]
    async fn test_acknowledge_sent_round_trip() {
        let svc = service().await;
        let sent = first_of(&svc, MessageType::Sent).await;

        let acked = svc.set_acknowledged(&sent.id, true).await.unwrap();
        assert_eq!(acked.is_acknowledged, Some(true));
        assert_eq!(acked.kind, MessageType::Sent);

        let unacked = svc.set_acknowledged(&sent.id, false).await.unwrap();
        assert_eq!(unacked.is_acknowledged, Some(false));
    }

    #[tokio::test]
    async fn test_read_unread_round_trip_restores_unread_count() {
        let svc = service().await;
        let inbox = MessageQuery::new(MessageType::Inbox).with_filter(MessageFilter::Unread);
        let before = svc.query(&inbox).await.unwrap();
        let target = before.messages[0].id.clone();

        svc.set_read(&target, true).await.unwrap();
        let during = svc.query(&inbox).await.unwrap();
        assert_eq!(during.unread_count, before.unread_count - 1);

        // Idempotent.
        svc.set_read(&target, true).await.unwrap();
        assert_eq!(svc.query(&inbox).await.unwrap().unread_count, during.unread_count);

        svc.set_read(&target, false).await.unwrap();
        let after = svc.query(&inbox).await.unwrap();
        assert_eq!(after.unread_count, before.unread_count);
    }

    #[tokio::test]
    async fn test_unread_count_independent_of_type() {
        let svc = service().await;
        let inbox = svc.query(&MessageQuery::new(MessageType::Inbox)).await.unwrap();
        let sent = svc
            .query(&MessageQuery::new(MessageType::Sent).with_search("nothing matches this"))
            .await
            .unwrap();
        assert_eq!(inbox.unread_count, sent.unread_count);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let svc = service().await;
        let input = NewMessage::new("Quarterly numbers", "Attached are the numbers.")
            .to_recipient("cfo@company.example")
            .with_priority(Priority::Low);

        let created = svc.create(&input).await.unwrap();
        let fetched = svc.get(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.subject, "Quarterly numbers");
        assert_eq!(fetched.content, "Attached are the numbers.");
        assert_eq!(fetched.priority, Priority::Low);
        assert_eq!(fetched.sender, OWN_SENDER);
        assert!(fetched.is_read);
        assert_eq!(fetched.is_acknowledged, Some(false));
        assert_eq!(fetched.kind, MessageType::Sent);
    }

    #[tokio::test]
    async fn test_create_inserts_at_head() {
        let svc = service().await;
        let created = svc
            .create(&NewMessage::new("Hi", "Body").to_vendor("vendor2"))
            .await
            .unwrap();
        let all = svc.repository().list().await.unwrap();
        assert_eq!(all[0].id, created.id);

        let sent = svc.query(&MessageQuery::new(MessageType::Sent)).await.unwrap();
        assert_eq!(sent.total_count, 5);
    }

    #[tokio::test]
    async fn test_create_reports_all_errors() {
        let svc = service().await;
        let before = svc.repository().count().await.unwrap();

        let err = svc.create(&NewMessage::default()).await.unwrap_err();
        let Error::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(svc.repository().count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_message() {
        let svc = service().await;
        let inbox = first_of(&svc, MessageType::Inbox).await;
        svc.delete(&inbox.id).await.unwrap();
        assert!(matches!(svc.get(&inbox.id).await, Err(Error::NotFound(_))));
        assert!(matches!(svc.delete(&inbox.id).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_type_never_changes() {
        let svc = service().await;
        let inbox = first_of(&svc, MessageType::Inbox).await;
        let sent = first_of(&svc, MessageType::Sent).await;

        svc.set_read(&inbox.id, true).await.unwrap();
        svc.set_read(&sent.id, false).await.unwrap();
        let _ = svc.set_acknowledged(&inbox.id, true).await;
        svc.set_acknowledged(&sent.id, true).await.unwrap();

        assert_eq!(svc.get(&inbox.id).await.unwrap().kind, MessageType::Inbox);
        assert_eq!(svc.get(&sent.id).await.unwrap().kind, MessageType::Sent);
    }
}
