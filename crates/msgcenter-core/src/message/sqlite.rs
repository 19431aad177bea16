//! `SQLite`-backed message repository.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

use super::model::{Message, MessageId, MessageType, Priority};
use super::repository::MessageRepository;
use crate::{Error, Result};

const SELECT_COLUMNS: &str = r"
    SELECT id, sender, recipient, recipient_email, subject, preview, content,
           priority, timestamp, is_read, has_attachment, is_acknowledged, kind
    FROM messages
";

/// Repository storing messages in a `SQLite` database.
///
/// Collection order is kept in a `position` column; inserting at the head
/// takes a position below the current minimum.
#[derive(Debug, Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Open (or create) the database at the given path.
    ///
    /// Creates the schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory database for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY NOT NULL,
                position INTEGER NOT NULL,
                sender TEXT NOT NULL,
                recipient TEXT,
                recipient_email TEXT,
                subject TEXT NOT NULL,
                preview TEXT NOT NULL,
                content TEXT NOT NULL,
                priority TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                is_read INTEGER NOT NULL DEFAULT 0,
                has_attachment INTEGER NOT NULL DEFAULT 0,
                is_acknowledged INTEGER,
                kind TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_messages_position
            ON messages(position)
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl MessageRepository for SqliteMessageRepository {
    async fn list(&self) -> Result<Vec<Message>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY position ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_message).collect()
    }

    async fn get(&self, id: &MessageId) -> Result<Option<Message>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_message).transpose()
    }

    async fn insert(&self, message: Message) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO messages (
                id, position, sender, recipient, recipient_email, subject, preview,
                content, priority, timestamp, is_read, has_attachment, is_acknowledged, kind
            )
            VALUES (
                ?, (SELECT COALESCE(MIN(position), 0) - 1 FROM messages),
                ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
            )
            ",
        )
        .bind(message.id.as_str())
        .bind(&message.sender)
        .bind(&message.recipient)
        .bind(&message.recipient_email)
        .bind(&message.subject)
        .bind(&message.preview)
        .bind(&message.content)
        .bind(message.priority.as_str())
        .bind(message.timestamp.to_rfc3339())
        .bind(message.is_read)
        .bind(message.has_attachment)
        .bind(message.is_acknowledged)
        .bind(message.kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, message: &Message) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE messages
            SET is_read = ?,
                is_acknowledged = ?
            WHERE id = ?
            ",
        )
        .bind(message.is_read)
        .bind(message.is_acknowledged)
        .bind(message.id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &MessageId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    async fn count(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM messages")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get::<i64, _>("total")? as usize)
    }
}

/// Convert a database row to a `Message`.
fn row_to_message(row: &SqliteRow) -> Result<Message> {
    let id: String = row.try_get("id")?;

    let priority: String = row.try_get("priority")?;
    let priority = Priority::parse(&priority)
        .ok_or_else(|| Error::Corrupt(format!("message {id}: unknown priority {priority:?}")))?;

    let kind: String = row.try_get("kind")?;
    let kind = MessageType::parse(&kind)
        .ok_or_else(|| Error::Corrupt(format!("message {id}: unknown type {kind:?}")))?;

    let timestamp: String = row.try_get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| Error::Corrupt(format!("message {id}: bad timestamp: {e}")))?
        .with_timezone(&Utc);

    Ok(Message {
        sender: row.try_get("sender")?,
        recipient: row.try_get("recipient")?,
        recipient_email: row.try_get("recipient_email")?,
        subject: row.try_get("subject")?,
        preview: row.try_get("preview")?,
        content: row.try_get("content")?,
        priority,
        timestamp,
        is_read: row.try_get("is_read")?,
        has_attachment: row.try_get("has_attachment")?,
        is_acknowledged: row.try_get("is_acknowledged")?,
        kind,
        id: MessageId::from(id),
    })
}
