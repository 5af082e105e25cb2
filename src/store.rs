use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    message::{format_timestamp, now_timestamp},
    Message,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("message {id} not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Durable storage for messages. Each call runs in its own transaction.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// All messages, oldest first.
    async fn list(&self) -> Result<Vec<Message>, StoreError>;

    async fn create(
        &self,
        body: Option<String>,
        username: Option<String>,
    ) -> Result<Message, StoreError>;

    async fn get(&self, id: i64) -> Result<Message, StoreError>;

    /// Replaces the body. `updated_at` moves only when the body actually changes.
    async fn update_body(&self, id: i64, body: Option<String>) -> Result<Message, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn list(&self) -> Result<Vec<Message>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let messages: Vec<Message> = sqlx::query_as(
            r#"
            SELECT id, body, username, created_at, updated_at
            FROM messages
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(count = messages.len(), "listed messages");
        Ok(messages)
    }

    async fn create(
        &self,
        body: Option<String>,
        username: Option<String>,
    ) -> Result<Message, StoreError> {
        let now = format_timestamp(&now_timestamp());

        let mut tx = self.pool.begin().await?;
        let message: Message = sqlx::query_as(
            r#"
            INSERT INTO messages (body, username, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, body, username, created_at, updated_at
            "#,
        )
        .bind(body)
        .bind(username)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(id = message.id, "created message");
        Ok(message)
    }

    async fn get(&self, id: i64) -> Result<Message, StoreError> {
        let mut tx = self.pool.begin().await?;
        let message = fetch_message(&mut tx, id).await?;
        tx.commit().await?;
        Ok(message)
    }

    async fn update_body(&self, id: i64, body: Option<String>) -> Result<Message, StoreError> {
        // Write first: this transaction must never upgrade a read lock.
        let mut tx = self.pool.begin().await?;
        let updated: Option<Message> = sqlx::query_as(
            r#"
            UPDATE messages SET body = ?1, updated_at = ?2
            WHERE id = ?3 AND body IS NOT ?1
            RETURNING id, body, username, created_at, updated_at
            "#,
        )
        .bind(body.as_deref())
        .bind(format_timestamp(&now_timestamp()))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let message = match updated {
            Some(message) => {
                debug!(id, "updated message body");
                message
            }
            None => fetch_message(&mut tx, id).await?,
        };

        tx.commit().await?;
        Ok(message)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM messages WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        tx.commit().await?;
        debug!(id, "deleted message");
        Ok(())
    }
}

async fn fetch_message(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: i64,
) -> Result<Message, StoreError> {
    sqlx::query_as("SELECT id, body, username, created_at, updated_at FROM messages WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StoreError::NotFound { id })
}
