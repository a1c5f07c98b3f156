use async_trait::async_trait;
use chrono::{DateTime, Utc};
use maxibot_core::{Message, MessageRole};
use sqlx::{sqlite::SqliteRow, Row};

use super::{MessageRepository, RepositoryError};
use crate::DbPool;

pub struct SqlMessageRepository {
    pool: DbPool,
}

impl SqlMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqlMessageRepository {
    async fn recent_messages(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        // Take the newest rows, then flip to chronological order.
        let rows = sqlx::query(
            r#"
            SELECT customer_id, role, text, sent_at
            FROM (
                SELECT id, customer_id, role, text, sent_at
                FROM messages
                WHERE customer_id = ?
                ORDER BY sent_at DESC, id DESC
                LIMIT ?
            )
            ORDER BY sent_at ASC, id ASC
            "#,
        )
        .bind(customer_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(message_from_row).collect()
    }

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO messages (customer_id, role, text, sent_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&message.customer_id)
        .bind(message.role.as_str())
        .bind(&message.text)
        .bind(message.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn message_from_row(row: SqliteRow) -> Result<Message, RepositoryError> {
    let role_raw: String = row.try_get("role")?;
    let role: MessageRole = role_raw
        .parse()
        .map_err(|_| RepositoryError::Decode(format!("unknown message role `{role_raw}`")))?;
    let sent_at: DateTime<Utc> = row.try_get("sent_at")?;

    Ok(Message {
        customer_id: row.try_get("customer_id")?,
        role,
        text: row.try_get("text")?,
        sent_at,
    })
}
