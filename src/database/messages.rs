use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::domain::ports::MessageRepository;
use crate::models::Message;

use sqlx::Row;

#[async_trait::async_trait]
impl MessageRepository for Database {
    async fn append_message(
        &self,
        room_id: i64,
        sender_id: &str,
        body: &str,
        client_count: i64,
    ) -> ApiResult<i64> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let result = sqlx::query(
            "INSERT INTO messages (room_id, sender_id, body, client_count, is_read, created_at)
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(room_id)
        .bind(sender_id)
        .bind(body)
        .bind(client_count)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let message_id = result.last_insert_id().ok_or_else(|| {
            ApiError::Internal("Driver did not report the inserted message id".to_string())
        })?;

        tracing::debug!(
            "Message appended: id={}, room_id={}, sender={}",
            message_id,
            room_id,
            sender_id
        );

        Ok(message_id)
    }

    async fn mark_read_except(&self, room_id: i64, reader_id: &str) -> ApiResult<u64> {
        // Single statement: no observer sees a partially-updated room.
        let result = sqlx::query(
            "UPDATE messages
             SET is_read = 1
             WHERE room_id = ? AND is_read = 0 AND sender_id != ?",
        )
        .bind(room_id)
        .bind(reader_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_messages(&self, room_id: i64) -> ApiResult<Vec<Message>> {
        let rows = sqlx::query(
            "SELECT id, room_id, sender_id, body, client_count, is_read, created_at
             FROM messages
             WHERE room_id = ?
             ORDER BY id ASC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        let mut messages = Vec::new();
        for row in rows {
            // Stored as 0/1; the Any driver reports SQLite integers, not bools
            let is_read: i64 = row.try_get("is_read")?;

            messages.push(Message {
                id: row.try_get("id")?,
                room_id: row.try_get("room_id")?,
                sender_id: row.try_get("sender_id")?,
                body: row.try_get("body")?,
                client_count: row.try_get("client_count")?,
                is_read: is_read != 0,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(messages)
    }
}
