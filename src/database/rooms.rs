use crate::api::middleware::error::{ApiError, ApiResult};
use crate::database::Database;
use crate::domain::ports::RoomRepository;
use crate::models::{Room, RoomListingRow};

use sqlx::Row;

#[async_trait::async_trait]
impl RoomRepository for Database {
    async fn find_room(
        &self,
        listing_id: i64,
        user_id: &str,
        writer_id: &str,
    ) -> ApiResult<Option<Room>> {
        let row = sqlx::query(
            "SELECT id, listing_id, user_id, writer_id, created_at
             FROM rooms
             WHERE listing_id = ? AND user_id = ? AND writer_id = ?",
        )
        .bind(listing_id)
        .bind(user_id)
        .bind(writer_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(Room {
                id: row.try_get("id")?,
                listing_id: row.try_get("listing_id")?,
                user_id: row.try_get("user_id")?,
                writer_id: row.try_get("writer_id")?,
                created_at: row.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn insert_room(
        &self,
        listing_id: i64,
        user_id: &str,
        writer_id: &str,
    ) -> ApiResult<Room> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        sqlx::query(
            "INSERT INTO rooms (listing_id, user_id, writer_id, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(listing_id)
        .bind(user_id)
        .bind(writer_id)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let message = e.to_string();
            if message.contains("UNIQUE") || message.contains("unique") {
                ApiError::Conflict(
                    "Room already exists for this listing and participants".to_string(),
                )
            } else if message.contains("FOREIGN KEY") {
                ApiError::NotFound("Listing or participant not found".to_string())
            } else {
                ApiError::Internal(message)
            }
        })?;

        let room = self
            .find_room(listing_id, user_id, writer_id)
            .await?
            .ok_or_else(|| ApiError::Internal("Room not found after insert".to_string()))?;

        tracing::info!(
            "Room created: id={}, listing_id={}, user={}, writer={}",
            room.id,
            listing_id,
            user_id,
            writer_id
        );

        Ok(room)
    }

    async fn get_room(&self, room_id: i64) -> ApiResult<Option<Room>> {
        let row = sqlx::query(
            "SELECT id, listing_id, user_id, writer_id, created_at
             FROM rooms
             WHERE id = ?",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(Room {
                id: row.try_get("id")?,
                listing_id: row.try_get("listing_id")?,
                user_id: row.try_get("user_id")?,
                writer_id: row.try_get("writer_id")?,
                created_at: row.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn listing_exists(&self, listing_id: i64) -> ApiResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM listings WHERE id = ?")
            .bind(listing_id)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count > 0)
    }

    async fn list_room_rows(&self, user_id: &str) -> ApiResult<Vec<RoomListingRow>> {
        // One row per (room x message) pair; rooms without messages keep a
        // single row with null message fields. Ordering and per-room
        // deduplication happen in the projection, not here.
        let rows = sqlx::query(
            "SELECT r.id AS room_id, r.listing_id,
                    l.title AS listing_title, l.thumbnail_url AS listing_thumbnail,
                    r.user_id, uu.nickname AS user_nickname, uu.avatar_url AS user_avatar,
                    r.writer_id, wu.nickname AS writer_nickname, wu.avatar_url AS writer_avatar,
                    m.id AS message_id, m.body AS message_body, m.created_at AS message_at
             FROM rooms r
             INNER JOIN listings l ON l.id = r.listing_id
             INNER JOIN users uu ON uu.id = r.user_id
             INNER JOIN users wu ON wu.id = r.writer_id
             LEFT JOIN messages m ON m.room_id = r.id
             WHERE r.user_id = ? OR r.writer_id = ?",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::new();
        for row in rows {
            result.push(RoomListingRow {
                room_id: row.try_get("room_id")?,
                listing_id: row.try_get("listing_id")?,
                listing_title: row.try_get("listing_title")?,
                listing_thumbnail: row.try_get("listing_thumbnail").ok(),
                user_id: row.try_get("user_id")?,
                user_nickname: row.try_get("user_nickname")?,
                user_avatar: row.try_get("user_avatar").ok(),
                writer_id: row.try_get("writer_id")?,
                writer_nickname: row.try_get("writer_nickname")?,
                writer_avatar: row.try_get("writer_avatar").ok(),
                message_id: row.try_get("message_id").ok(),
                message_body: row.try_get("message_body").ok(),
                message_at: row.try_get("message_at").ok(),
            });
        }

        Ok(result)
    }
}
