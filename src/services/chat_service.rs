use crate::api::middleware::error::{ApiError, ApiResult};
use crate::domain::ports::{MessageRepository, RoomRepository, UserRepository};
use crate::models::{Message, Room, RoomDetailResponse, RoomListingRow, RoomSummary};
use crate::services::access_guard;
use crate::services::PushService;

use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChatService {
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
    push_service: PushService,
    default_avatar: String,
}

impl ChatService {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        users: Arc<dyn UserRepository>,
        push_service: PushService,
        default_avatar: String,
    ) -> Self {
        Self {
            rooms,
            messages,
            users,
            push_service,
            default_avatar,
        }
    }

    /// Return the room for the exact (listing, user, writer) triple, creating
    /// it on first contact. Creation is idempotent: a second call returns the
    /// same room. A lost creation race surfaces as `ApiError::Conflict`; the
    /// room exists under the winner's insert and a retry of the lookup
    /// succeeds.
    pub async fn resolve_or_create_room(
        &self,
        listing_id: i64,
        user_id: &str,
        writer_id: &str,
    ) -> ApiResult<Room> {
        if let Some(existing) = self.rooms.find_room(listing_id, user_id, writer_id).await? {
            return Ok(existing);
        }

        if !self.rooms.listing_exists(listing_id).await? {
            return Err(ApiError::NotFound("Listing not found".to_string()));
        }

        self.rooms.insert_room(listing_id, user_id, writer_id).await
    }

    /// All rooms the caller participates in, one summary per room, most
    /// recent message first. Rooms with no messages yet come last with an
    /// empty preview.
    pub async fn list_rooms(&self, caller_id: &str) -> ApiResult<Vec<RoomSummary>> {
        let rows = self.rooms.list_room_rows(caller_id).await?;
        Ok(project_room_summaries(rows, caller_id, &self.default_avatar))
    }

    /// Open a room: authorize the caller, mark everything the counterpart
    /// sent as read, and return the room with its full history.
    pub async fn open_room(&self, room_id: i64, caller_id: &str) -> ApiResult<RoomDetailResponse> {
        let room =
            access_guard::require_participant(self.rooms.get_room(room_id).await?, caller_id)?;

        let flipped = self.messages.mark_read_except(room_id, caller_id).await?;
        if flipped > 0 {
            tracing::debug!(
                "Marked {} messages read in room {} for user {}",
                flipped,
                room_id,
                caller_id
            );
        }

        let messages = self.messages.list_messages(room_id).await?;

        let user_avatar = self.avatar_of(&room.user_id).await?;
        let writer_avatar = self.avatar_of(&room.writer_id).await?;

        Ok(RoomDetailResponse {
            room_id: room.id,
            listing_id: room.listing_id,
            user_id: room.user_id,
            user_avatar,
            writer_id: room.writer_id,
            writer_avatar,
            messages,
        })
    }

    /// Persist a message, then kick off best-effort push dispatch. The
    /// message is durable before any push work starts, and push failures
    /// never reach the caller.
    pub async fn send_message(
        &self,
        room_id: i64,
        sender_id: &str,
        body: &str,
        client_count: i64,
    ) -> ApiResult<()> {
        Message::validate_body(body).map_err(ApiError::BadRequest)?;

        let room =
            access_guard::require_participant(self.rooms.get_room(room_id).await?, sender_id)?;

        self.messages
            .append_message(room_id, sender_id, body, client_count)
            .await?;

        let push_service = self.push_service.clone();
        let sender = sender_id.to_string();
        let body = body.to_string();
        tokio::spawn(async move {
            if let Err(e) = push_service.dispatch_chat_push(&room, &sender, &body).await {
                tracing::error!("Push dispatch for room {} failed: {}", room.id, e);
            }
        });

        Ok(())
    }

    async fn avatar_of(&self, user_id: &str) -> ApiResult<String> {
        Ok(self
            .users
            .get_user_profile(user_id)
            .await?
            .map(|profile| profile.avatar_or(&self.default_avatar))
            .unwrap_or_else(|| self.default_avatar.clone()))
    }
}

/// Two-phase room-list projection: sort every (room x message) row by
/// message id strictly descending (rows without a message go last), then
/// keep the first row seen per room. Joining rooms against their whole log
/// and collapsing afterwards is what guarantees exactly one summary per
/// room regardless of how many messages it has.
fn project_room_summaries(
    mut rows: Vec<RoomListingRow>,
    caller_id: &str,
    default_avatar: &str,
) -> Vec<RoomSummary> {
    rows.sort_by_key(|row| {
        (
            row.message_id.is_none(),
            std::cmp::Reverse(row.message_id.unwrap_or(0)),
        )
    });

    let mut seen = HashSet::new();
    let mut summaries = Vec::new();

    for row in rows {
        if !seen.insert(row.room_id) {
            continue;
        }

        let (counterpart_id, counterpart_nickname, counterpart_avatar) =
            if row.writer_id == caller_id {
                (row.user_id, row.user_nickname, row.user_avatar)
            } else {
                (row.writer_id, row.writer_nickname, row.writer_avatar)
            };

        summaries.push(RoomSummary {
            room_id: row.room_id,
            listing_id: row.listing_id,
            listing_title: row.listing_title,
            listing_thumbnail: row.listing_thumbnail,
            counterpart_id,
            counterpart_nickname,
            counterpart_avatar: counterpart_avatar
                .unwrap_or_else(|| default_avatar.to_string()),
            last_message: row.message_body,
            last_message_at: row.message_at,
        });
    }

    summaries
}
