use serde::{Deserialize, Serialize};

/// A conversation between exactly two users about exactly one listing.
///
/// The participant triple is order-sensitive: `user_id` is whoever initiated
/// contact, `writer_id` is the listing owner. A lookup with the roles swapped
/// addresses a different room. Rooms are never rewritten after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: String,
    pub writer_id: String,
    pub created_at: String,
}

impl Room {
    pub fn is_participant(&self, actor_id: &str) -> bool {
        self.user_id == actor_id || self.writer_id == actor_id
    }

    /// The participant that is not `actor_id`. Callers must check
    /// `is_participant` first; a non-participant actor gets the writer side.
    pub fn counterpart_of(&self, actor_id: &str) -> &str {
        if self.writer_id == actor_id {
            &self.user_id
        } else {
            &self.writer_id
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub listing_id: i64,
    pub writer_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub room_id: i64,
}

/// One raw row of the room-list join: a (room x message) pair plus both
/// participants' profiles and the listing preview. Rooms without messages
/// produce a single row with the message fields null.
#[derive(Debug, Clone)]
pub struct RoomListingRow {
    pub room_id: i64,
    pub listing_id: i64,
    pub listing_title: String,
    pub listing_thumbnail: Option<String>,
    pub user_id: String,
    pub user_nickname: String,
    pub user_avatar: Option<String>,
    pub writer_id: String,
    pub writer_nickname: String,
    pub writer_avatar: Option<String>,
    pub message_id: Option<i64>,
    pub message_body: Option<String>,
    pub message_at: Option<String>,
}

/// Projected room-list entry: one per room, counterpart identity resolved
/// against the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub room_id: i64,
    pub listing_id: i64,
    pub listing_title: String,
    pub listing_thumbnail: Option<String>,
    pub counterpart_id: String,
    pub counterpart_nickname: String,
    pub counterpart_avatar: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoomListResponse {
    pub rooms: Vec<RoomSummary>,
}

#[derive(Debug, Serialize)]
pub struct RoomDetailResponse {
    pub room_id: i64,
    pub listing_id: i64,
    pub user_id: String,
    pub user_avatar: String,
    pub writer_id: String,
    pub writer_avatar: String,
    pub messages: Vec<crate::models::Message>,
}
