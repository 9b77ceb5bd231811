use crate::api::middleware::error::ApiResult;
use crate::models::Message;

#[async_trait::async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append to a room's log. The returned id is assigned at durable insert
    /// and is strictly greater than every earlier id in the room.
    async fn append_message(
        &self,
        room_id: i64,
        sender_id: &str,
        body: &str,
        client_count: i64,
    ) -> ApiResult<i64>;

    /// Flip unread messages not authored by `reader_id` to read, in one
    /// statement. Returns the number of messages flipped.
    async fn mark_read_except(&self, room_id: i64, reader_id: &str) -> ApiResult<u64>;

    /// Full history in canonical (id ascending) order.
    async fn list_messages(&self, room_id: i64) -> ApiResult<Vec<Message>>;
}
