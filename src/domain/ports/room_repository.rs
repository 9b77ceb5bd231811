use crate::api::middleware::error::ApiResult;
use crate::models::{Room, RoomListingRow};

#[async_trait::async_trait]
pub trait RoomRepository: Send + Sync {
    /// Exact-triple lookup; the (listing, user, writer) roles are not
    /// interchangeable.
    async fn find_room(
        &self,
        listing_id: i64,
        user_id: &str,
        writer_id: &str,
    ) -> ApiResult<Option<Room>>;

    /// Insert a new room. A uniqueness violation on the triple surfaces as
    /// `ApiError::Conflict` (a concurrent creation won the race); a foreign
    /// key violation surfaces as `ApiError::NotFound`.
    async fn insert_room(
        &self,
        listing_id: i64,
        user_id: &str,
        writer_id: &str,
    ) -> ApiResult<Room>;

    async fn get_room(&self, room_id: i64) -> ApiResult<Option<Room>>;

    /// Listing ownership lives in an external service; creation only needs
    /// to know the id is real.
    async fn listing_exists(&self, listing_id: i64) -> ApiResult<bool>;

    /// All (room x message) rows for rooms the user participates in, for the
    /// room-list projection.
    async fn list_room_rows(&self, user_id: &str) -> ApiResult<Vec<RoomListingRow>>;
}
