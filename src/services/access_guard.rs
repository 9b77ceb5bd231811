use crate::api::middleware::error::{ApiError, ApiResult};
use crate::models::Room;

/// Gate for every room read or mutation: only the two participants may pass.
///
/// Takes the result of a room lookup so the missing-room and wrong-actor
/// cases are decided in one place, before anything reaches the message log.
pub fn require_participant(room: Option<Room>, actor_id: &str) -> ApiResult<Room> {
    let room = room.ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    if !room.is_participant(actor_id) {
        return Err(ApiError::Forbidden(
            "Not a participant of this room".to_string(),
        ));
    }

    Ok(room)
}
