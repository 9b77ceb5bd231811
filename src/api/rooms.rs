use crate::api::middleware::{ApiResult, AppState, AuthenticatedUser};
use crate::models::{CreateRoomRequest, CreateRoomResponse, RoomListResponse};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Create the room for (listing, caller, writer), or return the existing one.
/// A lost creation race comes back as 409; the client retries the call and
/// gets the already-created room.
pub async fn create_room(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Json(request): Json<CreateRoomRequest>,
) -> ApiResult<impl IntoResponse> {
    let room = state
        .chat_service
        .resolve_or_create_room(request.listing_id, &auth_user.user.id, &request.writer_id)
        .await?;

    Ok(Json(CreateRoomResponse { room_id: room.id }))
}

/// List the caller's rooms, most recently active first.
pub async fn list_rooms(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<impl IntoResponse> {
    let rooms = state.chat_service.list_rooms(&auth_user.user.id).await?;

    Ok(Json(RoomListResponse { rooms }))
}

/// Fetch a room with its history. Opening a room marks everything the
/// counterpart sent as read.
pub async fn get_room(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let detail = state
        .chat_service
        .open_room(id, &auth_user.user.id)
        .await?;

    Ok(Json(detail))
}
