use crate::api::middleware::{ApiResult, AppState, AuthenticatedUser};
use crate::models::SendMessageRequest;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Append a message to a room. The message is durable once this returns;
/// push notification of the counterpart happens afterwards, best-effort.
pub async fn send_message(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .chat_service
        .send_message(id, &auth_user.user.id, &request.body, request.count)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
