use crate::api::middleware::{ApiResult, AppState, AuthenticatedUser};
use crate::models::RegisterPushTokenRequest;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Register the caller's device for push delivery. Upsert: a new device
/// replaces the previous registration.
pub async fn register_push_token(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
    Json(request): Json<RegisterPushTokenRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .push_service
        .register_token(&auth_user.user.id, &request.token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Drop the caller's registration (logout / account removal path).
pub async fn deregister_push_token(
    State(state): State<AppState>,
    axum::Extension(auth_user): axum::Extension<AuthenticatedUser>,
) -> ApiResult<impl IntoResponse> {
    state.push_service.deregister_token(&auth_user.user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
