use crate::api::middleware::error::ApiError;
use crate::domain::ports::{SessionRepository, UserRepository};
use crate::models::UserProfile;
use crate::services::{ChatService, PushService};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub chat_service: ChatService,
    pub push_service: PushService,
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
}

/// Whoever the bearer session token resolves to. Session issuance is an
/// external concern; tokens are only validated here.
#[derive(Clone)]
pub struct AuthenticatedUser {
    pub user: UserProfile,
    pub token: String,
}

/// Extract and validate the session token from the Authorization header.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = if let Some(auth_value) = auth_header {
        if let Some(token) = auth_value.strip_prefix("Bearer ") {
            token
        } else {
            return Err(ApiError::Unauthorized);
        }
    } else {
        return Err(ApiError::Unauthorized);
    };

    let session = state
        .sessions
        .get_session_by_token(token)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if session.is_expired() {
        // Expired sessions are reaped on sight
        state.sessions.delete_session(token).await.ok();
        return Err(ApiError::Unauthorized);
    }

    let user = state
        .users
        .get_user_profile(&session.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let token_owned = token.to_string();

    request.extensions_mut().insert(AuthenticatedUser {
        user,
        token: token_owned,
    });

    Ok(next.run(request).await)
}
