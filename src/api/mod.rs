pub mod messages;
pub mod middleware;
pub mod push;
pub mod rooms;

use crate::api::middleware::{require_auth, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: AppState) -> Router {
    // Everything under /api requires a valid session token
    let protected = Router::new()
        .route("/api/rooms", post(rooms::create_room))
        .route("/api/rooms", get(rooms::list_rooms))
        .route("/api/rooms/:id", get(rooms::get_room))
        .route("/api/rooms/:id/messages", post(messages::send_message))
        .route("/api/push/registration", put(push::register_push_token))
        .route(
            "/api/push/registration",
            delete(push::deregister_push_token),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}
