use parley::api::middleware::AppState;
use parley::database::Database;
use parley::models::Session;
use parley::services::{ChatService, MockPushProvider, PushProvider, PushService};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_AVATAR: &str = "/static/default_profile.png";

pub async fn create_test_user(db: &Database, id: &str, nickname: &str, avatar: Option<&str>) {
    sqlx::query(
        "INSERT INTO users (id, nickname, avatar_url, created_at)
         VALUES (?, ?, ?, datetime('now'))",
    )
    .bind(id)
    .bind(nickname)
    .bind(avatar)
    .execute(db.pool())
    .await
    .expect("Failed to insert test user");
}

pub async fn create_test_listing(db: &Database, id: i64, seller_id: &str, title: &str) {
    sqlx::query(
        "INSERT INTO listings (id, seller_id, title, thumbnail_url, created_at)
         VALUES (?, ?, ?, ?, datetime('now'))",
    )
    .bind(id)
    .bind(seller_id)
    .bind(title)
    .bind(format!("http://img/{}.png", id))
    .execute(db.pool())
    .await
    .expect("Failed to insert test listing");
}

pub fn build_push_service(db: &Database, provider: Arc<MockPushProvider>) -> PushService {
    PushService::new(
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        provider as Arc<dyn PushProvider>,
    )
}

pub fn build_chat_service(db: &Database, provider: Arc<MockPushProvider>) -> ChatService {
    ChatService::new(
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        Arc::new(db.clone()),
        build_push_service(db, provider),
        DEFAULT_AVATAR.to_string(),
    )
}

pub fn build_app_state(db: &Database, provider: Arc<MockPushProvider>) -> AppState {
    AppState {
        chat_service: build_chat_service(db, provider.clone()),
        push_service: build_push_service(db, provider),
        sessions: Arc::new(db.clone()),
        users: Arc::new(db.clone()),
    }
}

pub async fn create_test_session(db: &Database, user_id: &str, token: &str, duration_hours: i64) {
    let session = Session::new(user_id.to_string(), token.to_string(), duration_hours);

    sqlx::query(
        "INSERT INTO sessions (token, user_id, expires_at, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&session.token)
    .bind(&session.user_id)
    .bind(&session.expires_at)
    .bind(&session.created_at)
    .execute(db.pool())
    .await
    .expect("Failed to insert test session");
}

/// Push dispatch runs on a spawned task; poll until the provider has seen
/// `expected` sends or the deadline passes.
pub async fn wait_for_push(provider: &MockPushProvider, expected: usize) {
    for _ in 0..100 {
        if provider.sent().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
