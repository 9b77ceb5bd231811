use crate::api::middleware::AppState;
use crate::config::Config;
use crate::database::Database;
use crate::domain::ports::{
    MessageRepository, PushTokenRepository, RoomRepository, SessionRepository, UserRepository,
};
use crate::services::{ChatService, FcmClient, MockPushProvider, PushProvider, PushService};
use std::sync::Arc;

pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let room_repo: Arc<dyn RoomRepository> = Arc::new(db.clone());
    let message_repo: Arc<dyn MessageRepository> = Arc::new(db.clone());
    let user_repo: Arc<dyn UserRepository> = Arc::new(db.clone());
    let token_repo: Arc<dyn PushTokenRepository> = Arc::new(db.clone());
    let session_repo: Arc<dyn SessionRepository> = Arc::new(db.clone());

    let provider: Arc<dyn PushProvider> = match &config.fcm_server_key {
        Some(key) => {
            tracing::info!("Push provider initialized: fcm ({})", config.fcm_endpoint);
            Arc::new(FcmClient::new(config.fcm_endpoint.clone(), key.clone()))
        }
        None => {
            tracing::warn!("FCM_SERVER_KEY not set, push delivery runs against the mock provider");
            Arc::new(MockPushProvider::new())
        }
    };

    let push_service = PushService::new(user_repo.clone(), token_repo, provider);
    tracing::info!("Push service initialized");

    let chat_service = ChatService::new(
        room_repo,
        message_repo,
        user_repo.clone(),
        push_service.clone(),
        config.default_avatar_url.clone(),
    );
    tracing::info!("Chat service initialized");

    AppState {
        chat_service,
        push_service,
        sessions: session_repo,
        users: user_repo,
    }
}
