use crate::api::middleware::error::ApiResult;
use crate::domain::ports::{PushTokenRepository, UserRepository};
use crate::models::Room;

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

/// Payload handed to the delivery transport. `data` rides along for client
/// deep-linking and is never interpreted server-side.
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The target token is invalid or no longer registered. Permanent: the
    /// registration should be dropped.
    #[error("push target is no longer registered")]
    Unregistered,

    /// Anything that might succeed on a later attempt. No retry in this
    /// service; callers only log it.
    #[error("transient push delivery failure: {0}")]
    Transient(String),
}

/// Trait for push delivery transports.
/// Allows pluggable backends (FCM, mock for tests).
#[async_trait::async_trait]
pub trait PushProvider: Send + Sync {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), PushError>;

    /// Provider name for logging/debugging
    fn provider_name(&self) -> &'static str;
}

/// What a single dispatch attempt amounted to. The send path never sees
/// this; it exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Delivered,
    NoRegistration,
    TokenInvalidated,
    TransientFailure,
}

#[derive(Clone)]
pub struct PushService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn PushTokenRepository>,
    provider: Arc<dyn PushProvider>,
}

impl PushService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn PushTokenRepository>,
        provider: Arc<dyn PushProvider>,
    ) -> Self {
        Self {
            users,
            tokens,
            provider,
        }
    }

    /// Upsert the caller's registration; a second device simply takes over
    /// the slot (last writer wins).
    pub async fn register_token(&self, user_id: &str, token: &str) -> ApiResult<()> {
        self.tokens.upsert_push_token(user_id, token).await
    }

    pub async fn deregister_token(&self, user_id: &str) -> ApiResult<()> {
        self.tokens.delete_push_token(user_id).await
    }

    pub fn chat_push_message(nickname: &str, body: &str, room_id: i64) -> PushMessage {
        PushMessage {
            title: nickname.to_string(),
            body: body.to_string(),
            data: json!({
                "room_id": room_id.to_string(),
            }),
        }
    }

    /// Deliver a chat notification to the participant that did not send the
    /// message. Best-effort: a missing registration is a no-op, a stale one
    /// is dropped, and nothing here ever reaches the message-send path.
    pub async fn dispatch_chat_push(
        &self,
        room: &Room,
        sender_id: &str,
        body: &str,
    ) -> ApiResult<PushOutcome> {
        let recipient_id = room.counterpart_of(sender_id);

        let token = match self.tokens.get_push_token(recipient_id).await? {
            Some(token) => token,
            None => {
                tracing::debug!(
                    "No push registration for user {}, skipping dispatch",
                    recipient_id
                );
                return Ok(PushOutcome::NoRegistration);
            }
        };

        let title = self
            .users
            .get_user_profile(sender_id)
            .await?
            .map(|profile| profile.nickname)
            .unwrap_or_else(|| sender_id.to_string());

        let message = Self::chat_push_message(&title, body, room.id);

        match self.provider.send(&token, &message).await {
            Ok(()) => {
                tracing::debug!(
                    "Push delivered to user {} via {}",
                    recipient_id,
                    self.provider.provider_name()
                );
                Ok(PushOutcome::Delivered)
            }
            Err(PushError::Unregistered) => {
                tracing::info!(
                    "Push target for user {} is stale, dropping registration",
                    recipient_id
                );
                self.tokens.delete_push_token(recipient_id).await?;
                Ok(PushOutcome::TokenInvalidated)
            }
            Err(PushError::Transient(e)) => {
                tracing::warn!("Push delivery to user {} failed: {}", recipient_id, e);
                Ok(PushOutcome::TransientFailure)
            }
        }
    }
}

/// Mock push provider for testing.
/// Records every send; the configured result is returned unchanged.
pub struct MockPushProvider {
    result: MockPushResult,
    sent: std::sync::Mutex<Vec<(String, PushMessage)>>,
}

#[derive(Debug, Clone, Copy)]
enum MockPushResult {
    Delivered,
    Unregistered,
    Transient,
}

impl MockPushProvider {
    pub fn new() -> Self {
        Self {
            result: MockPushResult::Delivered,
            sent: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn new_unregistered() -> Self {
        Self {
            result: MockPushResult::Unregistered,
            ..Self::new()
        }
    }

    pub fn new_transient() -> Self {
        Self {
            result: MockPushResult::Transient,
            ..Self::new()
        }
    }

    /// Every (token, message) pair handed to `send`, in order.
    pub fn sent(&self) -> Vec<(String, PushMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockPushProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PushProvider for MockPushProvider {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), PushError> {
        self.sent
            .lock()
            .unwrap()
            .push((token.to_string(), message.clone()));

        match self.result {
            MockPushResult::Delivered => Ok(()),
            MockPushResult::Unregistered => Err(PushError::Unregistered),
            MockPushResult::Transient => {
                Err(PushError::Transient("mock transport down".to_string()))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
