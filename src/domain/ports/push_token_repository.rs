use crate::api::middleware::error::ApiResult;

#[async_trait::async_trait]
pub trait PushTokenRepository: Send + Sync {
    /// Insert or overwrite the user's single registration slot.
    async fn upsert_push_token(&self, user_id: &str, token: &str) -> ApiResult<()>;

    async fn get_push_token(&self, user_id: &str) -> ApiResult<Option<String>>;

    /// Removing an absent registration is a no-op.
    async fn delete_push_token(&self, user_id: &str) -> ApiResult<()>;
}
