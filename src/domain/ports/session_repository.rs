use crate::api::middleware::error::ApiResult;
use crate::models::Session;

#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get_session_by_token(&self, token: &str) -> ApiResult<Option<Session>>;

    async fn delete_session(&self, token: &str) -> ApiResult<()>;
}
