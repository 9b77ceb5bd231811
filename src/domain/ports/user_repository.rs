use crate::api::middleware::error::ApiResult;
use crate::models::UserProfile;

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_profile(&self, user_id: &str) -> ApiResult<Option<UserProfile>>;
}
