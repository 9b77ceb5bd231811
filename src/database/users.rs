use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::domain::ports::UserRepository;
use crate::models::UserProfile;

use sqlx::Row;

#[async_trait::async_trait]
impl UserRepository for Database {
    async fn get_user_profile(&self, user_id: &str) -> ApiResult<Option<UserProfile>> {
        let row = sqlx::query(
            "SELECT id, nickname, avatar_url, created_at
             FROM users
             WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(UserProfile {
                id: row.try_get("id")?,
                nickname: row.try_get("nickname")?,
                avatar_url: row.try_get("avatar_url").ok(),
                created_at: row.try_get("created_at")?,
            }))
        } else {
            Ok(None)
        }
    }
}
