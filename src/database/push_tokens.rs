use crate::api::middleware::error::ApiResult;
use crate::database::Database;
use crate::domain::ports::PushTokenRepository;

use sqlx::Row;

#[async_trait::async_trait]
impl PushTokenRepository for Database {
    async fn upsert_push_token(&self, user_id: &str, token: &str) -> ApiResult<()> {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        let existing = self.get_push_token(user_id).await?;

        if existing.is_some() {
            sqlx::query(
                "UPDATE push_tokens
                 SET token = ?, updated_at = ?
                 WHERE user_id = ?",
            )
            .bind(token)
            .bind(&now)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                "INSERT INTO push_tokens (user_id, token, updated_at)
                 VALUES (?, ?, ?)",
            )
            .bind(user_id)
            .bind(token)
            .bind(&now)
            .execute(&self.pool)
            .await?;
        }

        tracing::info!("Push registration stored for user {}", user_id);
        Ok(())
    }

    async fn get_push_token(&self, user_id: &str) -> ApiResult<Option<String>> {
        let row = sqlx::query(
            "SELECT token FROM push_tokens
             WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(row.try_get("token")?))
        } else {
            Ok(None)
        }
    }

    async fn delete_push_token(&self, user_id: &str) -> ApiResult<()> {
        sqlx::query("DELETE FROM push_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
