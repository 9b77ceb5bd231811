use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display identity of a marketplace user. Account management lives in an
/// external service; this is the slice the chat core joins against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl UserProfile {
    pub fn new(nickname: String) -> Self {
        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap();

        Self {
            id: Uuid::new_v4().to_string(),
            nickname,
            avatar_url: None,
            created_at: now,
        }
    }

    /// Avatar with the configured fallback substituted for users that never
    /// uploaded one.
    pub fn avatar_or(&self, default_avatar: &str) -> String {
        self.avatar_url
            .clone()
            .unwrap_or_else(|| default_avatar.to_string())
    }
}
