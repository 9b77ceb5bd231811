use serde::{Deserialize, Serialize};

/// One chat message. The id is assigned by the storage layer at durable
/// insert and is the canonical ordering key within a room (wall-clock
/// timestamps are display-only). `client_count` is an opaque client-side
/// badge counter, stored but never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub room_id: i64,
    pub sender_id: String,
    pub body: String,
    pub client_count: i64,
    pub is_read: bool,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub body: String,
    #[serde(default)]
    pub count: i64,
}

impl Message {
    /// Empty bodies are rejected before anything reaches the log.
    pub fn validate_body(body: &str) -> Result<(), String> {
        if body.trim().is_empty() {
            return Err("Message body must not be empty".to_string());
        }
        Ok(())
    }
}
