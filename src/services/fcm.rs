use crate::services::push_service::{PushError, PushMessage, PushProvider};

use reqwest::Client;
use serde_json::json;
use std::time::Duration;

/// FCM delivery transport.
///
/// Speaks the legacy HTTP endpoint: one POST per notification, authorized
/// with the server key. Stale targets are reported either as an error status
/// or inside a 200 body, both of which map to `PushError::Unregistered`.
pub struct FcmClient {
    http_client: Client,
    endpoint: String,
    server_key: String,
}

impl FcmClient {
    pub fn new(endpoint: String, server_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            endpoint,
            server_key,
        }
    }
}

#[async_trait::async_trait]
impl PushProvider for FcmClient {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), PushError> {
        let payload = json!({
            "to": token,
            "notification": {
                "title": message.title,
                "body": message.body,
                "sound": "default",
            },
            "data": message.data,
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PushError::Transient(format!("Connection timeout after 30 seconds: {}", e))
                } else if e.is_connect() {
                    PushError::Transient(format!("Connection failed: {}", e))
                } else {
                    PushError::Transient(format!("Network error: {}", e))
                }
            })?;

        let status = response.status();

        if status.is_success() {
            // The legacy endpoint reports dead registrations inside a 200.
            let body = response.text().await.unwrap_or_default();
            if body.contains("NotRegistered") || body.contains("InvalidRegistration") {
                return Err(PushError::Unregistered);
            }
            return Ok(());
        }

        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
            return Err(PushError::Unregistered);
        }

        let error_msg = match response.text().await {
            Ok(body) => format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.chars().take(500).collect::<String>()
            ),
            Err(_) => format!("HTTP {} error", status.as_u16()),
        };

        Err(PushError::Transient(error_msg))
    }

    fn provider_name(&self) -> &'static str {
        "fcm"
    }
}
