use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub fcm_endpoint: String,
    pub fcm_server_key: Option<String>,
    pub default_avatar_url: String,
    pub service_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://parley.db?mode=rwc".to_string());

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let fcm_endpoint = env::var("FCM_ENDPOINT")
            .unwrap_or_else(|_| "https://fcm.googleapis.com/fcm/send".to_string());

        // Without a key the service still runs; push delivery degrades to a
        // logging stand-in (bootstrap decides).
        let fcm_server_key = env::var("FCM_SERVER_KEY").ok();

        let default_avatar_url = env::var("DEFAULT_AVATAR_URL")
            .unwrap_or_else(|_| "/static/default_profile.png".to_string());

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "parley".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            fcm_endpoint,
            fcm_server_key,
            default_avatar_url,
            service_name,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
