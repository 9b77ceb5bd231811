use serde::Deserialize;

/// Registration payload: where to deliver push notifications for the
/// caller's current device. At most one registration exists per user;
/// re-registering overwrites it.
#[derive(Debug, Deserialize)]
pub struct RegisterPushTokenRequest {
    pub token: String,
}
