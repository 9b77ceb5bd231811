pub mod access_guard;
pub mod chat_service;
pub mod fcm;
pub mod push_service;

pub use chat_service::ChatService;
pub use fcm::FcmClient;
pub use push_service::{
    MockPushProvider, PushError, PushMessage, PushOutcome, PushProvider, PushService,
};
