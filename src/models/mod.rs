pub mod message;
pub mod push_token;
pub mod room;
pub mod session;
pub mod user;

pub use message::*;
pub use push_token::*;
pub use room::*;
pub use session::*;
pub use user::*;
