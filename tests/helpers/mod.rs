#![allow(dead_code)]

pub mod chat_helpers;
pub mod test_db;

#[allow(unused_imports)]
pub use chat_helpers::*;
#[allow(unused_imports)]
pub use test_db::*;
