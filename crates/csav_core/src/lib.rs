pub mod ability;
pub mod core_api;
pub mod layout;
pub mod reader;
pub mod save;
pub mod stats;

pub use core_api::{CoreError, CoreErrorCode};
