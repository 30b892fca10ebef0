pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::WinnowConfig;
pub use error::{Result, WinnowError};
pub use events::{AssistantEvent, NotificationLevel};
pub use types::*;
