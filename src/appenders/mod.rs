//! Appender implementations

pub mod buffered;
pub mod console;
pub mod rotating_file;

#[cfg(feature = "redis-mirror")]
pub mod redis_list;
#[cfg(feature = "webhook")]
pub mod webhook;

pub use buffered::BufferedAppender;
pub use console::ConsoleAppender;
pub use rotating_file::{RotatingFileAppender, RotationConfig};

#[cfg(feature = "redis-mirror")]
pub use redis_list::RedisListStore;
#[cfg(feature = "webhook")]
pub use webhook::FeishuWebhook;

pub use crate::core::Appender;
