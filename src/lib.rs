//! # Beacon Logger
//!
//! A process-wide logging facade for long-running services.
//!
//! ## Features
//!
//! - **Five levels** behind an atomic gate, adjustable at runtime
//! - **Caller context** on every record: time, gateway, host, app id, level,
//!   `file:line` and calling function
//! - **Rotating files** by size or by time, with optional buffering, gzip
//!   backups and retention clean-up
//! - **Fragmentation** of oversized lines into fixed-size records
//! - **Side channels**: a Redis list mirror and webhook alerts on ERROR, FATAL
//!   and slow operations, delivered off the calling thread
//!
//! ## Example
//!
//! ```
//! use beacon_logger::prelude::*;
//! use beacon_logger::{info, warn_delay};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let settings = LogSettings::new()
//!     .with_max_line_len(8 * 1024)
//!     .with_delay_threshold(200);
//!
//! let logger = LoggerBuilder::new()
//!     .level(LogLevel::Info)
//!     .settings(settings)
//!     .build_in(dir.path(), "match")
//!     .unwrap();
//!
//! info!(logger, "room {} opened", 12);
//! warn_delay!(logger, 350, "settlement of room {} took long", 12);
//! logger.flush();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{BufferedAppender, ConsoleAppender, RotatingFileAppender};
    pub use crate::core::{
        structured, Appender, CallSite, Counter, CutType, Environment, LogLevel, LogSettings,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, ProcessIdentity, Render, Result,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use crate::appenders::{BufferedAppender, ConsoleAppender, RotatingFileAppender, RotationConfig};
pub use crate::core::{
    global, render_values, structured, Alert, AlertDestination, AlertTransport, Appender,
    CallSite, Counter, CutType, Environment, ExitHook, FragmentPolicy, LevelGate, LogLevel,
    LogSettings, Logger, LoggerBuilder, LoggerError, LoggerMetrics, MetricsRecorder,
    ProcessIdentity, RemoteListStore, Render, Result, Route, SinkPlan, SinkSelector,
    StackCapture, Structured, DEFAULT_SHUTDOWN_TIMEOUT,
};

#[cfg(feature = "redis-mirror")]
pub use crate::appenders::RedisListStore;
#[cfg(feature = "webhook")]
pub use crate::appenders::FeishuWebhook;
