//! Core logger types and traits

pub mod appender;
pub mod call_site;
pub mod context;
pub mod engine;
pub mod error;
pub mod global;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod router;
pub mod settings;
pub mod side_channel;
pub mod sink_selector;
pub mod timestamp;
pub mod value;

pub use appender::Appender;
pub use call_site::CallSite;
pub use context::{ContextFormatter, Environment, ProcessIdentity};
pub use engine::{process_exit_hook, Engine, ExitHook, FATAL_EXIT_CODE};
pub use error::{LoggerError, Result};
pub use log_level::{LevelGate, LogLevel};
pub use logger::{
    backtrace_capture, Logger, LoggerBuilder, StackCapture, CALL_STACK_MARKER,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use metrics::{Counter, LoggerMetrics, MetricsRecorder};
pub use router::{FragmentPolicy, Governance, Route, Router};
pub use settings::{CutType, LogSettings};
pub use side_channel::{
    Alert, AlertDestination, AlertTransport, RemoteListStore, SideChannel,
    DEFAULT_SIDE_CHANNEL_CAPACITY, DEFAULT_SIDE_CHANNEL_TIMEOUT,
};
pub use sink_selector::{process_name, BufferingConfig, SinkPlan, SinkSelector};
pub use timestamp::TimestampFormat;
pub use value::{render_values, structured, Render, Structured};
