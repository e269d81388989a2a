//! Logging macros for ergonomic log message formatting.
//!
//! Every severity comes in two call styles:
//!
//! - templated, like `format!`: `info!(logger, "seat {} joined", seat)`
//! - variadic, each value rendered through [`Render`](crate::Render) and
//!   joined with spaces: `info_args!(logger, "seat", seat, "joined")`
//!
//! The macros capture the call site and check the level before evaluating any
//! argument, so a disabled level costs one atomic load.
//!
//! # Examples
//!
//! ```
//! use beacon_logger::{info, info_args, Logger};
//!
//! # let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::init(dir.path(), "svc").unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Free-form values
//! info_args!(logger, "listening", port, true);
//! ```

/// Log a templated message at the given level.
///
/// # Examples
///
/// ```
/// # let dir = tempfile::tempdir().unwrap();
/// # let logger = beacon_logger::Logger::init(dir.path(), "svc").unwrap();
/// use beacon_logger::{log, LogLevel};
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Warn, "Retry {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.is_enabled(__level) {
            __logger.log_at(__level, &$crate::call_site!(), ::std::format_args!($($arg)+));
        }
    }};
}

/// Log space-joined values at the given level.
///
/// # Examples
///
/// ```
/// # let dir = tempfile::tempdir().unwrap();
/// # let logger = beacon_logger::Logger::init(dir.path(), "svc").unwrap();
/// use beacon_logger::{log_args, structured, LogLevel};
/// let table = std::collections::BTreeMap::from([("seats", 4)]);
/// log_args!(logger, LogLevel::Info, "table", 7u32, structured(&table));
/// ```
#[macro_export]
macro_rules! log_args {
    ($logger:expr, $level:expr $(, $value:expr)* $(,)?) => {{
        let __logger = &$logger;
        let __level = $level;
        if __logger.is_enabled(__level) {
            __logger.log_values_at(
                __level,
                &$crate::call_site!(),
                &[$(&$value as &dyn $crate::Render),*],
            );
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug_args {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::log_args!($logger, $crate::LogLevel::Debug $(, $value)*)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # let dir = tempfile::tempdir().unwrap();
/// # let logger = beacon_logger::Logger::init(dir.path(), "svc").unwrap();
/// use beacon_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! info_args {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::log_args!($logger, $crate::LogLevel::Info $(, $value)*)
    };
}

/// Log a warning. The templated form also bumps the warn counter.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn_args {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::log_args!($logger, $crate::LogLevel::Warn $(, $value)*)
    };
}

/// Log a delay warning, suppressed when `delay` is under the configured
/// threshold.
///
/// # Examples
///
/// ```
/// # let dir = tempfile::tempdir().unwrap();
/// # let logger = beacon_logger::Logger::init(dir.path(), "svc").unwrap();
/// use beacon_logger::warn_delay;
/// let elapsed_ms = 850i64;
/// warn_delay!(logger, elapsed_ms, "settlement for room {} was slow", 12);
/// ```
#[macro_export]
macro_rules! warn_delay {
    ($logger:expr, $delay:expr, $($arg:tt)+) => {{
        let __logger = &$logger;
        if __logger.is_enabled($crate::LogLevel::Warn) {
            __logger.warn_delay_at($delay, &$crate::call_site!(), ::std::format_args!($($arg)+));
        }
    }};
}

/// Log an error with a stack trace; alerts when a webhook is configured.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! error_args {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::log_args!($logger, $crate::LogLevel::Error $(, $value)*)
    };
}

/// Same as [`error!`].
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Same as [`error_args!`].
#[macro_export]
macro_rules! trace_args {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::log_args!($logger, $crate::LogLevel::Error $(, $value)*)
    };
}

/// Log a fatal message, then flush and terminate.
///
/// # Examples
///
/// ```
/// use beacon_logger::{fatal, LoggerBuilder};
/// use std::sync::Arc;
///
/// # let dir = tempfile::tempdir().unwrap();
/// let logger = LoggerBuilder::new()
///     .exit_hook(Arc::new(|code: i32| eprintln!("would exit with {}", code)))
///     .build_in(dir.path(), "svc")
///     .unwrap();
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal_args {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::log_args!($logger, $crate::LogLevel::Fatal $(, $value)*)
    };
}
