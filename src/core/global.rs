//! Process-wide logger handle
//!
//! Libraries that cannot thread a [`Logger`] through their call graph reach the
//! installed instance here. Installing is optional; everything also works on an
//! owned `Logger`.

use super::{
    error::Result,
    log_level::LogLevel,
    logger::Logger,
};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

static GLOBAL: RwLock<Option<Arc<Logger>>> = parking_lot::const_rwlock(None);

/// Install `logger` as the process-wide instance, replacing any previous one.
pub fn install(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    let previous = GLOBAL.write().replace(Arc::clone(&logger));
    if let Some(previous) = previous {
        previous.flush();
    }
    logger
}

/// The installed logger, if any
pub fn get() -> Option<Arc<Logger>> {
    GLOBAL.read().clone()
}

/// Build a logger with [`Logger::init`] and install it.
///
/// # Errors
///
/// Returns error if the logger cannot be initialized; the previous instance
/// stays installed
pub fn init(directory: impl AsRef<Path>, base_name: &str) -> Result<Arc<Logger>> {
    Ok(install(Logger::init(directory, base_name)?))
}

pub fn set_level(level: LogLevel) {
    if let Some(logger) = get() {
        logger.set_level(level);
    }
}

pub fn flush() {
    if let Some(logger) = get() {
        logger.flush();
    }
}

/// Uninstall the logger and shut it down. Returns `false` if background work
/// did not finish within `timeout`.
pub fn shutdown(timeout: Duration) -> bool {
    let Some(logger) = GLOBAL.write().take() else {
        return true;
    };
    logger.shutdown(timeout)
}
