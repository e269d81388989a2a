//! Appender trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// A write sink for rendered lines.
///
/// `line` carries no trailing newline. Lines are raw bytes because oversized
/// records are split at fixed byte offsets.
pub trait Appender: Send + Sync {
    fn append(&mut self, level: LogLevel, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
