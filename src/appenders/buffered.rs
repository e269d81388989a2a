//! Size-triggered write buffering
//!
//! [`BufferedAppender`] holds lines in memory and hands them to the wrapped
//! appender once `capacity` bytes are pending or on an explicit flush. The
//! interval trigger lives in the engine, which flushes its sink periodically.

use crate::core::{Appender, LogLevel, Result};

pub struct BufferedAppender {
    inner: Box<dyn Appender>,
    pending: Vec<(LogLevel, Vec<u8>)>,
    pending_bytes: usize,
    capacity: usize,
}

impl BufferedAppender {
    pub fn new(inner: Box<dyn Appender>, capacity: usize) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            pending_bytes: 0,
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn pending_bytes(&self) -> usize {
        self.pending_bytes
    }

    /// Hand every pending line to the inner appender.
    ///
    /// All lines are attempted; the first failure is returned.
    fn drain(&mut self) -> Result<()> {
        let mut first_error = None;
        for (level, line) in self.pending.drain(..) {
            if let Err(e) = self.inner.append(level, &line) {
                first_error.get_or_insert(e);
            }
        }
        self.pending_bytes = 0;
        first_error.map_or(Ok(()), Err)
    }
}

impl Appender for BufferedAppender {
    fn append(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
        self.pending_bytes += line.len() + 1;
        self.pending.push((level, line.to_vec()));

        if self.pending_bytes >= self.capacity {
            self.drain()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let drained = self.drain();
        let flushed = self.inner.flush();
        drained.and(flushed)
    }

    fn name(&self) -> &str {
        "BufferedAppender"
    }
}

impl Drop for BufferedAppender {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush buffered lines on drop: {}", e);
        }
    }
}
