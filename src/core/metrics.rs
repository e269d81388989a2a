//! Logger metrics for observability
//!
//! Holds the severity counters the facade bumps for WARN, ERROR and FATAL
//! records, plus health counters for the write path and the side channel.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Named severity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Warn,
    Error,
    Fatal,
}

impl Counter {
    pub fn name(&self) -> &'static str {
        match self {
            Counter::Warn => "warn_count",
            Counter::Error => "error_count",
            Counter::Fatal => "fatal_count",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Destination for severity counter increments.
///
/// Plug a metrics backend in here; [`LoggerMetrics`] is the in-process default.
pub trait MetricsRecorder: Send + Sync {
    fn increment(&self, counter: Counter);
}

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use beacon_logger::{Counter, LoggerMetrics, MetricsRecorder};
///
/// let metrics = LoggerMetrics::new();
/// metrics.increment(Counter::Error);
/// metrics.record_written();
///
/// assert_eq!(metrics.count(Counter::Error), 1);
/// assert_eq!(metrics.lines_written(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    warn_count: AtomicU64,
    error_count: AtomicU64,
    fatal_count: AtomicU64,

    /// Lines (or fragments) accepted by the file sink
    lines_written: AtomicU64,

    /// Extra records produced by splitting oversized lines
    fragments_emitted: AtomicU64,

    /// Lines the file sink failed to write
    dropped_count: AtomicU64,

    /// Side-channel jobs discarded because the queue was full or closed
    side_channel_dropped: AtomicU64,

    /// Side-channel deliveries that failed
    side_channel_failed: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            warn_count: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            fatal_count: AtomicU64::new(0),
            lines_written: AtomicU64::new(0),
            fragments_emitted: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            side_channel_dropped: AtomicU64::new(0),
            side_channel_failed: AtomicU64::new(0),
        }
    }

    fn counter(&self, counter: Counter) -> &AtomicU64 {
        match counter {
            Counter::Warn => &self.warn_count,
            Counter::Error => &self.error_count,
            Counter::Fatal => &self.fatal_count,
        }
    }

    #[inline]
    pub fn count(&self, counter: Counter) -> u64 {
        self.counter(counter).load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fragments_emitted(&self) -> u64 {
        self.fragments_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn side_channel_dropped(&self) -> u64 {
        self.side_channel_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn side_channel_failed(&self) -> u64 {
        self.side_channel_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fragments(&self, extra: u64) -> u64 {
        self.fragments_emitted.fetch_add(extra, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_side_channel_dropped(&self) -> u64 {
        self.side_channel_dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_side_channel_failed(&self) -> u64 {
        self.side_channel_failed.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of sink writes that failed (0.0 - 100.0)
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.lines_written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.warn_count,
            &self.error_count,
            &self.fatal_count,
            &self.lines_written,
            &self.fragments_emitted,
            &self.dropped_count,
            &self.side_channel_dropped,
            &self.side_channel_failed,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl MetricsRecorder for LoggerMetrics {
    fn increment(&self, counter: Counter) {
        self.counter(counter).fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            warn_count: AtomicU64::new(self.count(Counter::Warn)),
            error_count: AtomicU64::new(self.count(Counter::Error)),
            fatal_count: AtomicU64::new(self.count(Counter::Fatal)),
            lines_written: AtomicU64::new(self.lines_written()),
            fragments_emitted: AtomicU64::new(self.fragments_emitted()),
            dropped_count: AtomicU64::new(self.dropped_count()),
            side_channel_dropped: AtomicU64::new(self.side_channel_dropped()),
            side_channel_failed: AtomicU64::new(self.side_channel_failed()),
        }
    }
}
