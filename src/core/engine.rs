//! Write engine around the selected sink
//!
//! The engine owns the single file sink for the process. Writes, flushes and
//! rotation are serialized behind one lock; a panicking sink is isolated so the
//! caller never sees it. The fatal path flushes and then hands control to the
//! [`ExitHook`].

use super::{
    appender::Appender,
    error::Result,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Exit status used by the fatal path
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called with the exit status once a fatal record has been flushed.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Terminates the process.
pub fn process_exit_hook() -> ExitHook {
    Arc::new(|code| std::process::exit(code))
}

struct Flusher {
    stop: Sender<()>,
    handle: thread::JoinHandle<()>,
}

pub struct Engine {
    sink: Arc<Mutex<Box<dyn Appender>>>,
    metrics: Arc<LoggerMetrics>,
    exit_hook: ExitHook,
    flusher: Mutex<Option<Flusher>>,
}

impl Engine {
    pub fn new(sink: Box<dyn Appender>, metrics: Arc<LoggerMetrics>, exit_hook: ExitHook) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            metrics,
            exit_hook,
            flusher: Mutex::new(None),
        }
    }

    /// Flush the sink every `interval` on a background thread.
    #[must_use]
    pub fn with_flush_interval(self, interval: Duration) -> Self {
        if interval.is_zero() {
            return self;
        }

        let (stop, stopped) = bounded::<()>(1);
        let sink = Arc::clone(&self.sink);
        let ticker = tick(interval);

        let spawned = thread::Builder::new()
            .name("beacon-flusher".to_string())
            .spawn(move || loop {
                select! {
                    recv(ticker) -> _ => {
                        if let Err(e) = flush_isolated(&sink) {
                            eprintln!("[LOGGER ERROR] Periodic flush failed: {}", e);
                        }
                    }
                    recv(stopped) -> _ => break,
                }
            });

        match spawned {
            Ok(handle) => *self.flusher.lock() = Some(Flusher { stop, handle }),
            Err(e) => eprintln!(
                "[LOGGER WARNING] Failed to start flusher thread: {}. \
                 Buffered lines are written on size or explicit flush only.",
                e
            ),
        }
        self
    }

    /// Write one line to the sink. Returns `false` if the sink failed.
    pub fn emit(&self, level: LogLevel, line: &[u8]) -> bool {
        let mut sink = self.sink.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.append(level, line)
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_written();
                true
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] {} failed: {}", sink.name(), e);
                self.metrics.record_dropped();
                false
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] {} panicked: {}. The line was dropped.",
                    sink.name(),
                    panic_message(panic_info.as_ref())
                );
                self.metrics.record_dropped();
                false
            }
        }
    }

    /// Force buffered lines to disk.
    pub fn flush(&self) -> Result<()> {
        flush_isolated(&self.sink)
    }

    /// Fatal path: flush, then run the exit hook.
    pub fn terminate(&self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
        }
        (self.exit_hook)(FATAL_EXIT_CODE);
    }

    /// Stop the periodic flusher, waiting at most `timeout` for it.
    pub fn stop_flusher(&self, timeout: Duration) -> bool {
        let Some(Flusher { stop, handle }) = self.flusher.lock().take() else {
            return true;
        };
        let _ = stop.send(());

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                return handle.join().is_ok();
            }
            if start.elapsed() >= timeout {
                eprintln!("[LOGGER WARNING] Flusher thread did not stop within timeout.");
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop_flusher(Duration::from_secs(1));
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush on drop: {}", e);
        }
    }
}

fn flush_isolated(sink: &Mutex<Box<dyn Appender>>) -> Result<()> {
    let mut sink = sink.lock();
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush())) {
        Ok(result) => result,
        Err(panic_info) => {
            eprintln!(
                "[LOGGER CRITICAL] {} panicked during flush: {}",
                sink.name(),
                panic_message(panic_info.as_ref())
            );
            Ok(())
        }
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct Capture {
        lines: Arc<Mutex<Vec<(LogLevel, Vec<u8>)>>>,
        flushes: Arc<AtomicUsize>,
    }

    impl Appender for Capture {
        fn append(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
            self.lines.lock().push((level, line.to_vec()));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    struct Exploding;

    impl Appender for Exploding {
        fn append(&mut self, _level: LogLevel, _line: &[u8]) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "exploding"
        }
    }

    fn recording_exit() -> (ExitHook, Arc<AtomicI32>) {
        let code = Arc::new(AtomicI32::new(-1));
        let seen = Arc::clone(&code);
        (Arc::new(move |c: i32| seen.store(c, Ordering::SeqCst)), code)
    }

    #[test]
    fn test_emit_records_metrics() {
        let capture = Capture::default();
        let metrics = Arc::new(LoggerMetrics::new());
        let (hook, _) = recording_exit();
        let engine = Engine::new(Box::new(capture.clone()), metrics.clone(), hook);

        assert!(engine.emit(LogLevel::Info, b"hello"));
        assert_eq!(metrics.lines_written(), 1);
        assert_eq!(capture.lines.lock()[0], (LogLevel::Info, b"hello".to_vec()));
    }

    #[test]
    fn test_panicking_sink_is_isolated() {
        let metrics = Arc::new(LoggerMetrics::new());
        let (hook, _) = recording_exit();
        let engine = Engine::new(Box::new(Exploding), metrics.clone(), hook);

        assert!(!engine.emit(LogLevel::Error, b"boom"));
        assert!(!engine.emit(LogLevel::Error, b"again"));
        assert_eq!(metrics.dropped_count(), 2);
    }

    #[test]
    fn test_terminate_flushes_then_exits() {
        let capture = Capture::default();
        let (hook, code) = recording_exit();
        let engine = Engine::new(
            Box::new(capture.clone()),
            Arc::new(LoggerMetrics::new()),
            hook,
        );

        engine.terminate();
        assert_eq!(capture.flushes.load(Ordering::SeqCst), 1);
        assert_eq!(code.load(Ordering::SeqCst), FATAL_EXIT_CODE);
    }

    #[test]
    fn test_periodic_flusher() {
        let capture = Capture::default();
        let (hook, _) = recording_exit();
        let engine = Engine::new(
            Box::new(capture.clone()),
            Arc::new(LoggerMetrics::new()),
            hook,
        )
        .with_flush_interval(Duration::from_millis(20));

        thread::sleep(Duration::from_millis(150));
        assert!(engine.stop_flusher(Duration::from_secs(1)));
        assert!(capture.flushes.load(Ordering::SeqCst) >= 2);
    }
}
