//! Fragmentation and environment-aware routing
//!
//! | settings | environment | mirror | console | file sink |
//! |----------|-------------|--------|---------|-----------|
//! | none     | any         | no     | yes     | same level |
//! | present  | bare metal  | yes    | yes     | same level, FATAL written as ERROR |
//! | present  | container   | no     | yes     | FATAL only |
//!
//! With settings present, lines longer than the fragment limit are cut into
//! fixed-size byte slices and each slice goes through the table on its own.

use super::{
    appender::Appender,
    context::Environment,
    engine::Engine,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    side_channel::SideChannel,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Longest line written as one record; `0` disables splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FragmentPolicy {
    max_len: usize,
}

impl FragmentPolicy {
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub const fn disabled() -> Self {
        Self { max_len: 0 }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Split `line` into consecutive slices of `max_len` bytes, the last one
    /// possibly shorter. Slicing ignores character boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use beacon_logger::FragmentPolicy;
    ///
    /// let policy = FragmentPolicy::new(4);
    /// assert_eq!(policy.split(b"abcdefghij"), vec![&b"abcd"[..], b"efgh", b"ij"]);
    /// assert_eq!(policy.split(b"abc"), vec![&b"abc"[..]]);
    /// ```
    pub fn split<'a>(&self, line: &'a [u8]) -> Vec<&'a [u8]> {
        if self.max_len == 0 || line.len() <= self.max_len {
            vec![line]
        } else {
            line.chunks(self.max_len).collect()
        }
    }

    /// Number of records a line of `len` bytes produces
    pub fn fragment_count(&self, len: usize) -> usize {
        if self.max_len == 0 || len <= self.max_len {
            1
        } else {
            len.div_ceil(self.max_len)
        }
    }
}

/// Where one record goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Console, and the file sink at the given level
    ConsoleAndSink(LogLevel),
    ConsoleOnly,
}

impl Route {
    pub fn sink_level(&self) -> Option<LogLevel> {
        match self {
            Route::ConsoleAndSink(level) => Some(*level),
            Route::ConsoleOnly => None,
        }
    }
}

/// Settings-derived routing inputs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Governance {
    pub fragments: FragmentPolicy,
    pub remote_list_key: String,
}

pub struct Router {
    console: Option<Mutex<Box<dyn Appender>>>,
    governance: Option<Governance>,
    environment: Environment,
    metrics: Arc<LoggerMetrics>,
}

impl Router {
    pub fn new(
        console: Option<Box<dyn Appender>>,
        governance: Option<Governance>,
        environment: Environment,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            console: console.map(Mutex::new),
            governance,
            environment,
            metrics,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn governance(&self) -> Option<&Governance> {
        self.governance.as_ref()
    }

    pub fn route(&self, level: LogLevel) -> Route {
        match (&self.governance, self.environment) {
            (None, _) => Route::ConsoleAndSink(level),
            (Some(_), Environment::Container) if level == LogLevel::Fatal => {
                Route::ConsoleAndSink(LogLevel::Fatal)
            }
            (Some(_), Environment::Container) => Route::ConsoleOnly,
            (Some(_), Environment::BareMetal) if level == LogLevel::Fatal => {
                Route::ConsoleAndSink(LogLevel::Error)
            }
            (Some(_), Environment::BareMetal) => Route::ConsoleAndSink(level),
        }
    }

    /// Deliver one formatted record.
    pub fn dispatch(&self, engine: &Engine, side_channel: &SideChannel, level: LogLevel, line: &str) {
        let Some(governance) = &self.governance else {
            self.print(level, line.as_bytes());
            engine.emit(level, line.as_bytes());
            return;
        };

        if !self.environment.is_container() {
            side_channel.mirror(&governance.remote_list_key, line);
        }

        let fragments = governance.fragments.split(line.as_bytes());
        if fragments.len() > 1 {
            self.metrics.record_fragments(fragments.len() as u64 - 1);
        }

        let route = self.route(level);
        for fragment in fragments {
            self.print(level, fragment);
            if let Some(sink_level) = route.sink_level() {
                engine.emit(sink_level, fragment);
            }
        }
    }

    fn print(&self, level: LogLevel, line: &[u8]) {
        let Some(console) = &self.console else {
            return;
        };
        if let Err(e) = console.lock().append(level, line) {
            eprintln!("[LOGGER ERROR] Console write failed: {}", e);
        }
    }

    pub fn flush_console(&self) {
        if let Some(console) = &self.console {
            if let Err(e) = console.lock().flush() {
                eprintln!("[LOGGER ERROR] Console flush failed: {}", e);
            }
        }
    }
}
