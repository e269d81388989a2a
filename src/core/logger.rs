//! Main logger implementation
//!
//! A [`Logger`] ties the level gate, the record formatter, the router, the
//! file engine and the side channel together. Leveled calls never return
//! errors: anything that fails after initialization is reported on stderr.

use super::{
    appender::Appender,
    context::{ContextFormatter, Environment, ProcessIdentity},
    call_site::CallSite,
    engine::{process_exit_hook, Engine, ExitHook},
    error::Result,
    log_level::{LevelGate, LogLevel},
    metrics::{Counter, LoggerMetrics, MetricsRecorder},
    router::{FragmentPolicy, Governance, Router},
    settings::LogSettings,
    side_channel::{
        Alert, AlertDestination, AlertTransport, RemoteListStore, SideChannel,
        DEFAULT_SIDE_CHANNEL_CAPACITY, DEFAULT_SIDE_CHANNEL_TIMEOUT, DELAY_ALERT_TITLE,
        ERROR_ALERT_TITLE, FATAL_ALERT_TITLE,
    },
    sink_selector::SinkSelector,
    value::{render_values, Render},
};
use crate::appenders::ConsoleAppender;
use std::fmt::{self, Display};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// Also bounds how long a fatal record waits for pending alerts before the
/// process exits.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Marker separating an ERROR or FATAL message from its stack trace
pub const CALL_STACK_MARKER: &str = "===>>>CallStack";

/// Produces the stack trace attached to ERROR and FATAL records.
pub type StackCapture = Arc<dyn Fn() -> String + Send + Sync>;

pub fn backtrace_capture() -> StackCapture {
    Arc::new(|| std::backtrace::Backtrace::force_capture().to_string())
}

/// How the message body was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallStyle {
    Templated,
    Variadic,
}

pub struct Logger {
    gate: LevelGate,
    formatter: ContextFormatter,
    router: Router,
    engine: Engine,
    side_channel: SideChannel,
    settings: Option<LogSettings>,
    counters: Arc<dyn MetricsRecorder>,
    metrics: Arc<LoggerMetrics>,
    stack_capture: StackCapture,
}

impl Logger {
    /// Logger writing to `directory` with the fixed default policy, identity
    /// taken from the environment.
    ///
    /// # Errors
    ///
    /// Returns error if the directory is empty or cannot be created, or the
    /// log file cannot be opened
    pub fn init(directory: impl AsRef<Path>, base_name: &str) -> Result<Self> {
        LoggerBuilder::new().build_in(directory, base_name)
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.gate.is_enabled(level)
    }

    pub fn set_level(&self, level: LogLevel) {
        self.gate.set(level);
    }

    pub fn level(&self) -> LogLevel {
        self.gate.get()
    }

    pub fn identity(&self) -> &ProcessIdentity {
        self.formatter.identity()
    }

    pub fn environment(&self) -> Environment {
        self.router.environment()
    }

    pub fn settings(&self) -> Option<&LogSettings> {
        self.settings.as_ref()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beacon_logger::Logger;
    ///
    /// let logger = Logger::init("/tmp/beacon-logs", "svc").unwrap();
    ///
    /// // After logging operations...
    /// let metrics = logger.metrics();
    /// println!("Written: {}", metrics.lines_written());
    /// println!("Drop rate: {:.2}%", metrics.drop_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log a formatted message from an explicit call site.
    ///
    /// This is what the `info!`-style macros expand to.
    pub fn log_at(&self, level: LogLevel, site: &CallSite, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        self.write(level, Some(site), &args.to_string(), CallStyle::Templated);
    }

    /// Log values rendered through [`Render`] and joined with spaces.
    ///
    /// This is what the `info_args!`-style macros expand to.
    pub fn log_values_at(&self, level: LogLevel, site: &CallSite, values: &[&dyn Render]) {
        if !self.is_enabled(level) {
            return;
        }
        self.write(level, Some(site), &render_values(values), CallStyle::Variadic);
    }

    /// WARN record about a delay, dropped when `delay` is below the
    /// configured threshold.
    pub fn warn_delay_at(&self, delay: i64, site: &CallSite, args: fmt::Arguments<'_>) {
        if !self.is_enabled(LogLevel::Warn) {
            return;
        }

        let threshold = self.settings.as_ref().map_or(0, |s| s.delay_threshold);
        if delay < threshold {
            return;
        }

        let record = format!(
            "{}{}, Delay:{},",
            self.formatter.prefix(LogLevel::Warn, Some(site)),
            args,
            delay
        );
        self.router
            .dispatch(&self.engine, &self.side_channel, LogLevel::Warn, &record);

        if let Some(settings) = self.settings.as_ref().filter(|s| s.is_debug) {
            if let Some(url) = settings.delay_webhook() {
                self.alert(url, DELAY_ALERT_TITLE, &record);
            }
        }
        self.counters.increment(Counter::Warn);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Display) {
        if self.is_enabled(level) {
            self.log_at(level, &CallSite::caller(), format_args!("{}", message));
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Display) {
        self.log(LogLevel::Warn, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log(LogLevel::Error, message);
    }

    /// Log at FATAL, then flush and run the exit hook.
    #[track_caller]
    pub fn fatal(&self, message: impl Display) {
        self.log(LogLevel::Fatal, message);
    }

    #[track_caller]
    pub fn warn_delay(&self, delay: i64, message: impl Display) {
        if self.is_enabled(LogLevel::Warn) {
            self.warn_delay_at(delay, &CallSite::caller(), format_args!("{}", message));
        }
    }

    fn write(&self, level: LogLevel, site: Option<&CallSite>, body: &str, style: CallStyle) {
        let prefix = self.formatter.prefix(level, site);

        match level {
            LogLevel::Debug | LogLevel::Info => {
                self.dispatch(level, &format!("{}{}", prefix, body));
            }
            LogLevel::Warn => {
                self.dispatch(level, &format!("{}{}", prefix, body));
                if style == CallStyle::Templated {
                    self.counters.increment(Counter::Warn);
                }
            }
            LogLevel::Error => {
                let record = self.with_stack(&prefix, body);
                self.dispatch(level, &record);
                if let Some(url) = self.alert_webhook() {
                    self.alert(url, ERROR_ALERT_TITLE, &record);
                }
                self.counters.increment(Counter::Error);
            }
            LogLevel::Fatal => {
                let record = self.with_stack(&prefix, body);
                if let Some(url) = self.alert_webhook() {
                    self.alert(url, FATAL_ALERT_TITLE, &record);
                }
                self.counters.increment(Counter::Fatal);
                self.dispatch(level, &record);
                self.terminate();
            }
        }
    }

    fn dispatch(&self, level: LogLevel, record: &str) {
        self.router
            .dispatch(&self.engine, &self.side_channel, level, record);
    }

    fn with_stack(&self, prefix: &str, body: &str) -> String {
        format!(
            "{}{}\n{}\n{}",
            prefix,
            body,
            CALL_STACK_MARKER,
            (self.stack_capture)()
        )
    }

    fn alert_webhook(&self) -> Option<&str> {
        self.settings.as_ref().and_then(|s| s.alert_webhook())
    }

    fn alert(&self, url: &str, title: &str, record: &str) {
        let identity = self.formatter.identity();
        self.side_channel.alert(
            AlertDestination::new(url, title),
            Alert::new(&identity.host_name, &identity.gateway, record),
        );
    }

    fn terminate(&self) {
        if !self.side_channel.drain(DEFAULT_SHUTDOWN_TIMEOUT) {
            eprintln!("[LOGGER WARNING] Pending alerts not delivered before exit.");
        }
        self.router.flush_console();
        self.engine.terminate();
    }

    /// Write buffered lines to disk.
    pub fn flush(&self) {
        self.router.flush_console();
        if let Err(e) = self.engine.flush() {
            eprintln!("[LOGGER ERROR] Flush failed: {}", e);
        }
    }

    /// Wait for queued mirrors and alerts. Returns `false` on timeout.
    pub fn drain_side_channel(&self, timeout: Duration) -> bool {
        self.side_channel.drain(timeout)
    }

    /// Stop background work and flush.
    ///
    /// Pending mirrors and alerts get at most `timeout`; later side-channel
    /// jobs are discarded. Returns `true` if everything finished in time.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let side_channel_done = self.side_channel.shutdown(timeout);
        let flusher_done = self.engine.stop_flusher(timeout);
        self.router.flush_console();

        if let Err(e) = self.engine.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }
        side_channel_done && flusher_done
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Builder for [`Logger`]
///
/// # Example
///
/// ```no_run
/// use beacon_logger::{LogLevel, LogSettings, LoggerBuilder};
///
/// let settings = LogSettings::new()
///     .with_max_line_len(16 * 1024)
///     .with_alert_webhook("https://open.feishu.cn/open-apis/bot/v2/hook/xxxx");
///
/// let logger = LoggerBuilder::new()
///     .level(LogLevel::Info)
///     .settings(settings)
///     .build_in("/var/log/match", "match")
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    settings: Option<LogSettings>,
    identity: Option<ProcessIdentity>,
    console: Option<Box<dyn Appender>>,
    console_enabled: bool,
    remote_store: Option<Arc<dyn RemoteListStore>>,
    alert_transport: Option<Arc<dyn AlertTransport>>,
    counters: Option<Arc<dyn MetricsRecorder>>,
    exit_hook: Option<ExitHook>,
    stack_capture: Option<StackCapture>,
    side_channel_capacity: usize,
    side_channel_timeout: Duration,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::Debug,
            settings: None,
            identity: None,
            console: None,
            console_enabled: true,
            remote_store: None,
            alert_transport: None,
            counters: None,
            exit_hook: None,
            stack_capture: None,
            side_channel_capacity: DEFAULT_SIDE_CHANNEL_CAPACITY,
            side_channel_timeout: DEFAULT_SIDE_CHANNEL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Governing settings. Without them the logger runs with the fixed
    /// default sink, no fragmentation and no side channels.
    #[must_use]
    pub fn settings(mut self, settings: LogSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Defaults to [`ProcessIdentity::detect`].
    #[must_use]
    pub fn identity(mut self, identity: ProcessIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    #[must_use]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console_enabled = enabled;
        self
    }

    /// Replace the stdout appender used for console output.
    #[must_use]
    pub fn console_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.console = Some(appender);
        self.console_enabled = true;
        self
    }

    /// Defaults to a Redis store when `remote_store_url` is configured.
    #[must_use]
    pub fn remote_store(mut self, store: Arc<dyn RemoteListStore>) -> Self {
        self.remote_store = Some(store);
        self
    }

    /// Defaults to the Feishu webhook client when a webhook is configured.
    #[must_use]
    pub fn alert_transport(mut self, transport: Arc<dyn AlertTransport>) -> Self {
        self.alert_transport = Some(transport);
        self
    }

    /// Destination of the warn, error and fatal counters. Defaults to the
    /// logger's own [`LoggerMetrics`].
    #[must_use]
    pub fn metrics_recorder(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.counters = Some(recorder);
        self
    }

    /// Run on FATAL instead of exiting the process.
    #[must_use]
    pub fn exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = Some(hook);
        self
    }

    #[must_use]
    pub fn stack_capture(mut self, capture: StackCapture) -> Self {
        self.stack_capture = Some(capture);
        self
    }

    #[must_use]
    pub fn side_channel_capacity(mut self, capacity: usize) -> Self {
        self.side_channel_capacity = capacity;
        self
    }

    #[must_use]
    pub fn side_channel_timeout(mut self, timeout: Duration) -> Self {
        self.side_channel_timeout = timeout;
        self
    }

    /// Select the file sink for `directory` and build the logger.
    ///
    /// # Errors
    ///
    /// Returns error if the settings are invalid, the directory is empty or
    /// cannot be created, or the log file cannot be opened
    pub fn build_in(self, directory: impl AsRef<Path>, base_name: &str) -> Result<Logger> {
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        let (plan, sink) = SinkSelector::select(directory, base_name, self.settings.as_ref())?;
        Ok(self.assemble(sink, plan.flush_interval()))
    }

    /// Build the logger around a caller-supplied file sink.
    pub fn build_with_sink(self, sink: Box<dyn Appender>) -> Logger {
        let flush_interval = self
            .settings
            .as_ref()
            .filter(|s| s.buf_size_kb > 0)
            .map(|s| s.flush_interval());
        self.assemble(sink, flush_interval)
    }

    fn assemble(self, sink: Box<dyn Appender>, flush_interval: Option<Duration>) -> Logger {
        let metrics = Arc::new(LoggerMetrics::new());
        let identity = self.identity.unwrap_or_else(ProcessIdentity::detect);

        let mut engine = Engine::new(
            sink,
            Arc::clone(&metrics),
            self.exit_hook.unwrap_or_else(process_exit_hook),
        );
        if let Some(interval) = flush_interval {
            engine = engine.with_flush_interval(interval);
        }

        let console = if self.console_enabled {
            Some(
                self.console
                    .unwrap_or_else(|| Box::new(ConsoleAppender::new()) as Box<dyn Appender>),
            )
        } else {
            None
        };

        let governance = self.settings.as_ref().map(|settings| Governance {
            fragments: FragmentPolicy::new(settings.max_line_len),
            remote_list_key: settings.remote_list_key.clone(),
        });

        let (remote_store, alert_transport) = match &self.settings {
            Some(settings) => (
                self.remote_store
                    .or_else(|| default_remote_store(settings, self.side_channel_timeout)),
                self.alert_transport
                    .or_else(|| default_alert_transport(settings, self.side_channel_timeout)),
            ),
            None => (None, None),
        };

        let side_channel = SideChannel::spawn(
            remote_store,
            alert_transport,
            self.side_channel_capacity,
            Arc::clone(&metrics),
        );

        let router = Router::new(
            console,
            governance,
            identity.environment,
            Arc::clone(&metrics),
        );

        let gate = LevelGate::new(self.level);
        let counters = self
            .counters
            .unwrap_or_else(|| Arc::clone(&metrics) as Arc<dyn MetricsRecorder>);

        Logger {
            gate,
            formatter: ContextFormatter::new(identity),
            router,
            engine,
            side_channel,
            settings: self.settings,
            counters,
            metrics,
            stack_capture: self.stack_capture.unwrap_or_else(backtrace_capture),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "redis-mirror")]
fn default_remote_store(settings: &LogSettings, timeout: Duration) -> Option<Arc<dyn RemoteListStore>> {
    let url = settings.remote_store_url()?;
    if settings.remote_list_key.is_empty() {
        return None;
    }
    match crate::appenders::RedisListStore::open(url, timeout) {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            eprintln!("[LOGGER WARNING] Remote mirror disabled: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "redis-mirror"))]
fn default_remote_store(_settings: &LogSettings, _timeout: Duration) -> Option<Arc<dyn RemoteListStore>> {
    None
}

#[cfg(feature = "webhook")]
fn default_alert_transport(settings: &LogSettings, timeout: Duration) -> Option<Arc<dyn AlertTransport>> {
    let wants_delay = settings.is_debug && settings.delay_webhook().is_some();
    if settings.alert_webhook().is_none() && !wants_delay {
        return None;
    }
    Some(Arc::new(crate::appenders::FeishuWebhook::new(timeout)))
}

#[cfg(not(feature = "webhook"))]
fn default_alert_transport(_settings: &LogSettings, _timeout: Duration) -> Option<Arc<dyn AlertTransport>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct Capture {
        lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
    }

    impl Capture {
        fn lines(&self) -> Vec<(LogLevel, String)> {
            self.lines.lock().clone()
        }
    }

    impl Appender for Capture {
        fn append(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
            self.lines
                .lock()
                .push((level, String::from_utf8_lossy(line).into_owned()));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        posts: Mutex<Vec<(AlertDestination, Alert)>>,
    }

    impl AlertTransport for RecordingTransport {
        fn post(&self, destination: &AlertDestination, alert: &Alert) -> Result<()> {
            self.posts.lock().push((destination.clone(), alert.clone()));
            Ok(())
        }
    }

    fn identity() -> ProcessIdentity {
        ProcessIdentity::new("gw-01", "node-a", "match-svc", Environment::BareMetal)
    }

    fn quiet_builder() -> LoggerBuilder {
        LoggerBuilder::new()
            .identity(identity())
            .console(false)
            .exit_hook(Arc::new(|_code: i32| {}))
            .stack_capture(Arc::new(|| "frame-0".to_string()))
    }

    #[test]
    fn test_record_layout() {
        let sink = Capture::default();
        let logger = quiet_builder().build_with_sink(Box::new(sink.clone()));

        logger.info("ready");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let (level, line) = &lines[0];
        assert_eq!(*level, LogLevel::Info);
        assert!(line.contains(" gw-01 node-a match-svc INFO logger.rs:"));
        assert!(line.ends_with(" ready"));
    }

    #[test]
    fn test_level_gate_filters() {
        let sink = Capture::default();
        let logger = quiet_builder()
            .level(LogLevel::Warn)
            .build_with_sink(Box::new(sink.clone()));

        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("shown");
        assert_eq!(sink.lines().len(), 1);

        logger.set_level(LogLevel::Debug);
        assert_eq!(logger.level(), LogLevel::Debug);
        logger.debug("now shown");
        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn test_error_carries_stack_and_counts() {
        let sink = Capture::default();
        let logger = quiet_builder().build_with_sink(Box::new(sink.clone()));

        logger.error("broken");

        let (_, line) = &sink.lines()[0];
        assert!(line.ends_with("broken\n===>>>CallStack\nframe-0"));
        assert_eq!(logger.metrics().count(Counter::Error), 1);
    }

    #[test]
    fn test_fatal_alerts_counts_writes_and_exits() {
        let sink = Capture::default();
        let transport = Arc::new(RecordingTransport::default());
        let exits = Arc::new(AtomicUsize::new(0));
        let exits_seen = Arc::clone(&exits);

        let logger = quiet_builder()
            .settings(LogSettings::new().with_alert_webhook("http://hook"))
            .alert_transport(transport.clone())
            .exit_hook(Arc::new(move |code: i32| {
                assert_eq!(code, 1);
                exits_seen.fetch_add(1, Ordering::SeqCst);
            }))
            .build_with_sink(Box::new(sink.clone()));

        logger.fatal("meltdown");

        assert_eq!(exits.load(Ordering::SeqCst), 1);
        assert_eq!(logger.metrics().count(Counter::Fatal), 1);
        // Bare metal with settings writes FATAL at ERROR
        assert_eq!(sink.lines()[0].0, LogLevel::Error);

        let posts = transport.posts.lock();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0.title, "FATAL");
        assert!(posts[0].1.record.contains("meltdown\n===>>>CallStack\n"));
        assert_eq!(posts[0].1.host, "node-a");
    }

    #[test]
    fn test_warn_delay_threshold_and_suffix() {
        let sink = Capture::default();
        let logger = quiet_builder()
            .settings(LogSettings::new().with_delay_threshold(100))
            .build_with_sink(Box::new(sink.clone()));

        logger.warn_delay(99, "slow tick");
        assert!(sink.lines().is_empty());
        assert_eq!(logger.metrics().count(Counter::Warn), 0);

        logger.warn_delay(100, "slow tick");
        let (level, line) = &sink.lines()[0];
        assert_eq!(*level, LogLevel::Warn);
        assert!(line.ends_with("slow tick, Delay:100,"));
        assert_eq!(logger.metrics().count(Counter::Warn), 1);
    }

    #[test]
    fn test_delay_alert_needs_debug_flag() {
        let transport = Arc::new(RecordingTransport::default());
        let logger = quiet_builder()
            .settings(LogSettings::new().with_delay_webhook("http://delay", false))
            .alert_transport(transport.clone())
            .build_with_sink(Box::new(Capture::default()));

        logger.warn_delay(5, "late");
        assert!(logger.drain_side_channel(Duration::from_secs(2)));
        assert!(transport.posts.lock().is_empty());

        let logger = quiet_builder()
            .settings(LogSettings::new().with_delay_webhook("http://delay", true))
            .alert_transport(transport.clone())
            .build_with_sink(Box::new(Capture::default()));

        logger.warn_delay(5, "late");
        assert!(logger.drain_side_channel(Duration::from_secs(2)));
        let posts = transport.posts.lock();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0.title, "DELAY");
        assert_eq!(posts[0].0.url, "http://delay");
    }

    #[test]
    fn test_variadic_warn_does_not_count() {
        let sink = Capture::default();
        let logger = quiet_builder().build_with_sink(Box::new(sink.clone()));
        let site = CallSite::new("src/game.rs", 12, "game::settle");

        logger.log_values_at(LogLevel::Warn, &site, &[&"seat", &3u8, &None::<u32>]);

        let (_, line) = &sink.lines()[0];
        assert!(line.ends_with("WARN game.rs:12 settle seat 3 "));
        assert_eq!(logger.metrics().count(Counter::Warn), 0);
    }

    #[test]
    fn test_invalid_settings_fail_build() {
        let dir = tempfile::tempdir().unwrap();
        let result = quiet_builder()
            .settings(LogSettings::new().with_buffer(4, 0))
            .build_in(dir.path(), "svc");
        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_shutdown_is_repeatable() {
        let logger = quiet_builder().build_with_sink(Box::new(Capture::default()));
        assert!(logger.shutdown(Duration::from_secs(1)));
        assert!(logger.shutdown(Duration::from_secs(1)));
    }
}
