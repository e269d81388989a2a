//! Side-channel fan-out
//!
//! Remote list mirroring and webhook alerts run on a dedicated worker thread
//! fed by a bounded queue. Callers never wait for delivery: a full queue drops
//! the job and counts it, and delivery failures are reported on stderr only.
//! Jobs carry no ordering guarantee relative to file writes.

use super::{error::Result, metrics::LoggerMetrics};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Bound on every remote store or webhook call
pub const DEFAULT_SIDE_CHANNEL_TIMEOUT: Duration = Duration::from_secs(5);

/// Jobs the worker queue holds before new ones are dropped
pub const DEFAULT_SIDE_CHANNEL_CAPACITY: usize = 1024;

pub const ERROR_ALERT_TITLE: &str = "ERROR";
pub const FATAL_ALERT_TITLE: &str = "FATAL";
pub const DELAY_ALERT_TITLE: &str = "DELAY";

/// Capped remote list receiving a copy of each record.
pub trait RemoteListStore: Send + Sync {
    /// Append `line` to the list at `key`.
    fn push(&self, key: &str, line: &str) -> Result<()>;
}

/// Delivers an alert to a chat webhook.
pub trait AlertTransport: Send + Sync {
    fn post(&self, destination: &AlertDestination, alert: &Alert) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDestination {
    pub url: String,
    pub title: String,
}

impl AlertDestination {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// An alert about one record, stamped with the reporting process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub host: String,
    pub gateway: String,
    pub record: String,
}

impl Alert {
    pub fn new(
        host: impl Into<String>,
        gateway: impl Into<String>,
        record: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            gateway: gateway.into(),
            record: record.into(),
        }
    }

    /// Message body as posted to the webhook
    pub fn text(&self) -> String {
        format!(
            "server: [{}]\ngate: [{}]\nlog: {}\n",
            self.host, self.gateway, self.record
        )
    }
}

enum Job {
    Mirror { key: String, line: String },
    Alert {
        destination: AlertDestination,
        alert: Alert,
    },
    Barrier(Sender<()>),
}

pub struct SideChannel {
    sender: RwLock<Option<Sender<Job>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    has_store: bool,
    has_transport: bool,
    metrics: Arc<LoggerMetrics>,
}

impl SideChannel {
    /// Start the worker thread.
    ///
    /// With neither a store nor a transport no thread is started.
    pub fn spawn(
        store: Option<Arc<dyn RemoteListStore>>,
        transport: Option<Arc<dyn AlertTransport>>,
        capacity: usize,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        if store.is_none() && transport.is_none() {
            return Self::disabled(metrics);
        }

        let has_store = store.is_some();
        let has_transport = transport.is_some();
        let (sender, receiver) = bounded(capacity.max(1));
        let worker_metrics = Arc::clone(&metrics);

        let spawned = thread::Builder::new()
            .name("beacon-side-channel".to_string())
            .spawn(move || Self::run(receiver, store, transport, worker_metrics));

        match spawned {
            Ok(handle) => Self {
                sender: RwLock::new(Some(sender)),
                worker: Mutex::new(Some(handle)),
                has_store,
                has_transport,
                metrics,
            },
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to start side-channel worker: {}. \
                     Mirroring and alerts are disabled.",
                    e
                );
                Self::disabled(metrics)
            }
        }
    }

    pub fn disabled(metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            sender: RwLock::new(None),
            worker: Mutex::new(None),
            has_store: false,
            has_transport: false,
            metrics,
        }
    }

    pub fn is_running(&self) -> bool {
        self.sender.read().is_some()
    }

    fn run(
        receiver: Receiver<Job>,
        store: Option<Arc<dyn RemoteListStore>>,
        transport: Option<Arc<dyn AlertTransport>>,
        metrics: Arc<LoggerMetrics>,
    ) {
        for job in receiver {
            let outcome = match job {
                Job::Mirror { key, line } => match store.as_deref() {
                    Some(store) => guarded("remote mirror", || store.push(&key, &line)),
                    None => Ok(()),
                },
                Job::Alert { destination, alert } => match transport.as_deref() {
                    Some(transport) => {
                        guarded("alert delivery", || transport.post(&destination, &alert))
                    }
                    None => Ok(()),
                },
                Job::Barrier(ack) => {
                    let _ = ack.send(());
                    Ok(())
                }
            };

            if let Err(message) = outcome {
                eprintln!("[LOGGER WARNING] {}", message);
                metrics.record_side_channel_failed();
            }
        }
    }

    fn enqueue(&self, job: Job) {
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            return;
        };

        match sender.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                let dropped = self.metrics.record_side_channel_dropped();
                if dropped == 0 || (dropped + 1).is_multiple_of(1000) {
                    eprintln!(
                        "[LOGGER WARNING] Side-channel queue full, {} jobs dropped.",
                        dropped + 1
                    );
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_side_channel_dropped();
            }
        }
    }

    /// Queue a copy of `line` for the remote list at `key`.
    ///
    /// No-op without a store or with an empty key.
    pub fn mirror(&self, key: &str, line: &str) {
        if !self.has_store || key.is_empty() {
            return;
        }
        self.enqueue(Job::Mirror {
            key: key.to_string(),
            line: line.to_string(),
        });
    }

    /// Queue an alert. No-op without a transport.
    pub fn alert(&self, destination: AlertDestination, alert: Alert) {
        if !self.has_transport {
            return;
        }
        self.enqueue(Job::Alert { destination, alert });
    }

    /// Wait until every job queued before this call has been processed.
    ///
    /// Returns `false` if `timeout` expired first.
    pub fn drain(&self, timeout: Duration) -> bool {
        let Some(sender) = self.sender.read().clone() else {
            return true;
        };

        // No representable deadline means wait without one
        let deadline = Instant::now().checked_add(timeout);
        let (ack_tx, ack_rx) = bounded(1);
        let job = Job::Barrier(ack_tx);
        let sent = match deadline {
            Some(deadline) => sender.send_deadline(job, deadline).is_ok(),
            None => sender.send(job).is_ok(),
        };
        if !sent {
            return false;
        }
        match deadline {
            Some(deadline) => ack_rx.recv_deadline(deadline).is_ok(),
            None => ack_rx.recv().is_ok(),
        }
    }

    /// Close the queue and wait for the worker to finish pending jobs.
    ///
    /// Later mirrors and alerts are discarded.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.write().take());

        let Some(handle) = self.worker.lock().take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Side-channel worker panicked: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Side-channel worker did not finish within timeout. \
                     Pending mirrors and alerts may be lost."
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for SideChannel {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SIDE_CHANNEL_TIMEOUT);
    }
}

/// Run a delivery, turning both errors and panics into a message.
fn guarded<F>(what: &str, delivery: F) -> std::result::Result<(), String>
where
    F: FnOnce() -> Result<()>,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(delivery)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(format!("{} failed: {}", what, e)),
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(format!("{} panicked: {}", what, panic_msg))
        }
    }
}
