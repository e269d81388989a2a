//! Side channel example
//!
//! Demonstrates mirroring records to a remote list and sending alerts on
//! ERROR, FATAL and slow operations. In-process stand-ins replace Redis and
//! the webhook so the example runs anywhere; set `remote_store_url` and
//! `alert_webhook` to use the real ones.
//!
//! Run with: cargo run --example side_channels

use beacon_logger::prelude::*;
use beacon_logger::{
    error, fatal, info, warn_delay, Alert, AlertDestination, AlertTransport, RemoteListStore,
};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct MemoryList {
    entries: Mutex<Vec<String>>,
}

impl RemoteListStore for MemoryList {
    fn push(&self, key: &str, line: &str) -> Result<()> {
        self.entries.lock().push(format!("{} <- {}", key, line));
        Ok(())
    }
}

struct PrintingTransport;

impl AlertTransport for PrintingTransport {
    fn post(&self, destination: &AlertDestination, alert: &Alert) -> Result<()> {
        println!("   [alert:{}] to {}", destination.title, destination.url);
        for line in alert.text().lines().take(3) {
            println!("     {}", line);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Beacon Logger - Side Channel Example ===\n");

    let list = Arc::new(MemoryList::default());
    let settings = LogSettings::new()
        .with_remote_list_key("match:logs")
        .with_alert_webhook("https://hooks.example.invalid/alert")
        .with_delay_webhook("https://hooks.example.invalid/delay", true)
        .with_delay_threshold(100);

    let log_dir = std::env::temp_dir().join("beacon-side-channels");
    let logger = LoggerBuilder::new()
        .identity(ProcessIdentity::new(
            "gw-01",
            "node-a",
            "match-svc",
            Environment::BareMetal,
        ))
        .settings(settings)
        .console(false)
        .remote_store(list.clone())
        .alert_transport(Arc::new(PrintingTransport))
        .exit_hook(Arc::new(|code: i32| {
            println!("   exit hook called with code {}", code);
        }))
        .build_in(&log_dir, "match")?;

    println!("1. Every record is mirrored:");
    info!(logger, "Room {} opened", 12);
    info!(logger, "Room {} closed", 12);

    println!("\n2. Slow operations alert the delay webhook:");
    warn_delay!(logger, 40, "Fast settlement for room {}", 12);
    warn_delay!(logger, 350, "Slow settlement for room {}", 12);

    println!("\n3. Errors alert the error webhook:");
    error!(logger, "Wallet service unreachable");

    println!("\n4. Fatal records alert, flush and terminate:");
    fatal!(logger, "Ledger inconsistent, stopping");

    logger.drain_side_channel(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("\n   Mirrored entries: {}", list.entries.lock().len());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
