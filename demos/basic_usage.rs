//! Basic logger usage example
//!
//! Demonstrates the templated and variadic call styles, runtime level changes
//! and the process-wide handle.
//!
//! Run with: cargo run --example basic_usage

use beacon_logger::prelude::*;
use beacon_logger::{debug, global, info, info_args, warn, warn_delay};
use std::collections::BTreeMap;

fn main() -> Result<()> {
    println!("=== Beacon Logger - Basic Usage Example ===\n");

    let log_dir = std::env::temp_dir().join("beacon-basic");
    let logger = LoggerBuilder::new()
        .identity(ProcessIdentity::detect().with_environment(Environment::BareMetal))
        .build_in(&log_dir, "basic")?;

    println!("1. Logging at different levels:");
    debug!(logger, "This is a debug message");
    info!(logger, "Server listening on port {}", 8080);
    warn!(logger, "Cache miss rate at {}%", 12.5);
    logger.error("This is an error message, with a stack trace");

    println!("\n2. Variadic values:");
    let seats = BTreeMap::from([("north", 1), ("south", 2)]);
    info_args!(logger, "table", 7u32, "open", true, structured(&seats));

    println!("\n3. Delay warnings below the threshold are dropped:");
    warn_delay!(logger, 15, "Settlement took {}ms", 15);

    println!("\n4. Changing the minimum level:");
    logger.set_level(LogLevel::Warn);
    debug!(logger, "Debug message (hidden)");
    info!(logger, "Info message (hidden)");
    warn!(logger, "Warning message (visible)");

    println!("\n5. Process-wide handle:");
    let installed = global::install(logger);
    installed.set_level(LogLevel::Info);
    if let Some(logger) = global::get() {
        info!(logger, "Reached through the global handle");
    }
    global::shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    println!("\n=== Example completed successfully! ===");
    println!("Log files are in {}", log_dir.display());

    Ok(())
}
