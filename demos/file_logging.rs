//! File logging example
//!
//! Demonstrates governed file output: size rotation with gzip backups,
//! write buffering and fragmentation of oversized lines.
//!
//! Run with: cargo run --example file_logging

use beacon_logger::prelude::*;
use beacon_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Beacon Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("beacon-file");
    let mut settings = LogSettings::new()
        .with_cut_type(CutType::Size)
        .with_buffer(64, 2)
        .with_max_line_len(1024);
    settings.max_size_mb = 1;
    settings.max_backups = 3;
    settings.compress = true;

    let logger = LoggerBuilder::new()
        .identity(ProcessIdentity::detect().with_environment(Environment::BareMetal))
        .settings(settings)
        .console(false)
        .build_in(&log_dir, "application")?;

    println!("1. Writing enough lines to trigger rotation:");
    let padding = "-".repeat(200);
    for i in 1..=10_000 {
        info!(logger, "Processing item {}/10000 {}", i, padding);
        if i % 2500 == 0 {
            warn!(logger, "Checkpoint {} reached", i);
        }
    }

    println!("\n2. Writing one oversized line, split into fragments:");
    info!(logger, "{}", "payload ".repeat(500));

    logger.flush();

    let metrics = logger.metrics();
    println!("\n   Lines written: {}", metrics.lines_written());
    println!("   Fragments emitted: {}", metrics.fragments_emitted());
    println!("   Drop rate: {:.2}%", metrics.drop_rate());

    println!("\n=== Example completed successfully! ===");
    println!("Check {} for the log files", log_dir.display());

    Ok(())
}
