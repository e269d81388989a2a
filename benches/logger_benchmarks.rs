//! Criterion benchmarks for beacon_logger

use beacon_logger::prelude::*;
use beacon_logger::{info, info_args, FragmentPolicy};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

/// Sink that discards every line
struct NullSink;

impl Appender for NullSink {
    fn append(&mut self, _level: LogLevel, line: &[u8]) -> Result<()> {
        black_box(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_logger(settings: Option<LogSettings>) -> Logger {
    let mut builder = LoggerBuilder::new()
        .identity(ProcessIdentity::new("gw", "bench", "bench", Environment::BareMetal))
        .console(false)
        .exit_hook(Arc::new(|_code: i32| {}))
        .stack_capture(Arc::new(|| "bench frame".to_string()));
    if let Some(settings) = settings {
        builder = builder.settings(settings);
    }
    builder.build_with_sink(Box::new(NullSink))
}

// ============================================================================
// Level Gate Benchmarks
// ============================================================================

fn bench_disabled_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("disabled_levels");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(None);
    logger.set_level(LogLevel::Fatal);

    group.bench_function("templated", |b| {
        b.iter(|| {
            info!(logger, "Message {}", black_box(42));
        });
    });

    group.bench_function("variadic", |b| {
        b.iter(|| {
            info_args!(logger, "message", black_box(42));
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_enabled_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("enabled_logging");
    group.throughput(Throughput::Elements(1));

    let ad_hoc = null_logger(None);
    group.bench_function("templated", |b| {
        b.iter(|| {
            info!(ad_hoc, "Player {} joined table {}", black_box(7), black_box(3));
        });
    });

    group.bench_function("variadic", |b| {
        b.iter(|| {
            info_args!(ad_hoc, "player", black_box(7), "joined", black_box(3.5f64));
        });
    });

    group.bench_function("error_with_stack", |b| {
        b.iter(|| {
            ad_hoc.error(black_box("settlement failed"));
        });
    });

    let governed = null_logger(Some(LogSettings::new().with_max_line_len(256)));
    let long_body = "x".repeat(4096);
    group.bench_function("fragmented_4k", |b| {
        b.iter(|| {
            info!(governed, "{}", black_box(&long_body));
        });
    });

    group.finish();
}

// ============================================================================
// Fragmentation Benchmarks
// ============================================================================

fn bench_fragment_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment_split");

    for size in [1024usize, 64 * 1024] {
        let line = vec![b'a'; size];
        let policy = FragmentPolicy::new(512);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{}_bytes", size), |b| {
            b.iter(|| black_box(policy.split(black_box(&line))).len());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_disabled_levels,
    bench_enabled_logging,
    bench_fragment_split
);
criterion_main!(benches);
