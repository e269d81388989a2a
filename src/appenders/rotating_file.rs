//! Rotating file appender
//!
//! Two rotation engines share this appender:
//!
//! - **size**: a new file is started when the next write would push the current
//!   one past `max_size`; older files are pruned by count and age and may be
//!   gzip-compressed.
//! - **time**: the clock is cut into buckets of `interval`; a new file is
//!   started when the bucket changes and yields a different file name, or when
//!   the current file reached `rotation_size`. Files older than `max_age` are
//!   pruned.
//!
//! File names come from a strftime pattern such as `svc_%Y-%m-%d-%H-%M-%S.log`,
//! expanded whenever a file is opened. If the expanded name equals the current
//! one, a generation suffix (`.1`, `.2`, ...) keeps files apart.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_level::LogLevel;
use crate::core::timestamp::{expand_pattern, matches_expanded};
use chrono::{DateTime, Local, TimeZone};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Rotation policy, fixed for the lifetime of the appender
///
/// # Examples
///
/// ```
/// use beacon_logger::appenders::RotationConfig;
/// use std::time::Duration;
///
/// // 100 MiB files, keep 10, delete after a week, gzip backups
/// let size = RotationConfig::Size {
///     max_size: 100 * 1024 * 1024,
///     max_backups: 10,
///     max_age: Duration::from_secs(7 * 24 * 3600),
///     compress: true,
/// };
///
/// // A new file every two hours or every GiB
/// let time = RotationConfig::Time {
///     interval: Duration::from_secs(2 * 3600),
///     max_age: Duration::from_secs(30 * 24 * 3600),
///     rotation_size: 1024 * 1024 * 1024,
/// };
/// assert_ne!(size, time);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationConfig {
    /// Rotate on size. Zero `max_backups` or `max_age` disables that pruning rule
    Size {
        max_size: u64,
        max_backups: usize,
        max_age: Duration,
        compress: bool,
    },

    /// Rotate on time bucket. Zero `rotation_size` or `max_age` disables that rule
    Time {
        interval: Duration,
        max_age: Duration,
        rotation_size: u64,
    },
}

impl RotationConfig {
    pub fn max_age(&self) -> Duration {
        match self {
            RotationConfig::Size { max_age, .. } | RotationConfig::Time { max_age, .. } => *max_age,
        }
    }
}

pub struct RotatingFileAppender {
    directory: PathBuf,
    pattern: String,
    config: RotationConfig,
    file: Option<File>,
    current_path: PathBuf,
    /// Expanded file name without generation suffix
    base_path: PathBuf,
    generation: u32,
    current_size: u64,
    bucket: i64,
}

impl RotatingFileAppender {
    /// Open the first file of `directory/pattern`.
    ///
    /// # Errors
    ///
    /// Returns error if the directory or file cannot be created
    pub fn new(
        directory: impl AsRef<Path>,
        pattern: impl Into<String>,
        config: RotationConfig,
    ) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        let pattern = pattern.into();

        if let RotationConfig::Time { interval, .. } = &config {
            if interval.is_zero() {
                return Err(LoggerError::config(
                    "RotatingFileAppender",
                    "time rotation interval must be positive",
                ));
            }
        }

        fs::create_dir_all(&directory).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", directory.display()),
                e,
            )
        })?;

        let now = Local::now();
        let mut appender = Self {
            directory,
            pattern,
            config,
            file: None,
            current_path: PathBuf::new(),
            base_path: PathBuf::new(),
            generation: 0,
            current_size: 0,
            bucket: 0,
        };
        appender.bucket = appender.bucket_of(&now);

        let base = appender.expanded_path(&now);
        let (file, size) = Self::open(&base).map_err(|e| {
            LoggerError::file_appender(base.display().to_string(), format!("Failed to open: {}", e))
        })?;
        appender.file = Some(file);
        appender.current_size = size;
        appender.current_path = base.clone();
        appender.base_path = base;

        Ok(appender)
    }

    fn open(path: &Path) -> std::io::Result<(File, u64)> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let size = file.metadata()?.len();
        Ok((file, size))
    }

    fn bucket_of(&self, now: &DateTime<Local>) -> i64 {
        match &self.config {
            RotationConfig::Time { interval, .. } => {
                now.timestamp_millis().div_euclid(interval_millis(interval))
            }
            RotationConfig::Size { .. } => 0,
        }
    }

    /// Time used to expand the file name: the bucket start for time rotation.
    fn name_time(&self, now: &DateTime<Local>) -> DateTime<Local> {
        match &self.config {
            RotationConfig::Time { interval, .. } => {
                let start_ms = self.bucket_of(now) * interval_millis(interval);
                Local.timestamp_millis_opt(start_ms).single().unwrap_or(*now)
            }
            RotationConfig::Size { .. } => *now,
        }
    }

    fn expanded_path(&self, now: &DateTime<Local>) -> PathBuf {
        self.directory
            .join(expand_pattern(&self.pattern, &self.name_time(now)))
    }

    /// Decide whether `incoming` more bytes need a fresh file.
    fn should_rotate(&mut self, now: &DateTime<Local>, incoming: u64) -> bool {
        match &self.config {
            RotationConfig::Size { max_size, .. } => {
                *max_size > 0
                    && self.current_size > 0
                    && self.current_size.saturating_add(incoming) > *max_size
            }
            RotationConfig::Time { rotation_size, .. } => {
                let size_due = *rotation_size > 0 && self.current_size >= *rotation_size;
                let bucket = self.bucket_of(now);
                if bucket == self.bucket {
                    return size_due;
                }
                self.bucket = bucket;
                // A literal file name keeps its file across buckets
                size_due || self.expanded_path(now) != self.base_path
            }
        }
    }

    fn rotate(&mut self, now: &DateTime<Local>) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.current_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let previous = self.current_path.clone();
        let base = self.expanded_path(now);
        let generation = if base == self.base_path {
            self.generation + 1
        } else {
            0
        };
        let path = with_generation(&base, generation);

        let (file, size) = Self::open(&path).map_err(|e| {
            LoggerError::file_rotation(
                path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;

        self.file = Some(file);
        self.current_size = size;
        self.current_path = path;
        self.base_path = base;
        self.generation = generation;
        self.bucket = self.bucket_of(now);

        if let RotationConfig::Size { compress: true, .. } = self.config {
            if previous != self.current_path {
                if let Err(e) = compress_file(&previous) {
                    eprintln!("[LOGGER WARNING] Failed to compress rotated log: {}", e);
                }
            }
        }

        self.purge();
        Ok(())
    }

    /// Delete backups past `max_backups` (newest first) or older than `max_age`.
    fn purge(&self) {
        let (max_age, max_backups) = match &self.config {
            RotationConfig::Size {
                max_age,
                max_backups,
                ..
            } => (*max_age, *max_backups),
            RotationConfig::Time { max_age, .. } => (*max_age, 0),
        };
        if max_age.is_zero() && max_backups == 0 {
            return;
        }

        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Cannot scan '{}' for old logs: {}",
                    self.directory.display(),
                    e
                );
                return;
            }
        };

        let mut backups: Vec<(PathBuf, SystemTime)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| matches_expanded(&self.pattern, &entry.file_name().to_string_lossy()))
            .map(|entry| entry.path())
            .filter(|path| *path != self.current_path && path.is_file())
            .filter_map(|path| {
                let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((path, modified))
            })
            .collect();
        backups.sort_by(|a, b| b.1.cmp(&a.1));

        let now = SystemTime::now();
        for (idx, (path, modified)) in backups.iter().enumerate() {
            let expired = !max_age.is_zero()
                && now.duration_since(*modified).unwrap_or(Duration::ZERO) > max_age;
            let surplus = max_backups > 0 && idx >= max_backups;
            if expired || surplus {
                if let Err(e) = fs::remove_file(path) {
                    eprintln!(
                        "[LOGGER WARNING] Failed to remove old log {}: {}",
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.current_path
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "RotatingFileAppender"
    }

    fn append(&mut self, _level: LogLevel, line: &[u8]) -> Result<()> {
        let now = Local::now();
        let incoming = line.len() as u64 + 1;

        if self.should_rotate(&now, incoming) {
            if let Err(e) = self.rotate(&now) {
                eprintln!(
                    "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.file.is_none() {
                    match Self::open(&self.current_path) {
                        Ok((file, _)) => self.file = Some(file),
                        Err(reopen_err) => {
                            eprintln!(
                                "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                                reopen_err
                            );
                            return Err(e);
                        }
                    }
                }

                // Let the file outgrow its limit rather than retry on every write
                self.current_size = 0;
            }
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;

        let mut record = Vec::with_capacity(line.len() + 1);
        record.extend_from_slice(line);
        record.push(b'\n');

        file.write_all(&record).map_err(|e| {
            LoggerError::file_appender(
                self.current_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += incoming;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush()
                .and_then(|_| file.sync_data())
                .map_err(|e| {
                    LoggerError::file_appender(
                        self.current_path.display().to_string(),
                        format!("Failed to flush: {}", e),
                    )
                })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
    }
}

fn interval_millis(interval: &Duration) -> i64 {
    i64::try_from(interval.as_millis()).unwrap_or(i64::MAX).max(1)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn with_generation(path: &Path, generation: u32) -> PathBuf {
    if generation == 0 {
        path.to_path_buf()
    } else {
        with_suffix(path, &format!(".{}", generation))
    }
}

/// Gzip `path` into `path.gz`, removing the original only once the compressed
/// copy is complete.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let gz_path = with_suffix(path, ".gz");
    let temp_gz_path = with_suffix(path, ".gz.tmp");

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!(
                "Failed to create temporary compressed file: {}",
                temp_gz_path.display()
            ),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let streamed = std::io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut writer| writer.flush());
    if let Err(e) = streamed {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}
