//! Sink selection
//!
//! Turns the target directory, a file base name and the optional governing
//! settings into a [`SinkPlan`] describing the rotation and buffering policy,
//! then builds the appender chain from it.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    settings::{CutType, LogSettings},
    timestamp::TimestampFormat,
};
use crate::appenders::{BufferedAppender, RotatingFileAppender, RotationConfig};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retention of the default time-rotated sink
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 3600);

/// Interval of the default time-rotated sink
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(120 * 60);

/// Size cap of the default time-rotated sink
pub const DEFAULT_ROTATION_SIZE: u64 = 1024 * 1024 * 1024;

/// Appended to the base name when settings govern the sink
pub const ROTATION_PATTERN: &str = "_%Y-%m-%d-%H-%M-%S.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferingConfig {
    pub size: usize,
    pub flush_interval: Duration,
}

/// Everything needed to build the file sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkPlan {
    pub directory: PathBuf,
    pub file_pattern: String,
    pub rotation: RotationConfig,
    pub buffering: Option<BufferingConfig>,
}

impl SinkPlan {
    /// Create the directory and open the appender chain.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the rotating file
    /// cannot be opened
    pub fn build(&self) -> Result<Box<dyn Appender>> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", self.directory.display()),
                e,
            )
        })?;

        let file = RotatingFileAppender::new(
            &self.directory,
            self.file_pattern.clone(),
            self.rotation.clone(),
        )?;

        Ok(match self.buffering {
            Some(buffering) => Box::new(BufferedAppender::new(Box::new(file), buffering.size)),
            None => Box::new(file),
        })
    }

    pub fn flush_interval(&self) -> Option<Duration> {
        self.buffering.map(|b| b.flush_interval)
    }
}

pub struct SinkSelector;

impl SinkSelector {
    /// Decide the sink policy without touching the file system.
    ///
    /// An empty `base_name` falls back to [`process_name`].
    ///
    /// # Errors
    ///
    /// Returns error if `directory` is empty
    pub fn plan(
        directory: impl AsRef<Path>,
        base_name: &str,
        settings: Option<&LogSettings>,
        now: &DateTime<Local>,
    ) -> Result<SinkPlan> {
        let directory = directory.as_ref();
        if directory.as_os_str().is_empty() {
            return Err(LoggerError::config("SinkSelector", "log directory is empty"));
        }

        let base = if base_name.is_empty() {
            process_name()
        } else {
            base_name.to_string()
        };

        let Some(settings) = settings else {
            return Ok(SinkPlan {
                directory: directory.to_path_buf(),
                file_pattern: format!("{}_{}.log", base, TimestampFormat::FileStamp.format(now)),
                rotation: RotationConfig::Time {
                    interval: DEFAULT_ROTATION_INTERVAL,
                    max_age: DEFAULT_MAX_AGE,
                    rotation_size: DEFAULT_ROTATION_SIZE,
                },
                buffering: None,
            });
        };

        let rotation = match settings.cut_type {
            CutType::Size => RotationConfig::Size {
                max_size: settings.max_size_bytes(),
                max_backups: settings.max_backups,
                max_age: settings.max_age(),
                compress: settings.compress,
            },
            CutType::Time => RotationConfig::Time {
                interval: settings.rotation_interval(),
                max_age: settings.max_age(),
                rotation_size: settings.max_size_bytes(),
            },
        };

        let buffering = (settings.buf_size_kb > 0).then(|| BufferingConfig {
            size: settings.buffer_bytes(),
            flush_interval: settings.flush_interval(),
        });

        Ok(SinkPlan {
            directory: directory.to_path_buf(),
            file_pattern: format!("{}{}", base, ROTATION_PATTERN),
            rotation,
            buffering,
        })
    }

    /// Plan and build in one step.
    pub fn select(
        directory: impl AsRef<Path>,
        base_name: &str,
        settings: Option<&LogSettings>,
    ) -> Result<(SinkPlan, Box<dyn Appender>)> {
        let plan = Self::plan(directory, base_name, settings, &Local::now())?;
        let sink = plan.build()?;
        Ok((plan, sink))
    }
}

/// Lower-cased executable name without extension, symlinks resolved.
///
/// Falls back to `"app"` if the executable cannot be resolved.
pub fn process_name() -> String {
    std::env::current_exe()
        .and_then(|exe| exe.canonicalize())
        .ok()
        .and_then(|exe| exe.file_stem().map(|stem| stem.to_string_lossy().to_lowercase()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 8, 30, 5).unwrap()
    }

    #[test]
    fn test_no_settings_uses_fixed_time_policy() {
        let plan = SinkSelector::plan("/var/log/svc", "match", None, &now()).unwrap();

        assert_eq!(plan.file_pattern, "match_2025-06-01-08-30-05.log");
        assert_eq!(
            plan.rotation,
            RotationConfig::Time {
                interval: Duration::from_secs(7200),
                max_age: Duration::from_secs(30 * 86_400),
                rotation_size: 1 << 30,
            }
        );
        assert!(plan.buffering.is_none());
    }

    #[test]
    fn test_size_cut_type() {
        let mut settings = LogSettings::new();
        settings.max_size_mb = 50;
        settings.max_backups = 3;
        settings.max_age_days = 2;
        settings.compress = true;

        let plan = SinkSelector::plan("logs", "match", Some(&settings), &now()).unwrap();

        assert_eq!(plan.file_pattern, "match_%Y-%m-%d-%H-%M-%S.log");
        assert_eq!(
            plan.rotation,
            RotationConfig::Size {
                max_size: 50 * 1024 * 1024,
                max_backups: 3,
                max_age: Duration::from_secs(2 * 86_400),
                compress: true,
            }
        );
    }

    #[test]
    fn test_time_cut_type() {
        let mut settings = LogSettings::new().with_cut_type(CutType::Time);
        settings.rotation_minutes = 15;
        settings.max_size_mb = 10;

        let plan = SinkSelector::plan("logs", "match", Some(&settings), &now()).unwrap();

        assert_eq!(
            plan.rotation,
            RotationConfig::Time {
                interval: Duration::from_secs(900),
                max_age: Duration::from_secs(7 * 86_400),
                rotation_size: 10 * 1024 * 1024,
            }
        );
    }

    #[test]
    fn test_buffering_follows_buffer_size() {
        let unbuffered = SinkSelector::plan("logs", "m", Some(&LogSettings::new()), &now()).unwrap();
        assert!(unbuffered.buffering.is_none());

        let settings = LogSettings::new().with_buffer(8, 3);
        let buffered = SinkSelector::plan("logs", "m", Some(&settings), &now()).unwrap();
        assert_eq!(
            buffered.buffering,
            Some(BufferingConfig {
                size: 8 * 1024,
                flush_interval: Duration::from_secs(3),
            })
        );
        assert_eq!(buffered.flush_interval(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_empty_directory_is_rejected() {
        assert!(matches!(
            SinkSelector::plan("", "m", None, &now()),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_empty_base_uses_process_name() {
        let plan = SinkSelector::plan("logs", "", None, &now()).unwrap();
        assert!(plan.file_pattern.starts_with(&process_name()));
    }

    #[test]
    fn test_process_name_is_lowercase() {
        let name = process_name();
        assert!(!name.is_empty());
        assert_eq!(name, name.to_lowercase());
        assert!(!name.ends_with(".exe"));
    }

    #[test]
    fn test_select_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("logs");

        let (plan, mut sink) =
            SinkSelector::select(&target, "svc", Some(&LogSettings::new().with_buffer(1, 1)))
                .unwrap();
        assert!(target.is_dir());
        assert_eq!(sink.name(), "BufferedAppender");

        sink.append(crate::core::LogLevel::Info, b"first").unwrap();
        sink.flush().unwrap();
        drop(sink);

        let files: Vec<_> = std::fs::read_dir(&plan.directory).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_select_fails_when_directory_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(SinkSelector::select(&blocker, "svc", None).is_err());
    }
}
