//! Governing configuration for the log pipeline
//!
//! When no [`LogSettings`] is supplied the logger runs in its ad hoc mode:
//! fixed-default time rotation, no fragmentation and no side channels.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const KIB: usize = 1024;
const MIB: u64 = 1024 * 1024;
const SECS_PER_DAY: u64 = 24 * 3600;
const MILLIS_PER_MINUTE: u64 = 60 * 1000;

/// Rotation engine selector.
///
/// Deserializes from the numeric codes `0` (size) and `1` (time) as well as
/// from `"size"` and `"time"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CutTypeRepr", into = "u8")]
pub enum CutType {
    #[default]
    Size,
    Time,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CutTypeRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<CutTypeRepr> for CutType {
    type Error = String;

    fn try_from(repr: CutTypeRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            CutTypeRepr::Code(0) => Ok(CutType::Size),
            CutTypeRepr::Code(1) => Ok(CutType::Time),
            CutTypeRepr::Code(other) => Err(format!("unknown cut type {}", other)),
            CutTypeRepr::Name(name) => match name.to_lowercase().as_str() {
                "size" => Ok(CutType::Size),
                "time" => Ok(CutType::Time),
                _ => Err(format!("unknown cut type '{}'", name)),
            },
        }
    }
}

impl From<CutType> for u8 {
    fn from(cut: CutType) -> Self {
        match cut {
            CutType::Size => 0,
            CutType::Time => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Write buffer in KiB; 0 writes synchronously
    pub buf_size_kb: usize,
    pub flush_interval_secs: u64,
    pub cut_type: CutType,
    pub max_age_days: u64,
    pub max_backups: usize,
    /// Size threshold in MiB, for both rotation engines
    pub max_size_mb: u64,
    pub compress: bool,
    pub rotation_minutes: u64,
    /// Longest line written as one record; 0 disables fragmentation
    pub max_line_len: usize,
    /// Remote list receiving a copy of every line; empty disables mirroring
    pub remote_list_key: String,
    /// Connection URL of the remote list store, e.g. `redis://127.0.0.1/`
    pub remote_store_url: Option<String>,
    /// Smallest delay reported by delay warnings
    pub delay_threshold: i64,
    /// Webhook notified on ERROR and FATAL
    pub alert_webhook: Option<String>,
    /// Webhook notified on delay warnings while `is_debug` is set
    pub delay_webhook: Option<String>,
    pub is_debug: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            buf_size_kb: 0,
            flush_interval_secs: 30,
            cut_type: CutType::Size,
            max_age_days: 7,
            max_backups: 10,
            max_size_mb: 100,
            compress: false,
            rotation_minutes: 60,
            max_line_len: 0,
            remote_list_key: String::new(),
            remote_store_url: None,
            delay_threshold: 0,
            alert_webhook: None,
            delay_webhook: None,
            is_debug: false,
        }
    }
}

impl LogSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: LogSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "read log settings",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buf_size_kb > 0 && self.flush_interval_secs == 0 {
            return Err(LoggerError::config(
                "LogSettings",
                "flush_interval_secs must be positive when buffering is enabled",
            ));
        }
        if self.cut_type == CutType::Time && self.rotation_minutes == 0 {
            return Err(LoggerError::config(
                "LogSettings",
                "rotation_minutes must be positive for time rotation",
            ));
        }

        let in_range = [
            ("buf_size_kb", self.buf_size_kb.checked_mul(KIB).is_some()),
            (
                "max_age_days",
                self.max_age_days.checked_mul(SECS_PER_DAY).is_some(),
            ),
            ("max_size_mb", self.max_size_mb.checked_mul(MIB).is_some()),
            // Time buckets are computed in signed milliseconds
            (
                "rotation_minutes",
                self.rotation_minutes
                    .checked_mul(MILLIS_PER_MINUTE)
                    .is_some_and(|ms| i64::try_from(ms).is_ok()),
            ),
        ];
        if let Some((field, _)) = in_range.iter().find(|(_, ok)| !ok) {
            return Err(LoggerError::config(
                "LogSettings",
                format!("{} is too large", field),
            ));
        }
        Ok(())
    }

    pub fn buffer_bytes(&self) -> usize {
        self.buf_size_kb.saturating_mul(KIB)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_days.saturating_mul(SECS_PER_DAY))
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(MIB)
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.rotation_minutes.saturating_mul(60))
    }

    pub fn alert_webhook(&self) -> Option<&str> {
        self.alert_webhook.as_deref().filter(|url| !url.is_empty())
    }

    pub fn delay_webhook(&self) -> Option<&str> {
        self.delay_webhook.as_deref().filter(|url| !url.is_empty())
    }

    pub fn remote_store_url(&self) -> Option<&str> {
        self.remote_store_url.as_deref().filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn with_cut_type(mut self, cut_type: CutType) -> Self {
        self.cut_type = cut_type;
        self
    }

    #[must_use]
    pub fn with_buffer(mut self, size_kb: usize, flush_interval_secs: u64) -> Self {
        self.buf_size_kb = size_kb;
        self.flush_interval_secs = flush_interval_secs;
        self
    }

    #[must_use]
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    #[must_use]
    pub fn with_remote_list_key(mut self, key: impl Into<String>) -> Self {
        self.remote_list_key = key.into();
        self
    }

    #[must_use]
    pub fn with_remote_store_url(mut self, url: impl Into<String>) -> Self {
        self.remote_store_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_delay_threshold(mut self, threshold: i64) -> Self {
        self.delay_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_alert_webhook(mut self, url: impl Into<String>) -> Self {
        self.alert_webhook = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_delay_webhook(mut self, url: impl Into<String>, is_debug: bool) -> Self {
        self.delay_webhook = Some(url.into());
        self.is_debug = is_debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings = LogSettings::from_json_str(r#"{"max_line_len": 4096}"#).unwrap();
        assert_eq!(settings.max_line_len, 4096);
        assert_eq!(settings.cut_type, CutType::Size);
        assert_eq!(settings.flush_interval_secs, 30);
        assert_eq!(settings.alert_webhook(), None);
    }

    #[test]
    fn test_cut_type_codes_and_names() {
        let by_code = LogSettings::from_json_str(r#"{"cut_type": 1}"#).unwrap();
        assert_eq!(by_code.cut_type, CutType::Time);

        let by_name = LogSettings::from_json_str(r#"{"cut_type": "size"}"#).unwrap();
        assert_eq!(by_name.cut_type, CutType::Size);

        assert!(LogSettings::from_json_str(r#"{"cut_type": 9}"#).is_err());
        assert!(LogSettings::from_json_str(r#"{"cut_type": "weekly"}"#).is_err());
    }

    #[test]
    fn test_cut_type_serializes_as_code() {
        let json = serde_json::to_string(&CutType::Time).unwrap();
        assert_eq!(json, "1");
    }

    #[test]
    fn test_unit_conversions() {
        let settings = LogSettings::new().with_buffer(256, 5);
        assert_eq!(settings.buffer_bytes(), 256 * 1024);
        assert_eq!(settings.flush_interval(), Duration::from_secs(5));
        assert_eq!(settings.max_age(), Duration::from_secs(7 * 86_400));
        assert_eq!(settings.max_size_bytes(), 100 * 1024 * 1024);
        assert_eq!(settings.rotation_interval(), Duration::from_secs(3600));
    }

    #[test]
    fn test_validation() {
        let settings = LogSettings::new().with_buffer(64, 0);
        assert!(matches!(
            settings.validate(),
            Err(LoggerError::InvalidConfiguration { .. })
        ));

        let mut settings = LogSettings::new().with_cut_type(CutType::Time);
        settings.rotation_minutes = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_values_rejected() {
        let err = LogSettings::from_json_str(r#"{"max_age_days": 300000000000000}"#).unwrap_err();
        assert!(err.to_string().contains("max_age_days"));

        let mut settings = LogSettings::new();
        settings.max_size_mb = u64::MAX / 1024;
        assert!(settings.validate().is_err());
        assert_eq!(settings.max_size_bytes(), u64::MAX);

        let mut settings = LogSettings::new().with_cut_type(CutType::Time);
        settings.rotation_minutes = u64::MAX / 60;
        assert!(settings.validate().is_err());

        let mut settings = LogSettings::new();
        settings.buf_size_kb = usize::MAX;
        assert!(settings.validate().is_err());
        assert_eq!(settings.buffer_bytes(), usize::MAX);
    }

    #[test]
    fn test_empty_webhook_counts_as_absent() {
        let settings = LogSettings::new().with_alert_webhook("");
        assert_eq!(settings.alert_webhook(), None);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");
        std::fs::write(&path, r#"{"remote_list_key": "svc:logs", "delay_threshold": 100}"#).unwrap();

        let settings = LogSettings::from_json_file(&path).unwrap();
        assert_eq!(settings.remote_list_key, "svc:logs");
        assert_eq!(settings.delay_threshold, 100);

        assert!(LogSettings::from_json_file(dir.path().join("missing.json")).is_err());
    }
}
