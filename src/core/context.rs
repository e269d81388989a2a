//! Process identity and the record prefix

use super::{call_site::CallSite, log_level::LogLevel, timestamp::TimestampFormat};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Deployment mode.
///
/// In a container only FATAL records reach the file sink; everything else is
/// console-only and collected by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    BareMetal,
    Container,
}

impl Environment {
    /// `LOG_ENV=k8s` (or `container`) selects [`Environment::Container`], as does
    /// running inside a Kubernetes pod.
    pub fn detect() -> Self {
        match std::env::var("LOG_ENV") {
            Ok(value) if matches!(value.to_lowercase().as_str(), "k8s" | "container") => {
                Environment::Container
            }
            Ok(_) => Environment::BareMetal,
            Err(_) if std::env::var_os("KUBERNETES_SERVICE_HOST").is_some() => {
                Environment::Container
            }
            Err(_) => Environment::BareMetal,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Environment::Container)
    }
}

/// Fields stamped on every record and every alert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessIdentity {
    pub gateway: String,
    pub host_name: String,
    pub app_id: String,
    pub environment: Environment,
}

impl ProcessIdentity {
    pub fn new(
        gateway: impl Into<String>,
        host_name: impl Into<String>,
        app_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            gateway: gateway.into(),
            host_name: host_name.into(),
            app_id: app_id.into(),
            environment,
        }
    }

    /// Build the identity from the machine host name and the `LOG_GATEWAY`,
    /// `LOG_APP_ID` and `LOG_ENV` environment variables.
    pub fn detect() -> Self {
        let host_name = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "-".to_string());

        Self {
            gateway: std::env::var("LOG_GATEWAY").unwrap_or_default(),
            host_name,
            app_id: std::env::var("LOG_APP_ID").unwrap_or_default(),
            environment: Environment::detect(),
        }
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContextFormatter {
    identity: ProcessIdentity,
}

impl ContextFormatter {
    pub fn new(identity: ProcessIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    /// Prefix for a record at `level`, stamped with the current local time.
    ///
    /// Returns an empty string when the call site is unknown.
    pub fn prefix(&self, level: LogLevel, site: Option<&CallSite>) -> String {
        self.prefix_at(level, site, &Local::now())
    }

    pub fn prefix_at<Tz>(&self, level: LogLevel, site: Option<&CallSite>, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(site) = site else {
            return String::new();
        };

        format!(
            "{} {} {} {} {} {}:{} {} ",
            TimestampFormat::Prefix.format(now),
            self.identity.gateway,
            self.identity.host_name,
            self.identity.app_id,
            level.to_str(),
            site.file_name(),
            site.line(),
            site.function_name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn identity() -> ProcessIdentity {
        ProcessIdentity::new("gw-01", "node-a", "match-svc", Environment::BareMetal)
    }

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 9, 23, 59, 58)
            .unwrap()
            + chrono::Duration::milliseconds(7)
    }

    #[test]
    fn test_prefix_layout() {
        let formatter = ContextFormatter::new(identity());
        let site = CallSite::new("src/room/join.rs", 88, "match_svc::room::join::enter");

        let prefix = formatter.prefix_at(LogLevel::Warn, Some(&site), &fixed_now());
        assert_eq!(
            prefix,
            "2025-03-09 23:59:58.007 +0000 +00:00 gw-01 node-a match-svc WARN join.rs:88 enter "
        );
    }

    #[test]
    fn test_unknown_site_gives_empty_prefix() {
        let formatter = ContextFormatter::new(identity());
        assert_eq!(formatter.prefix_at(LogLevel::Info, None, &fixed_now()), "");
    }

    #[test]
    fn test_live_prefix_contains_level_and_location() {
        let formatter = ContextFormatter::new(identity());
        let site = crate::call_site!();
        let prefix = formatter.prefix(LogLevel::Error, Some(&site));

        assert!(prefix.contains(" ERROR context.rs:"));
        assert!(prefix.ends_with(" test_live_prefix_contains_level_and_location "));
    }

    #[test]
    fn test_environment_flags() {
        assert!(Environment::Container.is_container());
        assert!(!Environment::BareMetal.is_container());
        assert_eq!(
            identity().with_environment(Environment::Container).environment,
            Environment::Container
        );
    }
}
