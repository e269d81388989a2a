//! Timestamp formatting utilities
//!
//! Two fixed formats are used: the record prefix (millisecond precision with
//! offset and zone) and the stamp embedded in log file names.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

/// Timestamp layouts used by the logger
///
/// # Examples
///
/// ```
/// use beacon_logger::core::TimestampFormat;
/// use chrono::{FixedOffset, TimeZone};
///
/// let tz = FixedOffset::east_opt(8 * 3600).unwrap();
/// let at = tz.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::FileStamp.format(&at), "2025-01-08-10-30-45");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45.123 +0800 +08:00`
    ///
    /// `chrono` has no zone abbreviations for local time, so the trailing zone
    /// field is the offset written with a colon.
    #[default]
    Prefix,

    /// `2025-01-08-10-30-45`, safe for file names.
    FileStamp,
}

impl TimestampFormat {
    pub const PREFIX_PATTERN: &'static str = "%Y-%m-%d %H:%M:%S%.3f %z %Z";
    pub const FILE_STAMP_PATTERN: &'static str = "%Y-%m-%d-%H-%M-%S";

    pub fn pattern(&self) -> &'static str {
        match self {
            TimestampFormat::Prefix => Self::PREFIX_PATTERN,
            TimestampFormat::FileStamp => Self::FILE_STAMP_PATTERN,
        }
    }

    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        datetime.format(self.pattern()).to_string()
    }
}

/// Expand strftime placeholders in `pattern`.
///
/// File name patterns come from user-supplied base names, so a stray `%` must
/// not panic. Patterns chrono cannot parse are returned verbatim.
pub fn expand_pattern<Tz>(pattern: &str, datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len() + 16);
    if write!(out, "{}", datetime.format(pattern)).is_err() {
        return pattern.to_string();
    }
    out
}

/// Whether `name` is a file produced from `pattern`: the pattern with every
/// placeholder filled in, optionally followed by a `.N` generation and `.gz`.
///
/// Numeric placeholders must match digits, so `svc_%Y.log` does not claim
/// `svc_admin_2025.log`.
pub fn matches_expanded(pattern: &str, name: &str) -> bool {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    let rest = if items.iter().any(|item| matches!(item, Item::Error)) {
        name.strip_prefix(pattern)
    } else {
        strip_items(&items, name)
    };
    rest.is_some_and(is_rotation_suffix)
}

fn strip_items<'n>(items: &[Item<'_>], mut rest: &'n str) -> Option<&'n str> {
    for item in items {
        rest = match item {
            Item::Literal(text) | Item::Space(text) => rest.strip_prefix(*text)?,
            Item::Numeric(..) => skip_run(rest, |c| c.is_ascii_digit())?,
            _ => skip_run(rest, |c| c.is_ascii_alphanumeric() || c == '+' || c == ':')?,
        };
    }
    Some(rest)
}

fn skip_run(text: &str, accept: impl Fn(char) -> bool) -> Option<&str> {
    let end = text.find(|c: char| !accept(c)).unwrap_or(text.len());
    (end > 0).then(|| &text[end..])
}

fn is_rotation_suffix(rest: &str) -> bool {
    let rest = rest.strip_suffix(".gz").unwrap_or(rest);
    match rest.strip_prefix('.') {
        None => rest.is_empty(),
        Some(generation) => {
            !generation.is_empty() && generation.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_datetime() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_prefix_format() {
        let result = TimestampFormat::Prefix.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08 10:30:45.123 +0800 +08:00");
    }

    #[test]
    fn test_file_stamp_format() {
        let result = TimestampFormat::FileStamp.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08-10-30-45");
    }

    #[test]
    fn test_default_is_prefix() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Prefix);
    }

    #[test]
    fn test_expand_pattern() {
        let expanded = expand_pattern("gateway_%Y-%m-%d-%H-%M-%S.log", &fixed_datetime());
        assert_eq!(expanded, "gateway_2025-01-08-10-30-45.log");

        let literal = expand_pattern("gateway_2024-12-31-00-00-00.log", &fixed_datetime());
        assert_eq!(literal, "gateway_2024-12-31-00-00-00.log");
    }

    #[test]
    fn test_expand_invalid_pattern_is_verbatim() {
        let expanded = expand_pattern("odd%Qname.log", &fixed_datetime());
        assert_eq!(expanded, "odd%Qname.log");
    }

    #[test]
    fn test_matches_expanded() {
        let pattern = "match_%Y-%m-%d-%H-%M-%S.log";
        assert!(matches_expanded(pattern, "match_2025-01-08-10-30-45.log"));
        assert!(matches_expanded(pattern, "match_2025-01-08-10-30-45.log.3"));
        assert!(matches_expanded(pattern, "match_2025-01-08-10-30-45.log.gz"));
        assert!(matches_expanded(pattern, "match_2025-01-08-10-30-45.log.2.gz"));

        assert!(!matches_expanded(pattern, "match_admin_2025-01-08-10-30-45.log"));
        assert!(!matches_expanded(pattern, "match_2025-01-08-10-30-45.log.gz.tmp"));
        assert!(!matches_expanded(pattern, "match_2025-01-08-10-30-45.txt"));
        assert!(!matches_expanded(pattern, "match_2025-01-08.log"));
    }

    #[test]
    fn test_matches_literal_pattern() {
        assert!(matches_expanded("svc_fixed.log", "svc_fixed.log.1"));
        assert!(!matches_expanded("svc_fixed.log", "svc_fixed.log.old"));
        assert!(matches_expanded("odd%Qname.log", "odd%Qname.log.gz"));
    }
}
