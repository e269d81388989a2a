//! Console appender implementation

use crate::core::{Appender, LogLevel, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes each line to standard output.
///
/// Records already carry their own prefix, so the appender adds nothing but
/// the newline and, when enabled, a level color.
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Color lines by level. Has no effect without the `console` feature.
    ///
    /// # Example
    ///
    /// ```
    /// use beacon_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_colors(true);
    /// ```
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn render(&self, level: LogLevel, line: &[u8]) -> Vec<u8> {
        #[cfg(feature = "console")]
        if self.use_colors {
            let text = String::from_utf8_lossy(line);
            return format!("{}\n", text.color(level.color_code())).into_bytes();
        }

        #[cfg(not(feature = "console"))]
        let _ = (level, self.use_colors);

        let mut out = Vec::with_capacity(line.len() + 1);
        out.extend_from_slice(line);
        out.push(b'\n');
        out
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, level: LogLevel, line: &[u8]) -> Result<()> {
        let output = self.render(level, line);
        // One locked write so concurrent lines never interleave
        std::io::stdout().lock().write_all(&output)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_adds_newline() {
        let appender = ConsoleAppender::new();
        assert_eq!(appender.render(LogLevel::Info, b"hello"), b"hello\n");
    }

    #[test]
    fn test_bytes_pass_through_unchanged() {
        let appender = ConsoleAppender::with_colors(false);
        let cut = &"é".as_bytes()[..1];
        let rendered = appender.render(LogLevel::Warn, cut);
        assert_eq!(&rendered[..1], cut);
    }

    #[test]
    fn test_append_and_flush() {
        let mut appender = ConsoleAppender::default();
        assert!(appender.append(LogLevel::Debug, b"console line").is_ok());
        assert!(appender.flush().is_ok());
        assert_eq!(appender.name(), "console");
    }
}
