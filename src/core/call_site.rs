//! Call-site tokens
//!
//! The location printed in every prefix is captured where the public entry
//! point is invoked, either by the logging macros or through `#[track_caller]`.
//! Nothing inspects the stack at a fixed depth, so wrapping the logger in more
//! helpers never shifts the reported line.

use std::panic::Location;
use std::path::Path;

/// Suffix appended to the enclosing function path by the `call_site!` anchor.
#[doc(hidden)]
pub const ANCHOR_SUFFIX: &str = "::__beacon_anchor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    function: &'static str,
}

impl CallSite {
    /// `function` is either a full path (`my_app::net::connect`) or the raw
    /// output of the `call_site!` anchor.
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Location of whoever called the `#[track_caller]` function this is used from.
    /// The enclosing function name is not available this way.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), "")
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Base name of the source file (`logger.rs` for `src/core/logger.rs`).
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }

    /// Last path segment of the calling function, closures stripped.
    pub fn function_name(&self) -> &'static str {
        let mut path = self.function.strip_suffix(ANCHOR_SUFFIX).unwrap_or(self.function);
        while let Some(stripped) = path.strip_suffix("::{{closure}}") {
            path = stripped;
        }
        match path.rfind("::") {
            Some(idx) => &path[idx + 2..],
            None => path,
        }
    }
}

/// Capture the current file, line and enclosing function as a [`CallSite`].
///
/// # Examples
///
/// ```
/// fn connect() -> beacon_logger::CallSite {
///     beacon_logger::call_site!()
/// }
///
/// assert_eq!(connect().function_name(), "connect");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new(::std::file!(), ::std::line!(), {
            fn __beacon_anchor() {}
            fn __beacon_name_of<T>(_: T) -> &'static str {
                ::std::any::type_name::<T>()
            }
            __beacon_name_of(__beacon_anchor)
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_from_path() {
        let site = CallSite::new("src/net/conn.rs", 42, "my_app::net::conn::connect");
        assert_eq!(site.file_name(), "conn.rs");
        assert_eq!(site.line(), 42);
        assert_eq!(site.function_name(), "connect");
    }

    #[test]
    fn test_function_name_strips_anchor_and_closures() {
        let site = CallSite::new(
            "src/main.rs",
            7,
            "my_app::run::{{closure}}::{{closure}}::__beacon_anchor",
        );
        assert_eq!(site.function_name(), "run");
    }

    #[test]
    fn test_macro_captures_enclosing_function() {
        fn handle_request() -> CallSite {
            crate::call_site!()
        }

        let site = handle_request();
        assert_eq!(site.file_name(), "call_site.rs");
        assert_eq!(site.function_name(), "handle_request");
    }

    #[test]
    fn test_macro_inside_closure() {
        fn outer() -> CallSite {
            let capture = || crate::call_site!();
            capture()
        }

        assert_eq!(outer().function_name(), "outer");
    }

    #[test]
    fn test_track_caller_location() {
        #[track_caller]
        fn where_am_i() -> CallSite {
            CallSite::caller()
        }

        let expected_line = line!() + 1;
        let site = where_am_i();
        assert_eq!(site.line(), expected_line);
        assert_eq!(site.file_name(), "call_site.rs");
        assert_eq!(site.function_name(), "");
    }
}
