//! Display rendering for variadic log arguments
//!
//! Every value passed to the `*_args!` macros is turned into text through
//! [`Render`]. Scalars, text and bytes are built in; any `Serialize` type can be
//! logged through the [`Structured`] wrapper, which renders JSON.

use serde::Serialize;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// Turn a value into the text that appears in a log record.
///
/// Rendering never fails.
pub trait Render {
    fn render(&self) -> String;
}

macro_rules! render_with_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                #[inline]
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

// `f32`/`f64` Display is the shortest round-trip form and never uses exponents.
render_with_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

impl Render for [u8] {
    fn render(&self) -> String {
        String::from_utf8_lossy(self).into_owned()
    }
}

impl<const N: usize> Render for [u8; N] {
    fn render(&self) -> String {
        self.as_slice().render()
    }
}

impl Render for Vec<u8> {
    fn render(&self) -> String {
        self.as_slice().render()
    }
}

impl Render for Cow<'_, str> {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for () {
    fn render(&self) -> String {
        String::new()
    }
}

impl<T: Render> Render for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => String::new(),
        }
    }
}

impl<T: Render + ?Sized> Render for &T {
    #[inline]
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for &mut T {
    #[inline]
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for Arc<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

impl<T: Render + ?Sized> Render for Rc<T> {
    fn render(&self) -> String {
        (**self).render()
    }
}

/// JSON rendering for any serializable value.
///
/// A value that fails to serialize renders as an empty string.
///
/// # Examples
///
/// ```
/// use beacon_logger::{structured, Render};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Seat {
///     table: u32,
///     player: &'static str,
/// }
///
/// let seat = Seat { table: 4, player: "ana" };
/// assert_eq!(structured(&seat).render(), r#"{"table":4,"player":"ana"}"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Structured<T>(pub T);

impl<T: Serialize> Render for Structured<T> {
    fn render(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

pub fn structured<T: Serialize>(value: T) -> Structured<T> {
    Structured(value)
}

/// Render each value and join them with single spaces.
pub fn render_values(values: &[&dyn Render]) -> String {
    let mut out = String::new();
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(&value.render());
    }
    out
}
