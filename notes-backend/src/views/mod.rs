//! Server-rendered HTML.
//!
//! Every view is a pure function from a data context to a `String`.
//! User-supplied text must pass through [`text`] or [`attr`] before it is
//! interpolated.

pub mod errors;
mod form;
mod layout;
pub mod notes;

pub use form::FormContext;
pub use layout::layout;

use std::borrow::Cow;

/// Escape for element content
pub fn text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// Escape for a double-quoted attribute value
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
