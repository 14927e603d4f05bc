//! How raw cookie values map to logical values and back.
//!
//! A [`ValueCodec`] plays the part that the cookie type plays in a plain header
//! splitter: it decides what a parsed value *is*. The collection is generic over it,
//! so the same load state machine serves quoted, verbatim, and percent-encoded cookies.

use crate::codec::{quote, unquote};

/// Conversion between the wire form of a cookie value and its logical form.
pub trait ValueCodec {
    /// Turn a raw value, exactly as it appeared in the header, into the logical value.
    fn decode(raw: &str) -> String;

    /// Turn a logical value into the form written after `name=`.
    fn encode(value: &str) -> String;
}

/// Double-quoted values with backslash escapes (RFC 2109 style).
///
/// This is the codec behind [`SimpleCookie`](crate::SimpleCookie).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quoted;

impl ValueCodec for Quoted {
    fn decode(raw: &str) -> String {
        unquote(raw).into_owned()
    }

    fn encode(value: &str) -> String {
        quote(value).into_owned()
    }
}

/// Values are taken and written exactly as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbatim;

impl ValueCodec for Verbatim {
    fn decode(raw: &str) -> String {
        raw.to_owned()
    }

    fn encode(value: &str) -> String {
        value.to_owned()
    }
}

/// Percent-encoded values (`%20` for space), decoded and encoded by the `cookie` crate.
///
/// Only available with the `percent-encode` feature.
#[cfg(feature = "percent-encode")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PercentEncoded;

#[cfg(feature = "percent-encode")]
impl ValueCodec for PercentEncoded {
    fn decode(raw: &str) -> String {
        // the name is a placeholder; only the decoded value is kept
        match cookie::Cookie::parse_encoded(format!("v={raw}")) {
            Ok(cookie) => cookie.value().to_owned(),
            Err(_) => raw.to_owned(),
        }
    }

    fn encode(value: &str) -> String {
        let cookie = cookie::Cookie::new("v", value);
        let encoded = cookie.encoded().stripped().to_string();
        encoded.strip_prefix("v=").unwrap_or(&encoded).to_owned()
    }
}
