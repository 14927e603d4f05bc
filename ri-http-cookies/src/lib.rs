//! A library for parsing and rendering HTTP `Cookie` and `Set-Cookie` header strings.
//!
//! Headers are loaded into a [`SimpleCookie`], a collection of [`Morsel`]s keyed by
//! cookie name. Each morsel carries the cookie's logical value, its wire value and the
//! reserved attributes (`Path`, `Domain`, `expires`, `Max-Age`, `Secure`, `HttpOnly`,
//! `SameSite`, `Partitioned`, `Comment`, `Version`). The collection renders back to
//! `Set-Cookie` lines, or to a `document.cookie` script snippet.
//!
//! **Note**: This is a **security-focused parser** for untrusted headers. Loading is
//! all-or-nothing: a header that is not understood from start to end changes nothing.
//!
//! # Features
//!
//! - **Linear-time escapes**: quoted values with `\"` and `\ooo` escapes decode in a single
//!   pass, however many backslashes the header holds
//! - **Atomic loading**: cookies and attributes are staged and committed only if the whole
//!   header parses
//! - **Date-aware scanning**: `expires=Wed, 01 Jan 2010 00:00:00 GMT` is read as one value,
//!   while any other unquoted comma is refused with an error
//! - **Pluggable value codecs**: quoted (the default), verbatim, or percent-encoded with the
//!   `percent-encode` feature
//! - **Interop**: every morsel converts into a [`cookie::Cookie`], and with the `reqwest`
//!   feature a collection can be added to a `reqwest` cookie jar
//!
//! # Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ri-http-cookies = "0.3"
//! ```
//!
//! For percent-encoded values, enable the `percent-encode` feature:
//!
//! ```toml
//! [dependencies]
//! ri-http-cookies = { version = "0.3", features = ["percent-encode"] }
//! ```
//!
//! For reqwest support, enable the `reqwest` feature:
//!
//! ```toml
//! [dependencies]
//! ri-http-cookies = { version = "0.3", features = ["reqwest"] }
//! reqwest = { version = "0.12", features = ["cookies"] }
//! ```
//!
//! # Examples
//!
//! Loading a header:
//!
//! ```
//! use ri_http_cookies::SimpleCookie;
//!
//! let mut cookies = SimpleCookie::new();
//! cookies.load("chips=ahoy; vienna=finger").unwrap();
//!
//! assert_eq!(cookies.len(), 2);
//! assert_eq!(cookies.get("chips").and_then(|m| m.value()), Some("ahoy"));
//! assert_eq!(cookies.to_string(), "Set-Cookie: chips=ahoy\r\nSet-Cookie: vienna=finger");
//! ```
//!
//! Quoted values and attributes:
//!
//! ```
//! use ri_http_cookies::{Attr, SimpleCookie};
//!
//! let cookies = SimpleCookie::parse(r#"Customer="WILE_E_COYOTE"; Version=1; Path=/acme"#).unwrap();
//! let morsel = cookies.get("Customer").unwrap();
//!
//! assert_eq!(morsel.value(), Some("WILE_E_COYOTE"));
//! assert_eq!(*morsel.get("path").unwrap(), "/acme");
//! assert_eq!(cookies.output(Some(&[Attr::Path])), r#"Set-Cookie: Customer="WILE_E_COYOTE"; Path=/acme"#);
//! ```
//!
//! Setting values that need quoting:
//!
//! ```
//! use ri_http_cookies::SimpleCookie;
//!
//! let mut cookies = SimpleCookie::new();
//! cookies.insert("val", "some,funky;stuff").unwrap();
//! cookies.get_mut("val").unwrap().insert("max-age", 3600).unwrap();
//!
//! assert_eq!(cookies.to_string(), r#"Set-Cookie: val="some\054funky\073stuff"; Max-Age=3600"#);
//! ```
//!
//! Malformed headers are discarded, while an unquoted comma is an error:
//!
//! ```
//! use ri_http_cookies::SimpleCookie;
//!
//! let mut cookies = SimpleCookie::new();
//! assert!(cookies.load("foo=bar; baz").is_ok());
//! assert!(cookies.is_empty());
//!
//! assert!(cookies.load("a=b, c=d").is_err());
//! ```

pub mod codec;
mod config;
mod date;
mod error;
mod interop;
mod jar;
mod morsel;
pub mod scanner;
mod utils;
mod value;

pub use config::Config;
pub use date::{ABSOLUTE_EXPIRES_THRESHOLD, CookieDate, expires_at};
pub use error::{CookieError, SoftReason};
#[cfg(feature = "reqwest")]
pub use interop::reqwest_support;
pub use jar::{BaseCookie, SimpleCookie};
pub use morsel::{Attr, AttrValue, Morsel};
#[cfg(feature = "percent-encode")]
pub use value::PercentEncoded;
pub use value::{Quoted, ValueCodec, Verbatim};
