//! Conversions into the [`cookie`] crate, and optionally [`reqwest`].
//!
//! A [`Morsel`] maps onto [`cookie::Cookie`] attribute by attribute. `Comment` and
//! `Version` have no counterpart there and are dropped; an `expires` text that the
//! `cookie` crate cannot read as a date is dropped too.
//!
//! The cookie value is the wire value, quotes and escapes included, which is how the
//! `cookie` crate itself stores a parsed value.

use cookie::{Cookie, SameSite};
use time::Duration;
use tracing::debug;

use crate::date::expires_at;
use crate::jar::BaseCookie;
use crate::morsel::{Attr, AttrValue, Morsel};

impl From<&Morsel> for Cookie<'static> {
    fn from(morsel: &Morsel) -> Self {
        let name = morsel.key().unwrap_or_default().to_owned();
        let value = morsel.coded_value().unwrap_or_default().to_owned();
        let mut cookie = Cookie::new(name, value);

        for (attr, value) in morsel.iter() {
            if value.is_empty() {
                continue;
            }

            match attr {
                Attr::Domain => cookie.set_domain(value.to_string()),
                Attr::Path => cookie.set_path(value.to_string()),
                Attr::Secure => cookie.set_secure(value.is_truthy()),
                Attr::HttpOnly => cookie.set_http_only(value.is_truthy()),
                Attr::Partitioned => cookie.set_partitioned(value.is_truthy()),
                Attr::SameSite => cookie.set_same_site(same_site(value)),
                Attr::MaxAge => cookie.set_max_age(max_age(value)),
                Attr::Expires => match value {
                    AttrValue::Int(n) => cookie.set_expires(expires_at(*n)),
                    value => match parse_expires(&value.to_string()) {
                        Some(at) => cookie.set_expires(at),
                        None => debug!(expires = %value, "dropping unreadable expires"),
                    },
                },
                Attr::Comment | Attr::Version => {}
            }
        }

        cookie
    }
}

impl From<Morsel> for Cookie<'static> {
    fn from(morsel: Morsel) -> Self {
        Cookie::from(&morsel)
    }
}

impl<C> BaseCookie<C> {
    /// Convert every cookie of the collection, in name order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ri_http_cookies::SimpleCookie;
    ///
    /// let cookies = SimpleCookie::parse("session=abc123; Path=/; Secure").unwrap();
    /// let converted = cookies.to_cookies();
    ///
    /// assert_eq!(converted[0].name(), "session");
    /// assert_eq!(converted[0].path(), Some("/"));
    /// assert_eq!(converted[0].secure(), Some(true));
    /// ```
    pub fn to_cookies(&self) -> Vec<Cookie<'static>> {
        self.iter().map(|(_, morsel)| Cookie::from(morsel)).collect()
    }
}

fn same_site(value: &AttrValue) -> Option<SameSite> {
    let text = value.as_text()?;
    if text.eq_ignore_ascii_case("strict") {
        Some(SameSite::Strict)
    } else if text.eq_ignore_ascii_case("lax") {
        Some(SameSite::Lax)
    } else if text.eq_ignore_ascii_case("none") {
        Some(SameSite::None)
    } else {
        None
    }
}

fn max_age(value: &AttrValue) -> Option<Duration> {
    let seconds = match value {
        AttrValue::Int(n) => *n,
        AttrValue::Text(s) => s.trim().parse().ok()?,
        AttrValue::Bool(_) => return None,
    };
    Some(Duration::seconds(seconds))
}

/// Read an `expires` date with the `cookie` crate's own date grammar.
fn parse_expires(text: &str) -> Option<time::OffsetDateTime> {
    Cookie::parse(format!("x=y; Expires={text}")).ok()?.expires_datetime()
}

/// Optional support for reqwest integration when `reqwest` feature is enabled.
#[cfg(feature = "reqwest")]
pub mod reqwest_support {
    use super::*;

    /// Add every cookie of a collection to a reqwest cookie jar for `url`.
    ///
    /// `reqwest::cookie::Cookie` is a read-only wrapper, so cookies go into the jar
    /// through their `Set-Cookie` string form.
    ///
    /// # Example
    ///
    /// ```
    /// use ri_http_cookies::SimpleCookie;
    /// use ri_http_cookies::reqwest_support::add_to_jar;
    ///
    /// let cookies = SimpleCookie::parse("session=abc123; user=john").unwrap();
    ///
    /// let jar = reqwest::cookie::Jar::default();
    /// let url: reqwest::Url = "https://example.com".parse().unwrap();
    /// add_to_jar(&cookies, &jar, &url);
    /// ```
    pub fn add_to_jar<C>(cookies: &BaseCookie<C>, jar: &reqwest::cookie::Jar, url: &reqwest::Url) {
        for cookie in cookies.to_cookies() {
            jar.add_cookie_str(&cookie.to_string(), url);
        }
    }
}
