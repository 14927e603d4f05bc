//! The cookie collection and the state machine that loads headers into it.
//!
//! Loading is all-or-nothing. Every token of a header is checked and staged before the
//! collection is touched; a header that does not parse cleanly from start to end leaves
//! the collection exactly as it was.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::codec::{is_legal_key, unquote};
use crate::config::Config;
use crate::error::{CookieError, SoftReason};
use crate::morsel::{Attr, AttrValue, Morsel};
use crate::scanner::{ScanError, Scanner, Token};
use crate::utils::ensure;
use crate::value::{Quoted, ValueCodec};

/// A cookie staged by the state machine, not yet committed.
#[derive(Debug)]
struct Pending<'a> {
    name: &'a str,
    raw: &'a str,
    attrs: Vec<(Attr, AttrValue)>,
}

/// A collection of [`Morsel`]s keyed by cookie name.
///
/// Names are case-sensitive. Iteration and every rendering walk the cookies in
/// lexicographic name order, never insertion order, so output is deterministic.
///
/// The codec `C` decides how raw values are decoded on load and encoded on
/// [`insert`](BaseCookie::insert); see [`SimpleCookie`] for the usual choice.
///
/// The collection is not synchronized. Build one per request from that request's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseCookie<C = Quoted> {
    cookies: BTreeMap<String, Morsel>,
    config: Config,
    // the codec is only used through its associated functions
    _codec: PhantomData<C>,
}

/// A collection using double-quoted, backslash-escaped values.
///
/// # Examples
///
/// ```
/// use ri_http_cookies::SimpleCookie;
///
/// let mut cookies = SimpleCookie::new();
/// cookies.load("session=\"user123\"; preferences=dark").unwrap();
///
/// assert_eq!(cookies.get("session").and_then(|m| m.value()), Some("user123"));
/// assert_eq!(cookies.output(None), "Set-Cookie: preferences=dark\r\nSet-Cookie: session=\"user123\"");
/// ```
pub type SimpleCookie = BaseCookie<Quoted>;

impl<C> Default for BaseCookie<C> {
    fn default() -> Self {
        Self { cookies: BTreeMap::new(), config: Config::default(), _codec: PhantomData }
    }
}

impl<C: ValueCodec> BaseCookie<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config, ..Self::default() }
    }

    /// Create a collection and load `input` into it.
    pub fn parse(input: &str) -> Result<Self, CookieError> {
        let mut cookies = Self::new();
        cookies.load(input)?;
        Ok(cookies)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a `Cookie` or `Set-Cookie` header value.
    ///
    /// Cookies and their attributes are merged into the collection only if the whole
    /// header parses. A cookie that already exists gets the new value, and the new
    /// attributes are applied over its existing ones.
    ///
    /// # Errors
    ///
    /// - [`CookieError::IllegalCharacter`] for an unquoted comma outside a date
    /// - [`CookieError::InputTooLarge`] if the header exceeds [`Config::max_input_len`]
    ///
    /// Any other malformed input (illegal names, attributes with no cookie, trailing
    /// garbage) discards the header silently and returns `Ok(())`.
    pub fn load(&mut self, input: &str) -> Result<(), CookieError> {
        if let Some(max) = self.config.max_input_len() {
            ensure!(input.len() <= max, CookieError::input_too_large(input.len(), max));
        }

        let pending = match stage(input) {
            Ok(pending) => pending,
            Err(ScanError::Hard(e)) => {
                debug!(cause = %e, "rejected cookie header");
                return Err(e);
            }
            Err(ScanError::Soft { reason, position }) => {
                debug!(%reason, position, "discarded cookie header");
                return Ok(());
            }
        };

        trace!(count = pending.len(), "committing cookies");
        for Pending { name, raw, attrs } in pending {
            let morsel = self.cookies.entry(name.to_owned()).or_default();
            morsel.set_unchecked(name, C::decode(raw), raw.to_owned());
            for (attr, value) in attrs {
                morsel.set_attr(attr, value);
            }
        }
        Ok(())
    }

    /// Assign `value` to the cookie `name`, replacing any existing record.
    ///
    /// The wire value is produced by the codec `C`.
    ///
    /// # Errors
    ///
    /// [`CookieError::ReservedKey`] or [`CookieError::IllegalKey`] if `name` cannot name a cookie.
    pub fn insert(&mut self, name: &str, value: &str) -> Result<(), CookieError> {
        let mut morsel = Morsel::new();
        morsel.set(name, value, C::encode(value))?;
        self.cookies.insert(name.to_owned(), morsel);
        Ok(())
    }

    /// Store a prepared morsel under `name`, replacing any existing record.
    pub fn insert_morsel(&mut self, name: impl Into<String>, morsel: Morsel) -> Option<Morsel> {
        self.cookies.insert(name.into(), morsel)
    }
}

impl<C> BaseCookie<C> {
    pub fn get(&self, name: &str) -> Option<&Morsel> {
        self.cookies.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Morsel> {
        self.cookies.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Morsel> {
        self.cookies.remove(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterate over `(name, morsel)` in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Morsel> {
        self.cookies.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.cookies.keys().map(String::as_str)
    }

    /// One `Set-Cookie:` line per cookie, joined by `\r\n`.
    pub fn output(&self, attrs: Option<&[Attr]>) -> String {
        self.output_with(attrs, "Set-Cookie:", "\r\n")
    }

    /// One `{header} ...` line per cookie, joined by `sep`.
    pub fn output_with(&self, attrs: Option<&[Attr]>, header: &str, sep: &str) -> String {
        self.cookies.values().map(|morsel| morsel.output(attrs, header)).collect::<Vec<_>>().join(sep)
    }

    /// Every cookie as a `document.cookie` script snippet, concatenated.
    pub fn js_output(&self, attrs: Option<&[Attr]>) -> String {
        self.cookies.values().map(|morsel| morsel.js_output(attrs)).collect()
    }
}

impl<C> fmt::Display for BaseCookie<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output(None))
    }
}

impl<'a, C> IntoIterator for &'a BaseCookie<C> {
    type Item = (&'a String, &'a Morsel);
    type IntoIter = btree_map::Iter<'a, String, Morsel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Run the load state machine over a header, staging cookies without committing them.
///
/// A rejected header is still searched for an unquoted comma, which turns the rejection
/// into an error.
fn stage(input: &str) -> Result<Vec<Pending<'_>>, ScanError> {
    let mut scanner = Scanner::new(input);
    let staged = stage_tokens(&mut scanner);

    if let Err(ScanError::Soft { .. }) = staged
        && let Some(e) = scanner.stray_comma()
    {
        return Err(ScanError::Hard(e));
    }
    staged
}

fn stage_tokens<'a>(scanner: &mut Scanner<'a>) -> Result<Vec<Pending<'a>>, ScanError> {
    let mut pending: Vec<Pending<'a>> = Vec::new();

    while let Some(token) = scanner.next() {
        let token = token?;
        let position = Scanner::position(scanner);
        let reject = |reason| ScanError::Soft { reason, position };
        let key = token.key();

        if let Some(name) = key.strip_prefix('$') {
            // RFC 2965 attributes such as `$Version` that precede every cookie apply to
            // the header as a whole and carry nothing we keep
            let Some(current) = pending.last_mut() else {
                continue;
            };
            let attr = Attr::from_key(name).ok_or(reject(SoftReason::UnknownAttribute))?;
            bind(current, attr, token).map_err(reject)?;
        } else if let Some(attr) = Attr::from_key(key) {
            let current = pending.last_mut().ok_or(reject(SoftReason::OrphanAttribute))?;
            bind(current, attr, token).map_err(reject)?;
        } else {
            let Token::Pair(name, raw) = token else {
                return Err(reject(SoftReason::BareToken));
            };
            if !is_legal_key(name) {
                return Err(reject(SoftReason::IllegalName));
            }
            pending.push(Pending { name, raw, attrs: Vec::new() });
        }
    }

    Ok(pending)
}

/// Attach an attribute token to the cookie it follows.
fn bind(current: &mut Pending<'_>, attr: Attr, token: Token<'_>) -> Result<(), SoftReason> {
    let value = match token {
        Token::Pair(_, raw) => AttrValue::Text(unquote(raw).into_owned()),
        Token::Bare(_) if attr.is_flag() => AttrValue::Bool(true),
        Token::Bare(_) => return Err(SoftReason::BareToken),
    };
    current.attrs.push((attr, value));
    Ok(())
}
