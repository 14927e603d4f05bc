//! A single cookie: its name, value, wire value and reserved attributes.

use std::fmt;
use std::str::FromStr;

use crate::codec::{is_legal_key, quote, quote_attribute};
use crate::date::{CookieDate, expires_at};
use crate::error::CookieError;
use crate::utils::ensure;

/// The reserved cookie attributes.
///
/// Variants are declared in canonical rendering order, which is alphabetical by
/// [`Attr::key`], so `Ord` sorts attributes the way they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attr {
    Comment,
    Domain,
    Expires,
    HttpOnly,
    MaxAge,
    Partitioned,
    Path,
    SameSite,
    Secure,
    Version,
}

impl Attr {
    /// Every attribute, in rendering order.
    pub const ALL: [Attr; 10] = [
        Attr::Comment,
        Attr::Domain,
        Attr::Expires,
        Attr::HttpOnly,
        Attr::MaxAge,
        Attr::Partitioned,
        Attr::Path,
        Attr::SameSite,
        Attr::Secure,
        Attr::Version,
    ];

    /// The lowercase key used for lookups, e.g. `max-age`.
    pub const fn key(self) -> &'static str {
        match self {
            Attr::Comment => "comment",
            Attr::Domain => "domain",
            Attr::Expires => "expires",
            Attr::HttpOnly => "httponly",
            Attr::MaxAge => "max-age",
            Attr::Partitioned => "partitioned",
            Attr::Path => "path",
            Attr::SameSite => "samesite",
            Attr::Secure => "secure",
            Attr::Version => "version",
        }
    }

    /// The label written in `Set-Cookie` output, e.g. `Max-Age`.
    pub const fn label(self) -> &'static str {
        match self {
            Attr::Comment => "Comment",
            Attr::Domain => "Domain",
            Attr::Expires => "expires",
            Attr::HttpOnly => "HttpOnly",
            Attr::MaxAge => "Max-Age",
            Attr::Partitioned => "Partitioned",
            Attr::Path => "Path",
            Attr::SameSite => "SameSite",
            Attr::Secure => "Secure",
            Attr::Version => "Version",
        }
    }

    /// Flag attributes render as a bare label and may appear without a value.
    pub const fn is_flag(self) -> bool {
        matches!(self, Attr::Secure | Attr::HttpOnly | Attr::Partitioned)
    }

    /// Case-insensitive lookup of a reserved key.
    pub fn from_key(key: &str) -> Option<Attr> {
        Attr::ALL.into_iter().find(|attr| attr.key().eq_ignore_ascii_case(key))
    }
}

impl FromStr for Attr {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attr::from_key(s).ok_or_else(|| CookieError::invalid_attribute(s))
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The value held by an attribute.
///
/// Unset attributes hold `Text("")`. Flag attributes normally hold `Bool`, but any
/// truthy value renders them as a bare flag, so `httponly=foo` keeps `Text("foo")`
/// around for inspection while still writing `HttpOnly`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl AttrValue {
    /// Whether the attribute is unset (the empty string).
    pub fn is_empty(&self) -> bool {
        matches!(self, AttrValue::Text(s) if s.is_empty())
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Text(s) => !s.is_empty(),
            AttrValue::Int(n) => *n != 0,
            AttrValue::Bool(b) => *b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        AttrValue::Text(String::new())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl PartialEq<&str> for AttrValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl PartialEq<i64> for AttrValue {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<bool> for AttrValue {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, AttrValue::Bool(b) if b == other)
    }
}

/// One field per reserved attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Attributes {
    comment: AttrValue,
    domain: AttrValue,
    expires: AttrValue,
    httponly: AttrValue,
    max_age: AttrValue,
    partitioned: AttrValue,
    path: AttrValue,
    samesite: AttrValue,
    secure: AttrValue,
    version: AttrValue,
}

impl Attributes {
    fn get(&self, attr: Attr) -> &AttrValue {
        match attr {
            Attr::Comment => &self.comment,
            Attr::Domain => &self.domain,
            Attr::Expires => &self.expires,
            Attr::HttpOnly => &self.httponly,
            Attr::MaxAge => &self.max_age,
            Attr::Partitioned => &self.partitioned,
            Attr::Path => &self.path,
            Attr::SameSite => &self.samesite,
            Attr::Secure => &self.secure,
            Attr::Version => &self.version,
        }
    }

    fn get_mut(&mut self, attr: Attr) -> &mut AttrValue {
        match attr {
            Attr::Comment => &mut self.comment,
            Attr::Domain => &mut self.domain,
            Attr::Expires => &mut self.expires,
            Attr::HttpOnly => &mut self.httponly,
            Attr::MaxAge => &mut self.max_age,
            Attr::Partitioned => &mut self.partitioned,
            Attr::Path => &mut self.path,
            Attr::SameSite => &mut self.samesite,
            Attr::Secure => &mut self.secure,
            Attr::Version => &mut self.version,
        }
    }
}

/// A single cookie record.
///
/// The name, logical value and wire value can only be set together through
/// [`Morsel::set`]. Attributes are addressed by reserved key, case-insensitively;
/// anything outside the reserved set is refused with [`CookieError::InvalidAttribute`].
///
/// # Examples
///
/// ```
/// use ri_http_cookies::Morsel;
///
/// let mut morsel = Morsel::new();
/// morsel.set("Customer", "WILE_E_COYOTE", "\"WILE_E_COYOTE\"").unwrap();
/// morsel.insert("secure", true).unwrap();
/// morsel.insert("HttpOnly", true).unwrap();
///
/// assert_eq!(morsel.to_string(), "Set-Cookie: Customer=\"WILE_E_COYOTE\"; HttpOnly; Secure");
/// assert!(morsel.insert("holy", "grenade").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Morsel {
    key: Option<String>,
    value: Option<String>,
    coded_value: Option<String>,
    attrs: Attributes,
}

impl Morsel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `key` names a reserved attribute (case-insensitive).
    pub fn is_reserved_key(key: &str) -> bool {
        Attr::from_key(key).is_some()
    }

    /// Set the name, logical value and wire value in one step.
    ///
    /// # Errors
    ///
    /// - [`CookieError::ReservedKey`] if `key` is an attribute name such as `path`
    /// - [`CookieError::IllegalKey`] if `key` contains characters outside the name class
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<String>,
        coded_value: impl Into<String>,
    ) -> Result<(), CookieError> {
        ensure!(!Self::is_reserved_key(key), CookieError::reserved_key(key));
        ensure!(is_legal_key(key), CookieError::illegal_key(key));

        self.set_unchecked(key, value.into(), coded_value.into());
        Ok(())
    }

    pub(crate) fn set_unchecked(&mut self, key: &str, value: String, coded_value: String) {
        self.key = Some(key.to_owned());
        self.value = Some(value);
        self.coded_value = Some(coded_value);
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value as written on the wire, quotes and escapes included.
    pub fn coded_value(&self) -> Option<&str> {
        self.coded_value.as_deref()
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> Result<&AttrValue, CookieError> {
        Ok(self.attr(key.parse()?))
    }

    pub fn attr(&self, attr: Attr) -> &AttrValue {
        self.attrs.get(attr)
    }

    /// Set an attribute by key.
    ///
    /// # Errors
    ///
    /// [`CookieError::InvalidAttribute`] if `key` is not reserved; the morsel is unchanged.
    pub fn insert(&mut self, key: &str, value: impl Into<AttrValue>) -> Result<(), CookieError> {
        let attr: Attr = key.parse()?;
        self.set_attr(attr, value);
        Ok(())
    }

    pub fn set_attr(&mut self, attr: Attr, value: impl Into<AttrValue>) {
        *self.attrs.get_mut(attr) = value.into();
    }

    /// Return the current value of `key`.
    ///
    /// Every reserved key always holds a value (possibly the empty one), so `default`
    /// is never stored; the call only validates the key.
    pub fn setdefault(&mut self, key: &str, _default: impl Into<AttrValue>) -> Result<&AttrValue, CookieError> {
        let attr: Attr = key.parse()?;
        Ok(self.attr(attr))
    }

    /// Set several attributes at once.
    ///
    /// All keys are validated before anything is written, so an unknown key leaves
    /// the morsel untouched.
    pub fn update<I, K, V>(&mut self, values: I) -> Result<(), CookieError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<AttrValue>,
    {
        let staged = values
            .into_iter()
            .map(|(key, value)| Ok((key.as_ref().parse::<Attr>()?, value.into())))
            .collect::<Result<Vec<_>, CookieError>>()?;

        for (attr, value) in staged {
            self.set_attr(attr, value);
        }
        Ok(())
    }

    /// Whether `key` is an attribute of this morsel; true exactly for reserved keys.
    pub fn contains_key(&self, key: &str) -> bool {
        Self::is_reserved_key(key)
    }

    /// Iterate over every attribute in rendering order, set or not.
    pub fn iter(&self) -> impl Iterator<Item = (Attr, &AttrValue)> + '_ {
        Attr::ALL.into_iter().map(|attr| (attr, self.attr(attr)))
    }

    /// Render as `{header} name=value; Attr=...`.
    pub fn output(&self, attrs: Option<&[Attr]>, header: &str) -> String {
        format!("{header} {}", Rendered { morsel: self, attrs })
    }

    /// Render `name=value` followed by every set attribute, optionally restricted to `attrs`.
    pub fn output_string(&self, attrs: Option<&[Attr]>) -> String {
        Rendered { morsel: self, attrs }.to_string()
    }

    /// Render as a `document.cookie` assignment wrapped in a script tag.
    pub fn js_output(&self, attrs: Option<&[Attr]>) -> String {
        let escaped = self.output_string(attrs).replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            "\n        <script type=\"text/javascript\">\n        <!-- begin hiding\n        \
             document.cookie = \"{escaped}\";\n        // end hiding -->\n        </script>\n        "
        )
    }
}

impl fmt::Display for Morsel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set-Cookie: {}", Rendered { morsel: self, attrs: None })
    }
}

/// `name=value` and the set attributes of a morsel, in rendering order.
struct Rendered<'a> {
    morsel: &'a Morsel,
    attrs: Option<&'a [Attr]>,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let morsel = self.morsel;
        write!(f, "{}={}", morsel.key().unwrap_or_default(), morsel.coded_value().unwrap_or_default())?;

        for (attr, value) in morsel.iter() {
            if value.is_empty() {
                continue;
            }
            if let Some(attrs) = self.attrs
                && !attrs.contains(&attr)
            {
                continue;
            }

            let label = attr.label();
            match (attr, value) {
                (Attr::Expires, AttrValue::Int(n)) => write!(f, "; {label}={}", CookieDate(expires_at(*n)))?,
                (Attr::Comment, AttrValue::Text(s)) => write!(f, "; {label}={}", quote(s))?,
                (Attr::Domain | Attr::Path | Attr::Version, AttrValue::Text(s)) => {
                    write!(f, "; {label}={}", quote_attribute(s))?
                }
                (attr, value) if attr.is_flag() => {
                    if value.is_truthy() {
                        write!(f, "; {label}")?;
                    }
                }
                (_, value) => write!(f, "; {label}={value}")?,
            }
        }

        Ok(())
    }
}
