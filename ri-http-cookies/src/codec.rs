//! The quoted-string escape grammar used by cookie values and attributes.
//!
//! Quoted cookie values may carry two kinds of escapes:
//!
//! - `\ooo`: three octal digits naming a code point in `0..=255` (`\042` is `"`,
//!   `\377` is `ÿ`)
//! - `\c`: any other character taken literally (`\"` is `"`, `\\` is `\`)
//!
//! [`unquote`] decodes in a single left-to-right pass and never looks at a consumed
//! character again, so its cost is linear in the input no matter how many backslashes
//! an attacker packs into a header. [`quote`] is the inverse used when rendering.

use std::borrow::Cow;

/// Check if a character may appear in a cookie name.
///
/// This is the RFC 6265 `token` class (visible ASCII minus separators) with `:` admitted,
/// since servers and browsers accept it in names.
#[inline(always)]
pub fn is_legal_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~' | ':')
}

/// Check if a string is a legal, non-empty cookie name.
pub fn is_legal_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_legal_key_char)
}

/// Check if a character may appear in an unquoted cookie value.
///
/// Values are more permissive than names: brackets and most separators are allowed.
/// The comma is absent; the scanner treats it as a hard error.
#[inline(always)]
pub(crate) fn is_legal_value_char(c: char) -> bool {
    is_legal_key_char(c) || matches!(c, '[' | ']' | '(' | ')' | '<' | '>' | '@' | '/' | '?' | '=' | '{' | '}')
}

/// Characters that must be escaped inside a quoted string.
#[inline(always)]
fn needs_escape(c: char) -> bool {
    matches!(c as u32, 0..=0x1f | 0x7f..=0xff) || matches!(c, '"' | '\\' | ',' | ';')
}

/// Decode a possibly double-quoted cookie value into its logical string.
///
/// Values that are not wrapped in double quotes are returned as-is.
///
/// # Examples
///
/// ```
/// use ri_http_cookies::codec::unquote;
///
/// assert_eq!(unquote("plain"), "plain");
/// assert_eq!(unquote(r#""E=mc2; L=\"Loves\"""#), r#"E=mc2; L="Loves""#);
/// assert_eq!(unquote(r#""\101\102\103""#), "ABC");
/// assert_eq!(unquote(r#""\400""#), "400");
/// ```
pub fn unquote(value: &str) -> Cow<'_, str> {
    if value.len() < 2 || !value.starts_with('"') || !value.ends_with('"') {
        return Cow::Borrowed(value);
    }

    let content = &value[1..value.len() - 1];
    if !content.contains('\\') {
        return Cow::Borrowed(content);
    }

    Cow::Owned(unescape(content))
}

/// Decode the escapes of a quoted string's content (the part between the quotes).
pub fn unescape(content: &str) -> String {
    let bytes = content.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);

    // `run` marks the start of the verbatim run that has not been copied yet
    let mut run = 0;
    let mut i = 0;

    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'\\') {
        let backslash = i + offset;
        out.push_str(&content[run..backslash]);

        let rest = &bytes[backslash + 1..];
        let digits = rest.iter().take(3).take_while(|b| b.is_ascii_digit()).count();

        i = if digits == 3
            && let Some(code) = octal(&rest[..3])
        {
            out.push(char::from(code));
            backslash + 4
        } else if digits > 0 {
            // not a valid octal escape: the digits stand for themselves
            out.push_str(&content[backslash + 1..backslash + 1 + digits]);
            backslash + 1 + digits
        } else if let Some(c) = content[backslash + 1..].chars().next() {
            out.push(c);
            backslash + 1 + c.len_utf8()
        } else {
            // incomplete escape at the very end
            len
        };
        run = i;
    }

    out.push_str(&content[run..]);
    out
}

/// Interpret three ASCII digits as an octal byte, if they form one.
#[inline(always)]
fn octal(digits: &[u8]) -> Option<u8> {
    digits
        .iter()
        .try_fold(0u16, |acc, &d| matches!(d, b'0'..=b'7').then(|| acc * 8 + u16::from(d - b'0')))
        .and_then(|v| u8::try_from(v).ok())
}

/// Encode a cookie value for the wire.
///
/// Values made only of legal name characters pass through untouched. Anything else is
/// wrapped in double quotes, with control characters, Latin-1 code points, `"`, `\`, `,`
/// and `;` written as three-digit octal escapes.
///
/// # Examples
///
/// ```
/// use ri_http_cookies::codec::{quote, unquote};
///
/// assert_eq!(quote("token"), "token");
/// assert_eq!(quote("some,funky;stuff"), r#""some\054funky\073stuff""#);
/// assert_eq!(unquote(&quote("a \"b\"")), "a \"b\"");
/// ```
pub fn quote(value: &str) -> Cow<'_, str> {
    if is_legal_key(value) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if needs_escape(c) {
            push_octal(&mut out, c as u32);
        } else {
            out.push(c);
        }
    }
    out.push('"');
    Cow::Owned(out)
}

/// Append `\ooo` for a code point in `0..=255`.
fn push_octal(out: &mut String, code: u32) {
    out.push('\\');
    for shift in [6, 3, 0] {
        out.extend(char::from_digit((code >> shift) & 7, 8));
    }
}

/// Encode an attribute value such as `Path` or `Domain`.
///
/// Unlike [`quote`], ordinary separators like `/` are left alone; the value is only
/// quoted when it holds something that would break the header line.
pub fn quote_attribute(value: &str) -> Cow<'_, str> {
    let breaks_header =
        value.chars().any(|c| !c.is_ascii() || c.is_ascii_control() || matches!(c, ';' | ',' | '"' | '\\'));
    if breaks_header { quote(value) } else { Cow::Borrowed(value) }
}
