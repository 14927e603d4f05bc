//! Tokenizer for raw `Cookie` / `Set-Cookie` header strings.
//!
//! The [`Scanner`] walks the header once, left to right, and yields one [`Token`] per
//! `key=value` pair or bare `key`. It does not decide what a token *means* (cookie or
//! attribute); that is the job of the load state machine in [`crate::jar`].
//!
//! Whitespace and `;` both terminate a token. A value is one of
//!
//! 1. a double-quoted string, closed by the first unescaped `"` that is followed by
//!    whitespace, `;` or the end of input; failing that, a `\"` that ends the input closes it
//! 2. an `expires`-style date such as `Wed, 01 Jan 2010 00:00:00 GMT`, which is the only
//!    place an unquoted comma is tolerated
//! 3. a run of legal value characters
//!
//! Every decision looks at a bounded number of bytes past the cursor, so scanning is
//! linear in the header length.

use crate::codec::is_legal_value_char;
use crate::error::{CookieError, SoftReason};

/// One lexical unit of a cookie header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `key=value`, with the value still in wire form (quotes and escapes intact).
    Pair(&'a str, &'a str),
    /// A key with no value, such as `Secure`.
    Bare(&'a str),
}

impl<'a> Token<'a> {
    pub fn key(&self) -> &'a str {
        match self {
            Token::Pair(key, _) | Token::Bare(key) => key,
        }
    }
}

/// Why the scanner stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Input that must be reported to the caller (an unquoted comma).
    Hard(CookieError),
    /// Input that cannot be tokenized; the whole header is silently discarded.
    Soft { reason: SoftReason, position: usize },
}

/// Iterator over the tokens of a header string.
///
/// The iterator is fused on error: after yielding an `Err` it yields `None`.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0, failed: false }
    }

    /// Byte offset of the cursor within the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips whitespace and stray `;` separators between tokens.
    fn skip_separators(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace() || b == b';') {
            self.pos += 1;
        }
    }

    fn soft(&mut self, reason: SoftReason, position: usize) -> ScanError {
        self.failed = true;
        ScanError::Soft { reason, position }
    }

    fn hard(&mut self, ch: char, position: usize) -> ScanError {
        self.failed = true;
        ScanError::Hard(CookieError::illegal_character(ch, position))
    }

    /// Byte offset of the first byte at or after `start` matching `stop`, or the end of input.
    fn find_end(&self, start: usize, stop: impl Fn(u8) -> bool) -> usize {
        let bytes = self.bytes();
        bytes[start..].iter().position(|&b| stop(b)).map_or(bytes.len(), |k| start + k)
    }

    /// Reads a key: everything up to whitespace, `;` or `=`.
    fn scan_key(&mut self) -> Result<&'a str, ScanError> {
        let start = self.pos;
        let end = self.find_end(start, |b| b.is_ascii_whitespace() || b == b';' || b == b'=');
        self.pos = end;

        let key = &self.input[start..end];
        if let Some(comma) = key.find(',') {
            return Err(self.hard(',', start + comma));
        }
        // the name class is checked by the state machine, which knows whether the key
        // names a cookie or an attribute; here we only refuse what no token can hold
        if key.bytes().any(|b| !b.is_ascii_graphic() || b == b'"') {
            return Err(self.soft(SoftReason::MalformedKey, start));
        }
        Ok(key)
    }

    /// Reads a value starting at the cursor, which sits just past `=` and any whitespace.
    fn scan_value(&mut self) -> Result<&'a str, ScanError> {
        let start = self.pos;
        if self.peek() == Some(b'"') {
            return self.scan_quoted(start);
        }
        if let Some(len) = date_len(&self.bytes()[start..]) {
            self.pos = start + len;
            return Ok(&self.input[start..self.pos]);
        }

        let end = self.find_end(start, |b| b.is_ascii_whitespace() || b == b';');
        self.pos = end;

        let value = &self.input[start..end];
        if let Some(comma) = value.find(',') {
            return Err(self.hard(',', start + comma));
        }
        if !value.chars().all(is_legal_value_char) {
            return Err(self.soft(SoftReason::MalformedValue, start));
        }
        Ok(value)
    }

    /// Reads a double-quoted value, returning it with its quotes.
    fn scan_quoted(&mut self, start: usize) -> Result<&'a str, ScanError> {
        match closing_quote(self.bytes(), start) {
            Some(end) => {
                self.pos = end;
                Ok(&self.input[start..end])
            }
            None => {
                // the open quote swallows the rest of the input
                self.pos = self.input.len();
                Err(self.soft(SoftReason::UnterminatedQuote, start))
            }
        }
    }

    /// Looks through the input after the cursor for an unquoted comma.
    ///
    /// Meant for a header that has already been rejected: whatever else is wrong with the
    /// rest of it, a comma outside a quoted value or a date must still be reported.
    /// Values are recognized after each `=` the same way the scanner reads them, and an
    /// unterminated quote runs to the end of input.
    pub fn stray_comma(&self) -> Option<CookieError> {
        let bytes = self.bytes();
        let mut i = self.pos;

        while i < bytes.len() {
            match bytes[i] {
                b',' => return Some(CookieError::illegal_character(',', i)),
                b'=' => {
                    i += 1;
                    i += bytes[i..].iter().take_while(|b| b.is_ascii_whitespace()).count();
                    if bytes.get(i) == Some(&b'"') {
                        i = closing_quote(bytes, i)?;
                    } else if let Some(len) = date_len(&bytes[i..]) {
                        i += len;
                    }
                }
                _ => i += 1,
            }
        }

        None
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.skip_separators();
        self.peek()?;

        let key = match self.scan_key() {
            Ok(key) => key,
            Err(e) => return Some(Err(e)),
        };

        // look past whitespace for '='; if there is none the key stands alone
        let after_key = self.pos;
        self.skip_whitespace();
        if self.peek() != Some(b'=') {
            self.pos = after_key;
            return Some(Ok(Token::Bare(key)));
        }

        self.pos += 1;
        self.skip_whitespace();
        Some(self.scan_value().map(|value| Token::Pair(key, value)))
    }
}

/// Finds the end (exclusive) of the quoted value whose opening `"` is at `start`.
///
/// Escaped pairs are skipped, so only a `"` that is not preceded by an escaping backslash
/// can close the value, and only when a terminator follows it. If no such quote exists but
/// the input ends in `\"`, that final quote closes the value and the dangling backslash is
/// left for the decoder to drop.
fn closing_quote(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' if is_terminator(bytes.get(i + 1).copied()) => return Some(i + 1),
            _ => i += 1,
        }
    }

    (bytes.len() >= start + 3 && bytes.ends_with(b"\\\"")).then_some(bytes.len())
}

/// Whether the byte after a value (or `None` at end of input) ends the token.
#[inline(always)]
fn is_terminator(next: Option<u8>) -> bool {
    next.is_none_or(|b| b == b';' || b.is_ascii_whitespace())
}

/// Recognizes an `expires` date at the start of `s` and returns its length.
///
/// Accepted shapes (all GMT or numeric offset):
///
/// - `Wed, 01 Jan 2010 00:00:00 GMT` (RFC 1123)
/// - `Wed, 01 Jan 98 00:00:00 GMT` (two-digit year)
/// - `Saturday, 01-Jan-83 00:00:00 GMT` (RFC 850)
///
/// The date part may be 9 to 11 characters of letters, digits, spaces and dashes,
/// so at most three split points are tried; the lookahead never exceeds 40 bytes.
fn date_len(s: &[u8]) -> Option<usize> {
    let day_len = s.iter().take(10).take_while(|b| b.is_ascii_alphabetic()).count();
    if !(3..=9).contains(&day_len) || s.get(day_len) != Some(&b',') || s.get(day_len + 1) != Some(&b' ') {
        return None;
    }

    let date_start = day_len + 2;
    (9..=11).rev().find_map(|len| {
        let date = s.get(date_start..date_start + len)?;
        if !date.iter().all(|&b| b.is_ascii_alphanumeric() || b == b' ' || b == b'-') {
            return None;
        }

        let mut i = date_start + len;
        expect(s, i, b' ')?;
        i += 1;
        let time = s.get(i..i + 8)?;
        if !time.iter().all(|&b| b.is_ascii_digit() || b == b':') {
            return None;
        }
        i += 8;
        expect(s, i, b' ')?;
        i += 1;

        let zone_len = zone_len(s.get(i..)?)?;
        let end = i + zone_len;
        is_terminator(s.get(end).copied()).then_some(end)
    })
}

#[inline(always)]
fn expect(s: &[u8], i: usize, b: u8) -> Option<()> {
    (s.get(i) == Some(&b)).then_some(())
}

/// Timezone suffix: `+hhmm` / `-hhmm` or a three-letter zone name.
fn zone_len(s: &[u8]) -> Option<usize> {
    match s.first()? {
        b'+' | b'-' => s.get(1..5).filter(|d| d.iter().all(u8::is_ascii_digit)).map(|_| 5),
        _ => s.get(..3).filter(|z| z.iter().all(u8::is_ascii_alphanumeric)).map(|_| 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Result<Vec<Token<'_>>, ScanError> {
        Scanner::new(input).collect()
    }

    #[test]
    fn scan_pairs_and_bare() {
        let cases = [
            ("", vec![]),
            (";;", vec![]),
            ("chips=ahoy; vienna=finger", vec![Token::Pair("chips", "ahoy"), Token::Pair("vienna", "finger")]),
            ("keebler=E=mc2", vec![Token::Pair("keebler", "E=mc2")]),
            ("key:term=value:term", vec![Token::Pair("key:term", "value:term")]),
            ("a=b; c=[; d=r", vec![Token::Pair("a", "b"), Token::Pair("c", "["), Token::Pair("d", "r")]),
            (
                "eggs=scrambled; httponly; secure",
                vec![Token::Pair("eggs", "scrambled"), Token::Bare("httponly"), Token::Bare("secure")],
            ),
            ("name=", vec![Token::Pair("name", "")]),
            ("name=; other=value", vec![Token::Pair("name", ""), Token::Pair("other", "value")]),
        ];

        for (input, expected) in cases {
            assert_eq!(tokens(input).unwrap(), expected, "scanning {input:?}");
        }
    }

    #[test]
    fn scan_extra_spaces() {
        let input = "eggs  =  scrambled  ;  secure  ;  path  =  bar   ; foo=foo   ";
        assert_eq!(
            tokens(input).unwrap(),
            vec![
                Token::Pair("eggs", "scrambled"),
                Token::Bare("secure"),
                Token::Pair("path", "bar"),
                Token::Pair("foo", "foo"),
            ]
        );
    }

    #[test]
    fn scan_quoted_values() {
        let cases = [
            (r#"keebler="E=mc2; L=\"Loves\"; fudge=\012;""#, r#""E=mc2; L=\"Loves\"; fudge=\012;""#),
            (r#"cookie="{"key": "value"}""#, r#""{"key": "value"}""#),
            (r#"key="some value; surrounded by quotes""#, r#""some value; surrounded by quotes""#),
            (r#"a="b=\\""#, r#""b=\\""#),
            (r#"a="b=\\\"""#, r#""b=\\\"""#),
            (r#"a="""#, r#""""#),
            (r#"edge_case="\""#, r#""\""#),
            (r#"a="x; y\""#, r#""x; y\""#),
        ];

        for (input, value) in cases {
            let tokens = tokens(input).unwrap();
            assert_eq!(tokens.len(), 1, "scanning {input:?}");
            assert_eq!(tokens[0], Token::Pair(tokens[0].key(), value));
        }
    }

    #[test]
    fn scan_quoted_followed_by_more() {
        let input = r#"session="user123"; preferences="{"theme": "dark"}""#;
        assert_eq!(
            tokens(input).unwrap(),
            vec![Token::Pair("session", "\"user123\""), Token::Pair("preferences", r#""{"theme": "dark"}""#)]
        );
    }

    #[test]
    fn scan_dates() {
        let cases = [
            "Wed, 01 Jan 2010 00:00:00 GMT",
            "Wed, 01 Jan 98 00:00:00 GMT",
            "Saturday, 01-Jan-83 00:00:00 GMT",
            "Wednesday, 09-Nov-94 08:49:37 GMT",
            "Fri, 19 Nov 1982 16:59:30 +0000",
        ];

        for date in cases {
            let input = format!("key=value; expires={date}; path=/");
            assert_eq!(
                tokens(&input).unwrap(),
                vec![Token::Pair("key", "value"), Token::Pair("expires", date), Token::Pair("path", "/")],
                "scanning {input:?}"
            );
        }
    }

    #[test]
    fn scan_comma_is_hard() {
        let err = tokens("a=b; c,d=e").unwrap_err();
        assert_eq!(err, ScanError::Hard(CookieError::illegal_character(',', 6)));

        let err = tokens("a=b,c").unwrap_err();
        assert_eq!(err, ScanError::Hard(CookieError::illegal_character(',', 3)));

        // not a date: falls back to a bare value and trips on the comma
        assert!(matches!(tokens("expires=Wed, soon"), Err(ScanError::Hard(_))));
    }

    #[test]
    fn scan_soft_failures() {
        let cases = [
            (r#"a="unterminated"#, SoftReason::UnterminatedQuote),
            ("a=\"trailing\\", SoftReason::UnterminatedQuote),
            ("a=b\"c", SoftReason::MalformedValue),
            ("a=caf\u{e9}", SoftReason::MalformedValue),
            ("a\"b=c", SoftReason::MalformedKey),
            ("k\u{e9}y=c", SoftReason::MalformedKey),
        ];

        for (input, reason) in cases {
            match tokens(input) {
                Err(ScanError::Soft { reason: actual, .. }) => assert_eq!(actual, reason, "scanning {input:?}"),
                other => panic!("expected soft failure for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn stray_comma_after_rejected_token() {
        let cases = [
            ("foo=bar; baz; c,d=e", 2, Some(15)),
            ("[x=1; a,b=c", 1, Some(7)),
            ("x=1; y=2, z=3", 1, Some(8)),
            ("]x=1; e=Wed, 01 Jan 2010 00:00:00 GMT", 1, None),
            (r#"]x=1; q="a,b""#, 1, None),
            (r#"]x=1; q="a,b"; r=s"#, 1, None),
            ("a=\"open, c,d", 1, None),
        ];

        for (input, taken, comma) in cases {
            let mut scanner = Scanner::new(input);
            scanner.by_ref().take(taken).for_each(drop);
            let expected = comma.map(|at| CookieError::illegal_character(',', at));
            assert_eq!(scanner.stray_comma(), expected, "scanning {input:?}");
        }
    }

    #[test]
    fn scan_stops_after_error() {
        let mut scanner = Scanner::new("a=b; c=\"open; d=e");
        assert_eq!(scanner.next(), Some(Ok(Token::Pair("a", "b"))));
        assert!(matches!(scanner.next(), Some(Err(ScanError::Soft { .. }))));
        assert_eq!(scanner.next(), None);
    }
}
