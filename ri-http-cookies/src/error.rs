use std::fmt;

use thiserror::Error;

/// Errors raised while loading headers into a cookie collection or mutating a [`Morsel`].
///
/// Malformed-but-harmless input (an illegal name, a stray attribute, unparseable residue)
/// is *not* reported through this type: such a `load` call is discarded as a whole and
/// returns `Ok(())`. Only the cases below reach the caller.
///
/// [`Morsel`]: crate::Morsel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("illegal character {ch:?} at byte {position} outside a quoted value")]
    IllegalCharacter { ch: char, position: usize },

    #[error("cookie header size too large, current: {len} exceed the limit {max}")]
    InputTooLarge { len: usize, max: usize },

    #[error("invalid attribute {key:?}")]
    InvalidAttribute { key: String },

    #[error("attempt to set a reserved key {key:?}")]
    ReservedKey { key: String },

    #[error("illegal key {key:?}")]
    IllegalKey { key: String },
}

impl CookieError {
    pub fn illegal_character(ch: char, position: usize) -> Self {
        Self::IllegalCharacter { ch, position }
    }

    pub fn input_too_large(len: usize, max: usize) -> Self {
        Self::InputTooLarge { len, max }
    }

    pub fn invalid_attribute<S: ToString>(key: S) -> Self {
        Self::InvalidAttribute { key: key.to_string() }
    }

    pub fn reserved_key<S: ToString>(key: S) -> Self {
        Self::ReservedKey { key: key.to_string() }
    }

    pub fn illegal_key<S: ToString>(key: S) -> Self {
        Self::IllegalKey { key: key.to_string() }
    }

    /// Whether this error came out of the header grammar rather than a morsel mutation.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::IllegalCharacter { .. } | Self::InputTooLarge { .. })
    }
}

/// Why a `load` call was discarded without raising an error.
///
/// These are reported through `tracing` only; the collection is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftReason {
    /// A key contains a character outside printable ASCII, or a quote.
    MalformedKey,
    /// A bare value contains a character outside the legal value class.
    MalformedValue,
    /// A quoted value never finds its closing quote.
    UnterminatedQuote,
    /// A would-be cookie name contains a character outside the name class.
    IllegalName,
    /// A reserved attribute appears before any cookie.
    OrphanAttribute,
    /// A key without a value that is neither a flag attribute nor part of a cookie.
    BareToken,
    /// A `$`-prefixed attribute that is not a reserved key.
    UnknownAttribute,
}

impl fmt::Display for SoftReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SoftReason::MalformedKey => "malformed key",
            SoftReason::MalformedValue => "malformed value",
            SoftReason::UnterminatedQuote => "unterminated quoted value",
            SoftReason::IllegalName => "illegal cookie name",
            SoftReason::OrphanAttribute => "attribute without a preceding cookie",
            SoftReason::BareToken => "key without a value",
            SoftReason::UnknownAttribute => "unknown attribute",
        };
        f.write_str(reason)
    }
}
