/// Parser settings for a cookie collection.
///
/// Decoding is linear in the header length whether or not a cap is set.
///
/// # Examples
///
/// ```
/// use ri_http_cookies::{Config, SimpleCookie};
///
/// let mut cookies = SimpleCookie::with_config(Config::new().with_max_input_len(16));
/// assert!(cookies.load("a=b").is_ok());
/// assert!(cookies.load("a=bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    max_input_len: Option<usize>,
}

impl Config {
    /// No limits.
    pub const fn new() -> Self {
        Self { max_input_len: None }
    }

    /// Refuse headers longer than `max` bytes with [`CookieError::InputTooLarge`].
    ///
    /// [`CookieError::InputTooLarge`]: crate::CookieError::InputTooLarge
    pub const fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub const fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }
}
