//! Credential handling for the render service token.
//!
//! Wraps `secrecy` so the token is zeroized on drop and can never leak
//! through `Debug` or `Display` formatting.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API token that formats as `[REDACTED]` everywhere.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Wrap a token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// The raw token, for building the outgoing request only.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretString::new("bb_live_key");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(secret.expose(), "bb_live_key");
    }
}
