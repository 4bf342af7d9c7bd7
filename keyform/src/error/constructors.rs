//! Constructors for `KeyformError` variants that carry positional context.

use super::KeyformError;

impl KeyformError {
    /// Construct a [`KeyformError::PatternSyntax`] for the fragment starting
    /// at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyform::KeyformError;
    /// let e = KeyformError::pattern_syntax("{Key", 0, "{Key", "unterminated part");
    /// assert!(e.to_string().contains("'{Key'"));
    /// ```
    #[must_use]
    pub fn pattern_syntax(
        pattern: &str,
        position: usize,
        fragment: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::PatternSyntax {
            pattern: pattern.to_owned(),
            position,
            fragment: fragment.into(),
            message: message.into(),
        }
    }

    /// Construct a [`KeyformError::KeySyntax`] for `input`.
    #[must_use]
    pub fn key_syntax(input: &str, message: impl Into<String>) -> Self {
        Self::KeySyntax {
            input: input.to_owned(),
            message: message.into(),
        }
    }

    /// Character offset reported by a syntax error, if any.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::PatternSyntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}
