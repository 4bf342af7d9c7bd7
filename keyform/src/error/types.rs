//! Primary error enum for pattern compilation and key parsing.

use figment::Error as FigmentError;
use thiserror::Error;

/// Result alias used across the public API.
pub type KeyformResult<T> = Result<T, KeyformError>;

/// Errors raised while compiling name patterns, parsing key text, or loading
/// parameter metadata.
///
/// Matching and building never produce errors: an unsuccessful match is a
/// `MatchResult` whose `success()` is `false`, and a failed build is `None`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyformError {
    /// The pattern template is malformed.
    #[error("invalid name pattern '{pattern}' at position {position} ('{fragment}'): {message}")]
    PatternSyntax {
        /// Template being compiled.
        pattern: String,
        /// Character offset of the offending fragment.
        position: usize,
        /// Offending substring.
        fragment: String,
        /// Human-readable explanation.
        message: String,
    },

    /// A part constraint is not a valid regular expression.
    #[error("invalid regex for part '{identifier}' in pattern '{pattern}': {source}")]
    PartRegex {
        /// Template (or configuration entry) that carried the regex.
        pattern: String,
        /// Identifier of the part.
        identifier: String,
        /// Error reported by the regex engine.
        #[source]
        source: regex::Error,
    },

    /// The regex synthesised for a whole pattern failed to compile.
    #[error("failed to build matcher for pattern '{pattern}': {source}")]
    PatternRegex {
        /// Template the regex was synthesised from.
        pattern: String,
        /// Error reported by the regex engine.
        #[source]
        source: regex::Error,
    },

    /// Key text could not be parsed into a chain.
    #[error("invalid key '{input}': {message}")]
    KeySyntax {
        /// Text that failed to parse.
        input: String,
        /// Human-readable explanation.
        message: String,
    },

    /// Parameter metadata could not be extracted from configuration.
    #[error("failed to load parameter configuration: {0}")]
    Configuration(#[from] Box<FigmentError>),
}

impl From<FigmentError> for KeyformError {
    fn from(e: FigmentError) -> Self {
        Self::Configuration(Box::new(e))
    }
}
