//! Synthesis of a single regular expression equivalent to a whole pattern.

use std::borrow::Cow;

use regex::Regex;

use super::{CompiledPattern, ParameterMap, PatternPart};
use crate::error::{KeyformError, KeyformResult};

/// Controls which texts are regex-escaped when a pattern is synthesised.
///
/// The default escapes everything and yields an executable regex. Turning
/// escaping off produces a template meant for further textual substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag toggles one independent escaping decision"
)]
pub struct RegexOptions {
    /// Escape literal runs.
    pub escape_literals: bool,
    /// Escape prefix separators.
    pub escape_prefix: bool,
    /// Escape postfix separators.
    pub escape_postfix: bool,
    /// Escape pre-filled values.
    pub escape_values: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            escape_literals: true,
            escape_prefix: true,
            escape_postfix: true,
            escape_values: true,
        }
    }
}

impl RegexOptions {
    /// Options with every escape disabled.
    #[must_use]
    pub const fn template() -> Self {
        Self {
            escape_literals: false,
            escape_prefix: false,
            escape_postfix: false,
            escape_values: false,
        }
    }
}

impl CompiledPattern {
    /// Source of the combined regex, with `prefilled` values (by identifier)
    /// inlined as literals.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyform::{CompiledPattern, ParameterMap, RegexOptions};
    ///
    /// let pattern = CompiledPattern::new("[Type.]{Key}").expect("valid pattern");
    /// let prefilled = ParameterMap::from([("Type".to_owned(), "a.b".to_owned())]);
    /// assert_eq!(
    ///     pattern.regex_source(Some(&prefilled), RegexOptions::default()),
    ///     r"^(?:a\.b\.)(?:(?P<Key>.*?))?$"
    /// );
    /// ```
    #[must_use]
    pub fn regex_source(&self, prefilled: Option<&ParameterMap>, options: RegexOptions) -> String {
        synthesize(&self.all_parts, &self.prefill(prefilled), options)
    }

    /// Combined regex with nothing pre-filled, built once at compile time.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Combined regex with `prefilled` values inlined.
    ///
    /// Falls back to the shared regex when no entry of `prefilled` names a
    /// capture part.
    ///
    /// # Errors
    ///
    /// Returns [`KeyformError::PatternRegex`] if the synthesised regex fails to
    /// compile.
    pub fn regex_with(&self, prefilled: &ParameterMap) -> KeyformResult<Cow<'_, Regex>> {
        let values = self.prefill(Some(prefilled));
        if values.iter().all(Option::is_none) {
            return Ok(Cow::Borrowed(&self.regex));
        }
        let source = synthesize(&self.all_parts, &values, RegexOptions::default());
        tracing::trace!(pattern = %self.pattern, regex = %source, "built pre-filled matcher");
        Regex::new(&source)
            .map(Cow::Owned)
            .map_err(|err| KeyformError::PatternRegex {
                pattern: self.pattern.clone(),
                source: err,
            })
    }
}

pub(super) fn synthesize(
    parts: &[PatternPart],
    values: &[Option<&str>],
    options: RegexOptions,
) -> String {
    let mut out = String::from("^");
    for part in parts {
        if let Some(text) = part.text() {
            push_text(&mut out, text, options.escape_literals);
            continue;
        }
        let value = part
            .capture_index()
            .and_then(|capture_index| values.get(capture_index).copied().flatten());
        out.push_str("(?:");
        push_text(&mut out, part.prefix_separator(), options.escape_prefix);
        if let Some(literal) = value {
            push_text(&mut out, literal, options.escape_values);
        } else {
            out.push_str("(?P<");
            out.push_str(part.identifier());
            out.push('>');
            out.push_str(part.regex_source());
            out.push(')');
        }
        push_text(&mut out, part.postfix_separator(), options.escape_postfix);
        out.push(')');
        if value.is_none() && !part.required() {
            out.push('?');
        }
    }
    out.push('$');
    out
}

fn push_text(out: &mut String, text: &str, escape: bool) {
    if escape {
        out.push_str(&regex::escape(text));
    } else {
        out.push_str(text);
    }
}
