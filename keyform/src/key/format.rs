//! Text form of key chains: `name:value:name:value`, root first.

use crate::error::{KeyformError, KeyformResult};
use crate::parameter::ParameterInfos;

use super::KeyChain;

/// Renders and parses the colon-separated text form of a key.
///
/// Separator and escape characters inside names or values are prefixed with
/// the escape character.
///
/// # Examples
///
/// ```
/// use keyform::{KeyChain, KeyFormat, ParameterInfos};
///
/// let format = KeyFormat::default();
/// let key = KeyChain::root().culture("en").key("a:b");
/// let text = format.print(&key);
/// assert_eq!(text, r"culture:en:key:a\:b");
///
/// let parsed = format.parse(&text, &ParameterInfos::default()).expect("valid key text");
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyFormat {
    separator: char,
    escape: char,
}

impl Default for KeyFormat {
    fn default() -> Self {
        Self::new(':', '\\')
    }
}

impl KeyFormat {
    /// Creates a format with custom separator and escape characters.
    #[must_use]
    pub const fn new(separator: char, escape: char) -> Self {
        Self { separator, escape }
    }

    /// Renders `key` root first.
    #[must_use]
    pub fn print(&self, key: &KeyChain) -> String {
        let mut params: Vec<_> = key.parameters().collect();
        params.reverse();
        let mut out = String::new();
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push(self.separator);
            }
            self.push_escaped(&mut out, param.name);
            out.push(self.separator);
            self.push_escaped(&mut out, param.value);
        }
        out
    }

    /// Parses key text, classifying each parameter through `infos`.
    ///
    /// Empty input yields the root chain.
    ///
    /// # Errors
    ///
    /// Returns [`KeyformError::KeySyntax`] when the text ends in a dangling
    /// escape, has an odd number of fields, or contains an empty parameter
    /// name.
    pub fn parse(&self, input: &str, infos: &ParameterInfos) -> KeyformResult<KeyChain> {
        if input.is_empty() {
            return Ok(KeyChain::root());
        }
        let fields = self.split_fields(input)?;
        if !fields.len().is_multiple_of(2) {
            return Err(KeyformError::key_syntax(
                input,
                format!("expected name/value pairs, found {} fields", fields.len()),
            ));
        }
        let mut chain = KeyChain::root();
        for pair in fields.chunks_exact(2) {
            let [name, value] = pair else { continue };
            if name.is_empty() {
                return Err(KeyformError::key_syntax(input, "empty parameter name"));
            }
            chain = chain.append_with(infos, name, value.as_str());
        }
        Ok(chain)
    }

    fn push_escaped(&self, out: &mut String, text: &str) {
        for ch in text.chars() {
            if ch == self.separator || ch == self.escape {
                out.push(self.escape);
            }
            out.push(ch);
        }
    }

    fn split_fields(&self, input: &str) -> KeyformResult<Vec<String>> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch == self.escape {
                let Some(escaped) = chars.next() else {
                    return Err(KeyformError::key_syntax(input, "dangling escape character"));
                };
                current.push(escaped);
            } else if ch == self.separator {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
        }
        fields.push(current);
        Ok(fields)
    }
}
