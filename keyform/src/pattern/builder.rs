//! Rendering names from captured or supplied values.

use super::{CompiledPattern, ParameterMap, PatternPart};
use crate::key::{ChainDecomposer, KeyChain, KeyDecomposer};

/// Value for a capture part; empty values count as missing.
fn part_value<'v, S: AsRef<str>>(part: &PatternPart, values: &'v [Option<S>]) -> Option<&'v str> {
    part.capture_index()
        .and_then(|capture_index| values.get(capture_index))
        .and_then(Option::as_ref)
        .map(S::as_ref)
        .filter(|value: &&str| !value.is_empty())
}

impl CompiledPattern {
    /// Renders values indexed by capture index.
    ///
    /// Optional parts without a value are skipped together with their
    /// separators. Returns `None` when a required part has no value.
    #[must_use]
    pub fn build_values<S: AsRef<str>>(&self, values: &[Option<S>]) -> Option<String> {
        let mut len = 0;
        for part in &self.all_parts {
            if let Some(text) = part.text() {
                len += text.len();
                continue;
            }
            match part_value(part, values) {
                Some(value) => {
                    len += part.prefix_separator().len()
                        + value.len()
                        + part.postfix_separator().len();
                }
                None if part.required() => return None,
                None => {}
            }
        }

        let mut out = String::with_capacity(len);
        for part in &self.all_parts {
            if let Some(text) = part.text() {
                out.push_str(text);
            } else if let Some(value) = part_value(part, values) {
                out.push_str(part.prefix_separator());
                out.push_str(value);
                out.push_str(part.postfix_separator());
            }
        }
        Some(out)
    }

    /// Renders values given by identifier. Entries naming no part are
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyform::{CompiledPattern, ParameterMap};
    ///
    /// let pattern = CompiledPattern::new("[Type.]{Culture.}{Key}").expect("valid pattern");
    /// let values = ParameterMap::from([
    ///     ("Type".to_owned(), "T".to_owned()),
    ///     ("Key".to_owned(), "K".to_owned()),
    /// ]);
    /// assert_eq!(pattern.build_map(&values).as_deref(), Some("T.K"));
    /// ```
    #[must_use]
    pub fn build_map(&self, values: &ParameterMap) -> Option<String> {
        let (by_index, _unknown) = self.values_from_map(values);
        self.build_values(&by_index)
    }

    /// Matches `key` through `decomposer` and renders the result.
    #[must_use]
    pub fn build_key<K, D>(&self, key: &K, decomposer: &D) -> Option<String>
    where
        K: ?Sized,
        D: KeyDecomposer<K> + ?Sized,
    {
        self.match_key(key, decomposer).build()
    }

    /// Matches a [`KeyChain`] and renders the result.
    #[must_use]
    pub fn build_chain(&self, key: &KeyChain) -> Option<String> {
        self.build_key(key, &ChainDecomposer)
    }
}
