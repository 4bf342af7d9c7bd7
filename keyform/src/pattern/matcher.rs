//! Matching keys and raw strings against a compiled pattern.

use std::ops::Index;

use regex::Regex;

use super::{CompiledPattern, Occurrence, ParameterMap, PatternPart};
use crate::error::KeyformResult;
use crate::key::{ChainDecomposer, KeyChain, KeyDecomposer};

/// Outcome of matching one key or string against a [`CompiledPattern`].
///
/// Values are indexed by capture index. A result whose [`success`] is
/// `false` is the ordinary "did not fully match" outcome.
///
/// [`success`]: MatchResult::success
#[derive(Debug, Clone)]
pub struct MatchResult<'p> {
    pattern: &'p CompiledPattern,
    part_values: Vec<Option<String>>,
    success: bool,
}

impl<'p> MatchResult<'p> {
    fn new(pattern: &'p CompiledPattern, mut part_values: Vec<Option<String>>) -> Self {
        pattern.fix_occurrences(&mut part_values);
        let success = pattern.capture_parts().all(|part| {
            !part.required()
                || part
                    .capture_index()
                    .and_then(|capture_index| part_values.get(capture_index))
                    .is_some_and(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
        });
        Self {
            pattern,
            part_values,
            success,
        }
    }

    fn unmatched(pattern: &'p CompiledPattern) -> Self {
        Self {
            pattern,
            part_values: vec![None; pattern.capture_count()],
            success: false,
        }
    }

    /// Whether every required part received a value.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Pattern that produced the result.
    #[must_use]
    pub const fn pattern(&self) -> &'p CompiledPattern {
        self.pattern
    }

    /// Values by capture index.
    #[must_use]
    pub fn part_values(&self) -> &[Option<String>] {
        &self.part_values
    }

    /// Value at `capture_index`.
    #[must_use]
    pub fn value(&self, capture_index: usize) -> Option<&str> {
        self.part_values.get(capture_index)?.as_deref()
    }

    /// Value captured for `identifier` (case-insensitive).
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.value(self.pattern.part(identifier)?.capture_index()?)
    }

    /// Captured parts with their values, in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&'p PatternPart, &str)> + '_ {
        self.pattern.capture_parts().filter_map(|part| {
            let value = self.value(part.capture_index()?)?;
            Some((part, value))
        })
    }

    /// Captured values keyed by identifier.
    #[must_use]
    pub fn to_map(&self) -> ParameterMap {
        self.iter()
            .map(|(part, value)| (part.identifier().to_owned(), value.to_owned()))
            .collect()
    }

    /// Renders the captured values back through the pattern.
    #[must_use]
    pub fn build(&self) -> Option<String> {
        self.pattern.build_values(&self.part_values)
    }

    /// Appends the captured parameters to `base` in template order.
    ///
    /// Parameter names take the registry's spelling when known, lower case
    /// otherwise. `anysection` parts are skipped because they name no concrete
    /// parameter, as are bare parts repeating a value already captured by a
    /// numbered part of the same parameter.
    #[must_use]
    pub fn to_key(&self, base: &KeyChain) -> KeyChain {
        let infos = self.pattern.infos();
        let mut chain = base.clone();
        for (part, value) in self.iter() {
            let name = part.parameter_name();
            if name.eq_ignore_ascii_case(crate::parameter::ANY_SECTION) {
                continue;
            }
            if part.occurrence() == Occurrence::Last && self.repeats_numbered(part, value) {
                continue;
            }
            let canonical_name = infos
                .get(name)
                .map_or_else(|| name.to_ascii_lowercase(), |info| info.name.clone());
            chain = chain.append_with(infos, &canonical_name, value);
        }
        chain
    }

    fn repeats_numbered(&self, part: &PatternPart, value: &str) -> bool {
        self.pattern
            .parameter_parts(part.parameter_name())
            .filter(|other| matches!(other.occurrence(), Occurrence::Index(_)))
            .filter_map(|other| self.value(other.capture_index()?))
            .any(|other_value| other_value == value)
    }
}

impl Index<usize> for MatchResult<'_> {
    type Output = Option<String>;

    #[expect(
        clippy::indexing_slicing,
        reason = "indexing past the capture count panics like slice indexing"
    )]
    fn index(&self, capture_index: usize) -> &Self::Output {
        &self.part_values[capture_index]
    }
}

impl CompiledPattern {
    /// Matches a key through `decomposer`.
    #[must_use]
    pub fn match_key<K, D>(&self, key: &K, decomposer: &D) -> MatchResult<'_>
    where
        K: ?Sized,
        D: KeyDecomposer<K> + ?Sized,
    {
        self.match_key_with(key, decomposer, None)
    }

    /// Matches a [`KeyChain`].
    ///
    /// # Examples
    ///
    /// ```
    /// use keyform::{CompiledPattern, KeyChain};
    ///
    /// let pattern = CompiledPattern::new("{Section_0.}{Section_1.}{Section}").expect("valid");
    /// let key = KeyChain::root().section("A").section("B");
    /// let result = pattern.match_chain(&key);
    /// assert_eq!(result.get("Section_0"), Some("A"));
    /// assert_eq!(result.get("Section_1"), Some("B"));
    /// assert_eq!(result.get("Section"), Some("B"));
    /// ```
    #[must_use]
    pub fn match_chain(&self, key: &KeyChain) -> MatchResult<'_> {
        self.match_key(key, &ChainDecomposer)
    }

    /// Matches a key, taking values from `prefilled` (by identifier) where
    /// given.
    ///
    /// Numbered parts take the n-th matching parameter counted from the root;
    /// bare parts take the last. Values rejected by a part's constraint leave
    /// the part unset.
    #[must_use]
    pub fn match_key_with<K, D>(
        &self,
        key: &K,
        decomposer: &D,
        prefilled: Option<&ParameterMap>,
    ) -> MatchResult<'_>
    where
        K: ?Sized,
        D: KeyDecomposer<K> + ?Sized,
    {
        let mut params = decomposer.parameters(key);
        params.reverse();
        let prefilled_values = self.prefill(prefilled);

        let part_values = self
            .capture_parts()
            .zip(prefilled_values)
            .map(|(part, prefilled_value)| {
                if let Some(value) = prefilled_value {
                    return Some(value.to_owned());
                }
                let mut occurrences = params
                    .iter()
                    .filter(|param| self.infos.matches(part.parameter_name(), param.name))
                    .map(|param| param.value);
                let found = match part.occurrence() {
                    Occurrence::Index(n) => occurrences.nth(n),
                    Occurrence::Last => occurrences.last(),
                };
                found.filter(|value| part.accepts(value)).map(str::to_owned)
            })
            .collect();

        tracing::trace!(
            pattern = %self.pattern,
            parameters = params.len(),
            "matching key against pattern"
        );
        MatchResult::new(self, part_values)
    }

    /// Parses `input` with the shared combined regex.
    ///
    /// Parts whose group did not participate, or matched empty text, stay
    /// unset. Input the regex rejects yields an unsuccessful, empty result.
    #[must_use]
    pub fn match_str(&self, input: &str) -> MatchResult<'_> {
        let no_values = vec![None; self.capture_count()];
        self.match_captures(&self.regex, input, &no_values)
    }

    /// Parses `input` with `prefilled` values inlined into the regex.
    ///
    /// # Errors
    ///
    /// Returns [`KeyformError::PatternRegex`](crate::KeyformError::PatternRegex)
    /// if the specialised regex fails to compile.
    pub fn match_str_with(
        &self,
        input: &str,
        prefilled: &ParameterMap,
    ) -> KeyformResult<MatchResult<'_>> {
        let regex = self.regex_with(prefilled)?;
        let prefilled_values = self.prefill(Some(prefilled));
        Ok(self.match_captures(&regex, input, &prefilled_values))
    }

    fn match_captures(
        &self,
        regex: &Regex,
        input: &str,
        prefilled: &[Option<&str>],
    ) -> MatchResult<'_> {
        let Some(captures) = regex.captures(input) else {
            tracing::trace!(pattern = %self.pattern, input, "input rejected by pattern");
            return MatchResult::unmatched(self);
        };
        let part_values = self
            .capture_parts()
            .zip(prefilled.iter().copied())
            .map(|(part, prefilled_value)| {
                prefilled_value.map(str::to_owned).or_else(|| {
                    captures
                        .name(part.identifier())
                        .map(|m| m.as_str())
                        .filter(|value| !value.is_empty())
                        .map(str::to_owned)
                })
            })
            .collect();
        MatchResult::new(self, part_values)
    }

    /// Reconciles numbered parts with bare ones: when a bare part is unset
    /// and exactly one numbered part of the same parameter holds a value, the
    /// bare part receives it.
    fn fix_occurrences(&self, values: &mut [Option<String>]) {
        for indices in self.parameter_map.values() {
            let mut last_parts = Vec::new();
            let mut numbered = Vec::new();
            for part in indices.iter().filter_map(|&index| self.all_parts.get(index)) {
                let Some(capture_index) = part.capture_index() else {
                    continue;
                };
                match part.occurrence() {
                    Occurrence::Last => last_parts.push(capture_index),
                    Occurrence::Index(_) => {
                        if let Some(Some(value)) = values.get(capture_index) {
                            numbered.push(value.clone());
                        }
                    }
                }
            }
            let [only] = numbered.as_slice() else {
                continue;
            };
            for capture_index in last_parts {
                if let Some(slot) = values.get_mut(capture_index)
                    && slot.is_none()
                {
                    *slot = Some(only.clone());
                }
            }
        }
    }
}
