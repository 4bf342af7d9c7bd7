//! Name patterns: templates that map key parameters to flat strings and back.
//!
//! A template such as `"{Culture.}{Type.}[Key]"` compiles into a
//! [`CompiledPattern`]. Braces mark optional parts and square brackets
//! required ones. Text between the opener and the identifier is the prefix
//! separator, text after it the postfix separator, and `<...>` overrides the
//! regex constraining the part's value. `Section_1` pins a part to the second
//! `section` parameter of a key; a bare `Section` binds the last one.
//!
//! ```
//! use keyform::{CompiledPattern, KeyChain};
//!
//! let pattern = CompiledPattern::new("{Culture.}{Type.}[Key]").expect("valid pattern");
//! let key = KeyChain::root().culture("en").type_name("Login").key("Title");
//! assert_eq!(pattern.build_chain(&key).as_deref(), Some("en.Login.Title"));
//!
//! let parsed = pattern.match_str("fi.Login.Title");
//! assert!(parsed.success());
//! assert_eq!(parsed.get("Culture"), Some("fi"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use uncased::{Uncased, UncasedStr};

use crate::error::{KeyformError, KeyformResult};
use crate::parameter::ParameterInfos;

mod builder;
mod matcher;
mod parser;
mod regex_synth;

pub use matcher::MatchResult;
pub use regex_synth::RegexOptions;

use parser::{RawKind, RawPart};

/// Values supplied by identifier, used to pre-fill matches and to build
/// names without a key.
pub type ParameterMap = BTreeMap<String, String>;

/// Regex used for parts with neither an inline nor a registry constraint.
const MATCH_ANYTHING: &str = ".*?";

/// Which occurrence of a repeated parameter a part binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrence {
    /// The n-th occurrence counted from the root, from an `_n` suffix.
    Index(usize),
    /// The occurrence nearest the tail; used for bare identifiers.
    Last,
}

/// One literal run or capture unit of a compiled pattern.
#[derive(Debug, Clone)]
pub struct PatternPart {
    identifier: String,
    parameter_name: String,
    text: Option<String>,
    prefix_separator: String,
    postfix_separator: String,
    required: bool,
    occurrence: Occurrence,
    index: usize,
    capture_index: Option<usize>,
    regex_source: String,
    part_regex: Option<Regex>,
    source: String,
}

impl PatternPart {
    /// Identifier as written, e.g. `Section_1`. Empty for literals.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Parameter bound by the part: the identifier without any `_n` suffix.
    #[must_use]
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// Literal text; `Some` only for literal parts.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the part is a literal run.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.text.is_some()
    }

    /// Separator emitted before the value.
    #[must_use]
    pub fn prefix_separator(&self) -> &str {
        &self.prefix_separator
    }

    /// Separator emitted after the value.
    #[must_use]
    pub fn postfix_separator(&self) -> &str {
        &self.postfix_separator
    }

    /// Whether a match requires a value for this part.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Occurrence binding of the part.
    #[must_use]
    pub const fn occurrence(&self) -> Occurrence {
        self.occurrence
    }

    /// Position in [`CompiledPattern::all_parts`].
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Position among capture parts; `None` for literals.
    #[must_use]
    pub const fn capture_index(&self) -> Option<usize> {
        self.capture_index
    }

    /// Value constraint with anchors stripped, as embedded in the combined
    /// regex.
    #[must_use]
    pub fn regex_source(&self) -> &str {
        &self.regex_source
    }

    /// Whether `value` satisfies the part's constraint. Literals accept
    /// nothing.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        self.part_regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(value))
    }

    /// Template text this part was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A compiled name pattern.
///
/// Compiled patterns are immutable and `Send + Sync`; share one behind an
/// [`Arc`] and match from as many threads as needed.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    all_parts: Vec<PatternPart>,
    capture_parts: Vec<usize>,
    part_map: HashMap<Uncased<'static>, usize>,
    parameter_map: HashMap<Uncased<'static>, Vec<usize>>,
    infos: Arc<ParameterInfos>,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles `pattern` against the default parameter registry.
    ///
    /// # Errors
    ///
    /// Returns [`KeyformError::PatternSyntax`] for malformed templates,
    /// [`KeyformError::PartRegex`] when a part constraint is not a valid
    /// regex, and [`KeyformError::PatternRegex`] if the combined regex cannot
    /// be built.
    pub fn new(pattern: &str) -> KeyformResult<Self> {
        Self::with_infos(pattern, Arc::new(ParameterInfos::default()))
    }

    /// Compiles `pattern` against `infos`, which supplies default part
    /// constraints and the members of `anysection`.
    ///
    /// # Errors
    ///
    /// See [`CompiledPattern::new`].
    pub fn with_infos(pattern: &str, infos: Arc<ParameterInfos>) -> KeyformResult<Self> {
        let raw_parts = parser::scan(pattern)?;
        let mut all_parts = Vec::with_capacity(raw_parts.len());
        let mut capture_parts = Vec::new();
        let mut part_map = HashMap::new();
        let mut parameter_map: HashMap<Uncased<'static>, Vec<usize>> = HashMap::new();

        for raw in raw_parts {
            let index = all_parts.len();
            let position = raw.position;
            let part = assemble(pattern, &infos, raw, index, capture_parts.len())?;
            if part.capture_index.is_some() {
                if part_map
                    .insert(Uncased::from(part.identifier.clone()), index)
                    .is_some()
                {
                    return Err(KeyformError::PatternSyntax {
                        pattern: pattern.to_owned(),
                        position,
                        fragment: part.source.clone(),
                        message: format!("duplicate identifier '{}'", part.identifier),
                    });
                }
                parameter_map
                    .entry(Uncased::from(part.parameter_name.clone()))
                    .or_default()
                    .push(index);
                capture_parts.push(index);
            }
            all_parts.push(part);
        }

        let no_values = vec![None; capture_parts.len()];
        let source = regex_synth::synthesize(&all_parts, &no_values, RegexOptions::default());
        let regex = Regex::new(&source).map_err(|err| KeyformError::PatternRegex {
            pattern: pattern.to_owned(),
            source: err,
        })?;

        tracing::debug!(
            pattern,
            parts = all_parts.len(),
            captures = capture_parts.len(),
            "compiled name pattern"
        );

        Ok(Self {
            pattern: pattern.to_owned(),
            all_parts,
            capture_parts,
            part_map,
            parameter_map,
            infos,
            regex,
        })
    }

    /// The template text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Every part in template order, literals included.
    #[must_use]
    pub fn all_parts(&self) -> &[PatternPart] {
        &self.all_parts
    }

    /// Capture parts in capture-index order.
    pub fn capture_parts(&self) -> impl Iterator<Item = &PatternPart> {
        self.capture_parts
            .iter()
            .filter_map(|&index| self.all_parts.get(index))
    }

    /// Number of capture parts.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.capture_parts.len()
    }

    /// Capture part at `capture_index`.
    #[must_use]
    pub fn capture_part(&self, capture_index: usize) -> Option<&PatternPart> {
        self.capture_parts
            .get(capture_index)
            .and_then(|&index| self.all_parts.get(index))
    }

    /// Capture part by identifier, compared case-insensitively.
    #[must_use]
    pub fn part(&self, identifier: &str) -> Option<&PatternPart> {
        self.part_map
            .get(UncasedStr::new(identifier))
            .and_then(|&index| self.all_parts.get(index))
    }

    /// Capture parts binding `parameter_name`, in template order.
    pub fn parameter_parts(&self, parameter_name: &str) -> impl Iterator<Item = &PatternPart> {
        self.parameter_map
            .get(UncasedStr::new(parameter_name))
            .into_iter()
            .flatten()
            .filter_map(|&index| self.all_parts.get(index))
    }

    /// Distinct parameter names used by the pattern, as written.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameter_map.keys().map(|name| name.as_str())
    }

    /// Registry the pattern was compiled against.
    #[must_use]
    pub fn infos(&self) -> &ParameterInfos {
        &self.infos
    }

    /// Maps `map` entries onto capture indices.
    ///
    /// Returns the values and the keys that name no capture part. Empty values
    /// count as absent.
    fn values_from_map<'a>(&self, map: &'a ParameterMap) -> (Vec<Option<&'a str>>, Vec<&'a str>) {
        let mut values = vec![None; self.capture_parts.len()];
        let mut unknown = Vec::new();
        for (identifier, value) in map {
            let slot = self
                .part(identifier)
                .and_then(PatternPart::capture_index)
                .and_then(|capture_index| values.get_mut(capture_index));
            match slot {
                Some(target) if !value.is_empty() => *target = Some(value.as_str()),
                Some(_) => {}
                None => unknown.push(identifier.as_str()),
            }
        }
        (values, unknown)
    }

    /// Pre-filled values by capture index, warning about unknown identifiers.
    fn prefill<'a>(&self, prefilled: Option<&'a ParameterMap>) -> Vec<Option<&'a str>> {
        let Some(map) = prefilled else {
            return vec![None; self.capture_parts.len()];
        };
        let (values, unknown) = self.values_from_map(map);
        for identifier in unknown {
            tracing::warn!(
                pattern = %self.pattern,
                identifier,
                "ignoring pre-filled value for unknown pattern part"
            );
        }
        values
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for CompiledPattern {
    type Err = KeyformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for CompiledPattern {
    type Error = KeyformError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Splits `Name_3` into (`Name`, `Index(3)`); anything else binds the last
/// occurrence.
fn split_occurrence(identifier: &str) -> (&str, Occurrence) {
    identifier
        .rsplit_once('_')
        .filter(|(name, digits)| {
            !name.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        })
        .and_then(|(name, digits)| {
            digits
                .parse()
                .ok()
                .map(|index| (name, Occurrence::Index(index)))
        })
        .unwrap_or((identifier, Occurrence::Last))
}

/// Strips a leading `^` and a trailing `$` that is an anchor, i.e. preceded
/// by an even number of backslashes.
fn strip_anchors(source: &str) -> &str {
    let body = source.strip_prefix('^').unwrap_or(source);
    match body.strip_suffix('$') {
        Some(inner)
            if inner
                .chars()
                .rev()
                .take_while(|&ch| ch == '\\')
                .count()
                .is_multiple_of(2) =>
        {
            inner
        }
        _ => body,
    }
}

fn assemble(
    pattern: &str,
    infos: &ParameterInfos,
    raw: RawPart,
    index: usize,
    next_capture: usize,
) -> KeyformResult<PatternPart> {
    match raw.kind {
        RawKind::Literal(text) => Ok(PatternPart {
            identifier: String::new(),
            parameter_name: String::new(),
            text: Some(text),
            prefix_separator: String::new(),
            postfix_separator: String::new(),
            required: false,
            occurrence: Occurrence::Last,
            index,
            capture_index: None,
            regex_source: String::new(),
            part_regex: None,
            source: raw.source,
        }),
        RawKind::Capture {
            required,
            prefix,
            identifier,
            regex,
            postfix,
        } => {
            let (name, occurrence) = split_occurrence(&identifier);
            let parameter_name = name.to_owned();
            let constraint = regex
                .as_deref()
                .or_else(|| infos.default_pattern(&parameter_name))
                .unwrap_or(MATCH_ANYTHING);
            let regex_source = strip_anchors(constraint).to_owned();
            let part_regex = Regex::new(&format!("^(?:{regex_source})$")).map_err(|source| {
                KeyformError::PartRegex {
                    pattern: pattern.to_owned(),
                    identifier: identifier.clone(),
                    source,
                }
            })?;
            Ok(PatternPart {
                parameter_name,
                identifier,
                text: None,
                prefix_separator: prefix,
                postfix_separator: postfix,
                required,
                occurrence,
                index,
                capture_index: Some(next_capture),
                regex_source,
                part_regex: Some(part_regex),
                source: raw.source,
            })
        }
    }
}
