//! Parameter metadata shared by the pattern compiler, the matcher, and key
//! construction.
//!
//! A [`ParameterInfos`] registry answers three questions about a parameter
//! name: how it is classified for key equivalence, which regex constrains its
//! values by default, and whether it is section-like (and therefore matched by
//! the virtual `anysection` parameter).

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uncased::{Uncased, UncasedStr};

use crate::error::{KeyformError, KeyformResult};
use crate::key::Classification;

mod config;

/// Virtual parameter name matching any section-like parameter.
pub const ANY_SECTION: &str = "anysection";

/// Default constraint for `culture` values.
pub const CULTURE_PATTERN: &str = r"^[a-z]{2,5}(-[A-Za-z]{2,7})?$";

const fn default_classification() -> Classification {
    Classification::Canonical
}

/// Metadata describing one parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParameterInfo {
    /// Parameter name; looked up case-insensitively.
    pub name: String,
    /// Classification used when keys are built through the registry.
    #[serde(default = "default_classification")]
    pub classification: Classification,
    /// Default value constraint used by patterns that give no inline regex.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Whether `anysection` matches this parameter.
    #[serde(default)]
    pub section: bool,
}

impl ParameterInfo {
    /// Creates metadata with no default pattern that is not section-like.
    #[must_use]
    pub fn new(name: impl Into<String>, classification: Classification) -> Self {
        Self {
            name: name.into(),
            classification,
            pattern: None,
            section: false,
        }
    }

    /// Sets the default value constraint.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Marks the parameter as section-like.
    #[must_use]
    pub const fn as_section(mut self) -> Self {
        self.section = true;
        self
    }
}

/// Registry of [`ParameterInfo`] keyed by case-insensitive name.
///
/// [`ParameterInfos::default`] holds the conventional localisation
/// parameters: `culture` and `assembly` are non-canonical, `resource`,
/// `location`, `type`, `section` and `key` are canonical, and everything but
/// `culture` and `key` is section-like. Unknown names classify as canonical.
///
/// # Examples
///
/// ```
/// use keyform::{Classification, ParameterInfos};
///
/// let infos = ParameterInfos::default();
/// assert_eq!(infos.classify("Culture"), Classification::NonCanonical);
/// assert_eq!(infos.classify("whatever"), Classification::Canonical);
/// assert!(infos.matches("anysection", "type"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfos {
    entries: HashMap<Uncased<'static>, ParameterInfo>,
}

impl Default for ParameterInfos {
    fn default() -> Self {
        Self::empty()
            .with(
                ParameterInfo::new("culture", Classification::NonCanonical)
                    .with_pattern(CULTURE_PATTERN),
            )
            .with(ParameterInfo::new("assembly", Classification::NonCanonical).as_section())
            .with(ParameterInfo::new("resource", Classification::Canonical).as_section())
            .with(ParameterInfo::new("location", Classification::Canonical).as_section())
            .with(ParameterInfo::new("type", Classification::Canonical).as_section())
            .with(ParameterInfo::new("section", Classification::Canonical).as_section())
            .with(ParameterInfo::new("key", Classification::Canonical))
    }
}

impl ParameterInfos {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces an entry, returning the replaced one.
    pub fn insert(&mut self, info: ParameterInfo) -> Option<ParameterInfo> {
        self.entries.insert(Uncased::from(info.name.clone()), info)
    }

    /// Builder-style [`ParameterInfos::insert`].
    #[must_use]
    pub fn with(mut self, info: ParameterInfo) -> Self {
        self.insert(info);
        self
    }

    /// Looks up metadata for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterInfo> {
        self.entries.get(UncasedStr::new(name))
    }

    /// Classification for `name`; unknown names are canonical.
    #[must_use]
    pub fn classify(&self, name: &str) -> Classification {
        self.get(name)
            .map_or(Classification::Canonical, |info| info.classification)
    }

    /// Default value constraint for `name`.
    #[must_use]
    pub fn default_pattern(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|info| info.pattern.as_deref())
    }

    /// Whether `name` is section-like.
    #[must_use]
    pub fn is_section(&self, name: &str) -> bool {
        self.get(name).is_some_and(|info| info.section)
    }

    /// Whether a pattern parameter binds key parameters named `key_parameter`.
    ///
    /// Names compare case-insensitively; [`ANY_SECTION`] binds every
    /// section-like parameter.
    #[must_use]
    pub fn matches(&self, pattern_parameter: &str, key_parameter: &str) -> bool {
        if pattern_parameter.eq_ignore_ascii_case(ANY_SECTION) {
            self.is_section(key_parameter)
        } else {
            pattern_parameter.eq_ignore_ascii_case(key_parameter)
        }
    }

    /// Iterates the entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterInfo> {
        self.entries.values()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that every default pattern is a valid regex.
    ///
    /// # Errors
    ///
    /// Returns [`KeyformError::PartRegex`] naming the first offending entry.
    pub fn validate(&self) -> KeyformResult<()> {
        for info in self.entries.values() {
            if let Some(pattern) = &info.pattern {
                Regex::new(pattern).map_err(|source| KeyformError::PartRegex {
                    pattern: pattern.clone(),
                    identifier: info.name.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}
