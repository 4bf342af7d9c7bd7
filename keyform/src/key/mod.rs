//! Key chains: persistent, tail-to-root linked parameter sequences.
//!
//! A [`KeyChain`] identifies one localised string. Each node carries a
//! parameter name, a value, and a [`Classification`] decided when the node is
//! appended. Appending never mutates an existing node, so many chains may
//! share a common tail (`root -> culture=en -> type=Foo` can be extended with
//! both `key=Title` and `key=Body`).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterInfos;

mod decompose;
mod format;

pub use decompose::{ChainDecomposer, KeyDecomposer, Parameter};
pub use format::KeyFormat;

/// How a parameter takes part in key equivalence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Position in the chain is significant (`type`, `section`, `key`).
    Canonical,
    /// Position is irrelevant and duplicates collapse (`culture`, `assembly`).
    NonCanonical,
    /// Ignored by comparison.
    Unclassified,
}

#[derive(Debug)]
struct Node {
    name: Option<String>,
    value: Option<String>,
    classification: Classification,
    previous: Option<KeyChain>,
}

/// Immutable handle to the tail node of a key chain.
///
/// Cloning is cheap: it bumps a reference count. Equality and hashing follow
/// [`KeyComparer`](crate::KeyComparer) semantics rather than structural
/// identity.
///
/// # Examples
///
/// ```
/// use keyform::KeyChain;
///
/// let key = KeyChain::root().culture("en").type_name("MyController").key("Error");
/// assert_eq!(key.to_string(), "culture:en:type:MyController:key:Error");
/// assert_eq!(key.parameter_value(), Some("Error"));
/// ```
#[derive(Clone)]
pub struct KeyChain(Arc<Node>);

impl KeyChain {
    /// Creates an empty chain consisting of the root sentinel.
    #[must_use]
    pub fn root() -> Self {
        Self(Arc::new(Node {
            name: None,
            value: None,
            classification: Classification::Unclassified,
            previous: None,
        }))
    }

    /// Appends a parameter with an explicit classification.
    #[must_use]
    pub fn append(
        &self,
        classification: Classification,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self(Arc::new(Node {
            name: Some(name.into()),
            value: Some(value.into()),
            classification,
            previous: Some(self.clone()),
        }))
    }

    /// Appends a parameter, classifying it through `infos`.
    #[must_use]
    pub fn append_with(&self, infos: &ParameterInfos, name: &str, value: impl Into<String>) -> Self {
        self.append(infos.classify(name), name, value)
    }

    /// Appends a canonical parameter.
    #[must_use]
    pub fn canonical(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(Classification::Canonical, name, value)
    }

    /// Appends a non-canonical parameter.
    #[must_use]
    pub fn non_canonical(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(Classification::NonCanonical, name, value)
    }

    /// Appends `culture=value` (non-canonical).
    #[must_use]
    pub fn culture(&self, value: impl Into<String>) -> Self {
        self.non_canonical("culture", value)
    }

    /// Appends `assembly=value` (non-canonical).
    #[must_use]
    pub fn assembly(&self, value: impl Into<String>) -> Self {
        self.non_canonical("assembly", value)
    }

    /// Appends `resource=value`.
    #[must_use]
    pub fn resource(&self, value: impl Into<String>) -> Self {
        self.canonical("resource", value)
    }

    /// Appends `location=value`.
    #[must_use]
    pub fn location(&self, value: impl Into<String>) -> Self {
        self.canonical("location", value)
    }

    /// Appends `type=value`.
    #[must_use]
    pub fn type_name(&self, value: impl Into<String>) -> Self {
        self.canonical("type", value)
    }

    /// Appends `section=value`.
    #[must_use]
    pub fn section(&self, value: impl Into<String>) -> Self {
        self.canonical("section", value)
    }

    /// Appends `key=value`.
    #[must_use]
    pub fn key(&self, value: impl Into<String>) -> Self {
        self.canonical("key", value)
    }

    /// Parameter name of this node; `None` for the root.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Parameter value of this node; `None` for the root.
    #[must_use]
    pub fn parameter_value(&self) -> Option<&str> {
        self.0.value.as_deref()
    }

    /// Classification fixed when the node was appended.
    #[must_use]
    pub fn classification(&self) -> Classification {
        self.0.classification
    }

    /// The node this one was appended to.
    #[must_use]
    pub fn previous(&self) -> Option<&Self> {
        self.0.previous.as_ref()
    }

    /// Whether this node is a root sentinel.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.previous.is_none()
    }

    /// Iterates nodes from this one towards the root, root included.
    #[must_use = "iterators are lazy"]
    pub const fn nodes(&self) -> Nodes<'_> {
        Nodes { next: Some(self) }
    }

    /// Iterates named parameters from the tail towards the root.
    pub fn parameters(&self) -> impl Iterator<Item = Parameter<'_>> {
        self.nodes().filter_map(|node| {
            Some(Parameter {
                name: node.0.name.as_deref()?,
                value: node.0.value.as_deref().unwrap_or_default(),
                classification: node.0.classification,
            })
        })
    }

    /// Number of named parameters in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters().count()
    }

    /// Whether the chain has no named parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters().next().is_none()
    }

    /// Whether both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for KeyChain {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for KeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&KeyFormat::default().print(self))
    }
}

impl fmt::Debug for KeyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.parameters()
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .map(|p| (p.classification, p.name, p.value)),
            )
            .finish()
    }
}

/// Iterator over the nodes of a chain, tail first.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    next: Option<&'a KeyChain>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a KeyChain;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.previous();
        Some(current)
    }
}

#[cfg(test)]
mod tests;
