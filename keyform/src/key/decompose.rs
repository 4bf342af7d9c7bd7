//! Decomposition of opaque key representations into parameters.
//!
//! The name-pattern matcher and the key comparer never inspect a key type
//! directly. They ask a [`KeyDecomposer`] for the key's parameters, which
//! keeps both engines usable with key representations other than
//! [`KeyChain`].

use crate::parameter::ParameterInfos;

use super::{Classification, KeyChain};

/// One named parameter of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameter<'a> {
    /// Parameter name, e.g. `culture`.
    pub name: &'a str,
    /// Parameter value, e.g. `en`.
    pub value: &'a str,
    /// Equivalence classification of this occurrence.
    pub classification: Classification,
}

/// Turns a key of type `K` into its parameters.
///
/// Implementations must return parameters ordered tail to root (most
/// recently appended first) and must classify a given occurrence the same
/// way on every call.
pub trait KeyDecomposer<K: ?Sized> {
    /// Returns the parameters of `key`, tail first.
    fn parameters<'k>(&self, key: &'k K) -> Vec<Parameter<'k>>;
}

impl<K: ?Sized, D: KeyDecomposer<K> + ?Sized> KeyDecomposer<K> for &D {
    fn parameters<'k>(&self, key: &'k K) -> Vec<Parameter<'k>> {
        (**self).parameters(key)
    }
}

/// Decomposer for [`KeyChain`], using the classification stored on each node.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainDecomposer;

impl KeyDecomposer<KeyChain> for ChainDecomposer {
    fn parameters<'k>(&self, key: &'k KeyChain) -> Vec<Parameter<'k>> {
        key.parameters().collect()
    }
}

/// Plain `(name, value)` lists, given root first, classified through the
/// registry.
///
/// # Examples
///
/// ```
/// use keyform::{KeyDecomposer, ParameterInfos, Classification};
///
/// let infos = ParameterInfos::default();
/// let key = [("culture", "en"), ("key", "Title")];
/// let params = infos.parameters(&key[..]);
/// assert_eq!(params[0].name, "key");
/// assert_eq!(params[1].classification, Classification::NonCanonical);
/// ```
impl<S: AsRef<str>> KeyDecomposer<[(S, S)]> for ParameterInfos {
    fn parameters<'k>(&self, key: &'k [(S, S)]) -> Vec<Parameter<'k>> {
        key.iter()
            .rev()
            .map(|(name, value)| Parameter {
                name: name.as_ref(),
                value: value.as_ref(),
                classification: self.classify(name.as_ref()),
            })
            .collect()
    }
}
