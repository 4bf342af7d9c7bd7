//! Key equivalence: equality and a stable hash over key chains.
//!
//! Two passes decide whether keys are the same resource:
//!
//! - **Non-canonical**: walking tail to root, the first occurrence of each
//!   non-canonical parameter name is significant and later (root-ward)
//!   duplicates are skipped. Keys agree when their significant
//!   `(name, value)` sets are identical, in any order.
//! - **Canonical**: canonical parameters are compared pairwise, tail to root.
//!   Keys agree when every pair matches and both run out together.
//!
//! Unclassified parameters take part in neither pass.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::key::{ChainDecomposer, Classification, KeyChain, KeyDecomposer, Parameter};

/// FNV-1 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Equality and hashing of keys under canonical/non-canonical rules.
///
/// # Examples
///
/// ```
/// use keyform::{KeyChain, KeyComparer};
///
/// let comparer = KeyComparer::default();
/// let a = KeyChain::root().culture("en").assembly("Asm").key("k");
/// let b = KeyChain::root().assembly("Asm").culture("en").key("k");
/// assert!(comparer.equals(&a, &b));
/// assert_eq!(comparer.hash(&a), comparer.hash(&b));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeyComparer<D = ChainDecomposer> {
    decomposer: D,
}

impl Default for KeyComparer {
    fn default() -> Self {
        Self::new(ChainDecomposer)
    }
}

impl<D> KeyComparer<D> {
    /// Creates a comparer reading keys through `decomposer`.
    #[must_use]
    pub const fn new(decomposer: D) -> Self {
        Self { decomposer }
    }

    /// Decomposer used to read keys.
    #[must_use]
    pub const fn decomposer(&self) -> &D {
        &self.decomposer
    }

    /// Whether `x` and `y` denote the same resource.
    #[must_use]
    pub fn equals<K>(&self, x: &K, y: &K) -> bool
    where
        K: ?Sized,
        D: KeyDecomposer<K>,
    {
        let x_params = self.decomposer.parameters(x);
        let y_params = self.decomposer.parameters(y);
        significant_non_canonical(&x_params) == significant_non_canonical(&y_params)
            && canonical(&x_params).eq(canonical(&y_params))
    }

    /// [`KeyComparer::equals`] over optional keys: two `None`s are equal, a
    /// `None` never equals a key.
    #[must_use]
    pub fn equals_opt<K>(&self, x: Option<&K>, y: Option<&K>) -> bool
    where
        K: ?Sized,
        D: KeyDecomposer<K>,
    {
        match (x, y) {
            (None, None) => true,
            (Some(x_key), Some(y_key)) => self.equals(x_key, y_key),
            _ => false,
        }
    }

    /// Hash consistent with [`KeyComparer::equals`].
    ///
    /// Non-canonical pairs are XOR-ed in, so their order cannot matter.
    /// Canonical pairs are XOR-ed and multiplied by [`FNV_PRIME`] one at a
    /// time, tail to root, so their order does.
    #[must_use]
    pub fn hash<K>(&self, key: &K) -> u32
    where
        K: ?Sized,
        D: KeyDecomposer<K>,
    {
        let params = self.decomposer.parameters(key);
        let mut hash = significant_non_canonical(&params)
            .into_iter()
            .fold(FNV_OFFSET_BASIS, |acc, (name, value)| {
                acc ^ pair_hash(name, value)
            });
        for param in canonical(&params) {
            hash ^= pair_hash(param.name, param.value);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    /// Hash of an optional key; `None` hashes to zero.
    #[must_use]
    pub fn hash_opt<K>(&self, key: Option<&K>) -> u32
    where
        K: ?Sized,
        D: KeyDecomposer<K>,
    {
        key.map_or(0, |k| self.hash(k))
    }
}

/// Significant non-canonical pairs: the first occurrence of each name seen
/// from the tail. Duplicates are skipped and collection continues.
fn significant_non_canonical<'a>(params: &[Parameter<'a>]) -> HashMap<&'a str, &'a str> {
    let mut significant = HashMap::new();
    for param in params
        .iter()
        .filter(|param| param.classification == Classification::NonCanonical)
    {
        significant.entry(param.name).or_insert(param.value);
    }
    significant
}

fn canonical<'p, 'a>(params: &'p [Parameter<'a>]) -> impl Iterator<Item = &'p Parameter<'a>> {
    params
        .iter()
        .filter(|param| param.classification == Classification::Canonical)
}

/// FNV-1a over the name, a `0xFF` separator, and the value. The separator
/// is never part of UTF-8 text, so `("ab", "c")` and `("a", "bc")` differ.
fn pair_hash(name: &str, value: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in name
        .bytes()
        .chain(std::iter::once(0xFF))
        .chain(value.bytes())
    {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl PartialEq for KeyChain {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || KeyComparer::default().equals(self, other)
    }
}

impl Eq for KeyChain {}

impl Hash for KeyChain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(KeyComparer::default().hash(self));
    }
}
