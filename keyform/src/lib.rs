//! Core crate for `keyform`: naming and identity of localisation keys.
//!
//! A localised string is located by a [`KeyChain`], a chain of
//! `(parameter, value)` segments such as `culture=en`, `type=Login`,
//! `key=Title`. This crate provides the two engines built on that chain:
//!
//! - [`CompiledPattern`] turns a template such as `"{Culture.}{Type.}[Key]"`
//!   into a matcher and builder, mapping keys to file or resource names and
//!   parsing such names back into parameter values.
//! - [`KeyComparer`] decides when two chains denote the same resource:
//!   canonical parameters compare by position, non-canonical ones (such as
//!   `culture`) as an order-independent set.
//!
//! Both engines read keys through a [`KeyDecomposer`] and share the
//! classification held by a [`ParameterInfos`] registry.

mod comparer;
mod error;
mod key;
mod parameter;
mod pattern;

pub use comparer::{FNV_OFFSET_BASIS, FNV_PRIME, KeyComparer};
pub use error::{KeyformError, KeyformResult};
pub use key::{
    ChainDecomposer, Classification, KeyChain, KeyDecomposer, KeyFormat, Nodes, Parameter,
};
pub use parameter::{ANY_SECTION, CULTURE_PATTERN, ParameterInfo, ParameterInfos};
pub use pattern::{
    CompiledPattern, MatchResult, Occurrence, ParameterMap, PatternPart, RegexOptions,
};
