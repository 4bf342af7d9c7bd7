//! Error types produced while compiling patterns, parsing keys, and loading
//! parameter metadata.

mod constructors;
mod types;

pub use types::{KeyformError, KeyformResult};

#[cfg(test)]
mod tests;
