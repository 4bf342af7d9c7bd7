//! Step modules registered with `rstest-bdd`.

pub mod equivalence_steps;
pub mod pattern_steps;
