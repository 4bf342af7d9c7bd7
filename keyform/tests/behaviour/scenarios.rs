//! Binds the feature files to the step registry.

use crate::fixtures::{
    EquivalenceContext, PatternContext, equivalence_context, pattern_context,
};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/name_patterns.feature",
    fixtures = [pattern_context: PatternContext]
);
scenarios!(
    "tests/features/key_equivalence.feature",
    fixtures = [equivalence_context: EquivalenceContext]
);
