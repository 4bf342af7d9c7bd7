//! Shared fixtures for the behavioural scenarios.

use keyform::{CompiledPattern, KeyChain, KeyformError, ParameterInfos, ParameterMap};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Outcome of matching, reduced to what the steps assert on.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub success: bool,
    pub values: ParameterMap,
}

/// Scenario state for the name-pattern feature.
#[derive(Debug, Default, ScenarioState)]
pub struct PatternContext {
    pub pattern: Slot<CompiledPattern>,
    pub key: Slot<KeyChain>,
    pub built: Slot<Option<String>>,
    pub matched: Slot<MatchOutcome>,
    pub compile_error: Slot<KeyformError>,
}

/// Scenario state for the key-equivalence feature.
#[derive(Debug, Default, ScenarioState)]
pub struct EquivalenceContext {
    pub key: Slot<KeyChain>,
    pub other: Slot<KeyChain>,
}

#[fixture]
pub fn pattern_context() -> PatternContext {
    PatternContext::default()
}

#[fixture]
pub fn equivalence_context() -> EquivalenceContext {
    EquivalenceContext::default()
}

/// Builds a chain from `name=value` pairs, classified by the default registry.
pub fn chain_from(text: &str) -> KeyChain {
    let infos = ParameterInfos::default();
    test_helpers::text::split_assignments(text)
        .into_iter()
        .fold(KeyChain::root(), |chain, (name, value)| {
            chain.append_with(&infos, &name, value)
        })
}
