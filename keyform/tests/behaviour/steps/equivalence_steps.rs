//! Steps covering key equality and hashing.

use crate::fixtures::{EquivalenceContext, chain_from};
use anyhow::{Result, anyhow, ensure};
use keyform::{KeyChain, KeyComparer};
use rstest_bdd_macros::{given, then};

#[given("the first key {pairs}")]
fn given_key(equivalence_context: &EquivalenceContext, pairs: String) {
    equivalence_context.key.set(chain_from(&pairs));
}

#[given("the other key {pairs}")]
fn given_other_key(equivalence_context: &EquivalenceContext, pairs: String) {
    equivalence_context.other.set(chain_from(&pairs));
}

fn both_keys(context: &EquivalenceContext) -> Result<(KeyChain, KeyChain)> {
    let key = context
        .key
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("a key must be given"))?;
    let other = context
        .other
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("another key must be given"))?;
    Ok((key, other))
}

#[then("the keys are equal")]
fn assert_equal(equivalence_context: &EquivalenceContext) -> Result<()> {
    let (key, other) = both_keys(equivalence_context)?;
    ensure!(KeyComparer::default().equals(&key, &other), "{key} != {other}");
    ensure!(key == other);
    Ok(())
}

#[then("the keys differ")]
fn assert_differ(equivalence_context: &EquivalenceContext) -> Result<()> {
    let (key, other) = both_keys(equivalence_context)?;
    ensure!(!KeyComparer::default().equals(&key, &other), "{key} == {other}");
    Ok(())
}

#[then("the keys hash equally")]
fn assert_hash_equal(equivalence_context: &EquivalenceContext) -> Result<()> {
    let (key, other) = both_keys(equivalence_context)?;
    let comparer = KeyComparer::default();
    ensure!(comparer.hash(&key) == comparer.hash(&other));
    Ok(())
}
