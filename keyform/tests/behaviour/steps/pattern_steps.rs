//! Steps covering pattern compilation, building and matching.

use crate::fixtures::{MatchOutcome, PatternContext, chain_from};
use anyhow::{Result, anyhow, ensure};
use keyform::CompiledPattern;
use rstest_bdd_macros::{given, then, when};
use test_helpers::text::{normalize_scalar, unquote};

#[given("the pattern {template}")]
fn given_pattern(pattern_context: &PatternContext, template: String) -> Result<()> {
    let pattern = CompiledPattern::new(unquote(&template))?;
    pattern_context.pattern.set(pattern);
    Ok(())
}

#[given("the key {pairs}")]
fn given_key(pattern_context: &PatternContext, pairs: String) {
    pattern_context.key.set(chain_from(&pairs));
}

#[when("the key is built")]
fn build_key(pattern_context: &PatternContext) -> Result<()> {
    let key = pattern_context
        .key
        .take()
        .ok_or_else(|| anyhow!("a key must be given"))?;
    let built = pattern_context
        .pattern
        .with_ref(|pattern| pattern.build_chain(&key))
        .ok_or_else(|| anyhow!("a pattern must be given"))?;
    pattern_context.built.set(built);
    Ok(())
}

#[when("the key is matched")]
fn match_key(pattern_context: &PatternContext) -> Result<()> {
    let key = pattern_context
        .key
        .take()
        .ok_or_else(|| anyhow!("a key must be given"))?;
    let outcome = pattern_context
        .pattern
        .with_ref(|pattern| {
            let result = pattern.match_chain(&key);
            MatchOutcome {
                success: result.success(),
                values: result.to_map(),
            }
        })
        .ok_or_else(|| anyhow!("a pattern must be given"))?;
    pattern_context.matched.set(outcome);
    Ok(())
}

#[when("the name {name} is parsed")]
fn parse_name(pattern_context: &PatternContext, name: String) -> Result<()> {
    let input = normalize_scalar(&name);
    let outcome = pattern_context
        .pattern
        .with_ref(|pattern| {
            let result = pattern.match_str(&input);
            MatchOutcome {
                success: result.success(),
                values: result.to_map(),
            }
        })
        .ok_or_else(|| anyhow!("a pattern must be given"))?;
    pattern_context.matched.set(outcome);
    Ok(())
}

#[when("the pattern {template} is compiled")]
fn compile_pattern(pattern_context: &PatternContext, template: String) -> Result<()> {
    match CompiledPattern::new(unquote(&template)) {
        Ok(pattern) => pattern_context.pattern.set(pattern),
        Err(err) => pattern_context.compile_error.set(err),
    }
    Ok(())
}

#[then("the name is {expected}")]
fn assert_name(pattern_context: &PatternContext, expected: String) -> Result<()> {
    let built = pattern_context
        .built
        .take()
        .ok_or_else(|| anyhow!("the key must have been built"))?;
    let expected_name = normalize_scalar(&expected);
    ensure!(
        built.as_deref() == Some(expected_name.as_str()),
        "built {built:?}; expected {expected_name:?}"
    );
    Ok(())
}

#[then("no name is produced")]
fn assert_no_name(pattern_context: &PatternContext) -> Result<()> {
    let built = pattern_context
        .built
        .take()
        .ok_or_else(|| anyhow!("the key must have been built"))?;
    ensure!(built.is_none(), "unexpected name {built:?}");
    Ok(())
}

#[then("the match succeeds")]
fn assert_success(pattern_context: &PatternContext) -> Result<()> {
    let success = pattern_context
        .matched
        .with_ref(|outcome| outcome.success)
        .ok_or_else(|| anyhow!("a match must have run"))?;
    ensure!(success, "expected a successful match");
    Ok(())
}

#[then("the match fails")]
fn assert_failure(pattern_context: &PatternContext) -> Result<()> {
    let outcome = pattern_context
        .matched
        .take()
        .ok_or_else(|| anyhow!("a match must have run"))?;
    ensure!(!outcome.success, "expected the match to fail");
    ensure!(outcome.values.is_empty(), "unexpected values {:?}", outcome.values);
    Ok(())
}

#[then("the part {identifier} captured {value}")]
fn assert_captured(
    pattern_context: &PatternContext,
    identifier: String,
    value: String,
) -> Result<()> {
    let id = normalize_scalar(&identifier);
    let expected = normalize_scalar(&value);
    let actual = pattern_context
        .matched
        .with_ref(|outcome| outcome.values.get(&id).cloned())
        .ok_or_else(|| anyhow!("a match must have run"))?;
    ensure!(
        actual.as_deref() == Some(expected.as_str()),
        "{id} captured {actual:?}; expected {expected:?}"
    );
    Ok(())
}

#[then("compilation fails at position {position:usize}")]
fn assert_compile_error(pattern_context: &PatternContext, position: usize) -> Result<()> {
    let err = pattern_context
        .compile_error
        .take()
        .ok_or_else(|| anyhow!("compilation must have failed"))?;
    ensure!(
        err.position() == Some(position),
        "error {err} reported position {:?}",
        err.position()
    );
    Ok(())
}
