//! Building names from keys and parsing them back.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface pattern mistakes"
)]

use keyform::{CompiledPattern, KeyChain, ParameterMap};
use rstest::{fixture, rstest};

const FILE_PATTERN: &str = "{Culture.}{Type.}{Section.}[Key]";

#[fixture]
fn pattern() -> CompiledPattern {
    CompiledPattern::new(FILE_PATTERN).expect("file pattern compiles")
}

#[rstest]
#[case::culture_type_key(KeyChain::root().culture("en").type_name("Login").key("Title"), "en.Login.Title")]
#[case::no_culture(KeyChain::root().type_name("Login").key("Title"), "Login.Title")]
#[case::region_culture(
    KeyChain::root().culture("fr-CA").type_name("Login").section("Header").key("Title"),
    "fr-CA.Login.Header.Title"
)]
#[case::key_only(KeyChain::root().key("Title"), "Title")]
fn build_then_match_recovers_the_key(
    pattern: CompiledPattern,
    #[case] key: KeyChain,
    #[case] expected: &str,
) {
    let built = pattern.build_chain(&key).expect("key carries every required part");
    assert_eq!(built, expected);

    let parsed = pattern.match_str(&built);
    assert!(parsed.success(), "{built} should parse");
    assert_eq!(parsed.to_map(), pattern.match_chain(&key).to_map());
    assert_eq!(parsed.to_key(&KeyChain::root()), key);
}

#[rstest]
fn key_without_required_part_does_not_build(pattern: CompiledPattern) {
    let key = KeyChain::root().culture("en").type_name("Login");
    assert!(pattern.build_chain(&key).is_none());
    assert!(!pattern.match_chain(&key).success());
}

#[rstest]
fn prefilled_match_reuses_known_values(pattern: CompiledPattern) -> anyhow::Result<()> {
    let mut known = ParameterMap::new();
    known.insert("Type".to_owned(), "Login.Form".to_owned());
    let result = pattern.match_str_with("en.Login.Form.Title", &known)?;
    assert!(result.success());
    assert_eq!(result.get("Culture"), Some("en"));
    assert_eq!(result.get("Type"), Some("Login.Form"));
    assert_eq!(result.get("Section"), None);
    assert_eq!(result.get("Key"), Some("Title"));
    Ok(())
}

#[rstest]
fn parsed_name_rebuilds_identically(pattern: CompiledPattern) {
    let result = pattern.match_str("de.Menu.File.Open");
    assert_eq!(result.build().as_deref(), Some("de.Menu.File.Open"));
}
