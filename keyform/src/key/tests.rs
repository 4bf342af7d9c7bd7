//! Unit tests for key chain construction and traversal.

use super::*;
use rstest::rstest;

#[rstest]
fn root_has_no_parameters() {
    let root = KeyChain::root();
    assert!(root.is_root());
    assert!(root.is_empty());
    assert_eq!(root.parameter_name(), None);
    assert_eq!(root.classification(), Classification::Unclassified);
}

#[rstest]
fn parameters_iterate_tail_first() {
    let key = KeyChain::root().culture("en").type_name("Foo").key("Bar");
    let names: Vec<_> = key.parameters().map(|p| p.name).collect();
    assert_eq!(names, vec!["key", "type", "culture"]);
    assert_eq!(key.len(), 3);
}

#[rstest]
fn nodes_terminate_at_root() {
    let key = KeyChain::root().section("a").section("b");
    let last = key.nodes().last().expect("chain has nodes");
    assert!(last.is_root());
    assert_eq!(key.nodes().count(), 3);
}

#[rstest]
fn appending_shares_the_tail() {
    let base = KeyChain::root().culture("en").type_name("Foo");
    let title = base.key("Title");
    let body = base.key("Body");
    let title_prev = title.previous().expect("title has a previous node");
    let body_prev = body.previous().expect("body has a previous node");
    assert!(title_prev.ptr_eq(&base));
    assert!(body_prev.ptr_eq(&base));
    assert_eq!(base.len(), 2);
}

#[rstest]
#[case::culture(KeyChain::root().culture("en"), "culture", Classification::NonCanonical)]
#[case::assembly(KeyChain::root().assembly("Asm"), "assembly", Classification::NonCanonical)]
#[case::resource(KeyChain::root().resource("r"), "resource", Classification::Canonical)]
#[case::location(KeyChain::root().location("l"), "location", Classification::Canonical)]
#[case::type_name(KeyChain::root().type_name("t"), "type", Classification::Canonical)]
#[case::section(KeyChain::root().section("s"), "section", Classification::Canonical)]
#[case::key(KeyChain::root().key("k"), "key", Classification::Canonical)]
fn convenience_appenders_classify(
    #[case] key: KeyChain,
    #[case] name: &str,
    #[case] expected: Classification,
) {
    assert_eq!(key.parameter_name(), Some(name));
    assert_eq!(key.classification(), expected);
}

#[rstest]
fn append_with_uses_registry() {
    let infos = ParameterInfos::default();
    let key = KeyChain::root()
        .append_with(&infos, "Culture", "fi")
        .append_with(&infos, "Unknown", "x");
    let classes: Vec<_> = key.parameters().map(|p| p.classification).collect();
    assert_eq!(
        classes,
        vec![Classification::Canonical, Classification::NonCanonical]
    );
}

#[rstest]
fn chain_decomposer_matches_parameters() {
    let key = KeyChain::root().culture("en").key("k");
    let params = ChainDecomposer.parameters(&key);
    assert_eq!(params, key.parameters().collect::<Vec<_>>());
}

#[rstest]
fn debug_lists_root_first() {
    let key = KeyChain::root().culture("en").key("k");
    let rendered = format!("{key:?}");
    let culture_at = rendered.find("culture").expect("culture is listed");
    let key_at = rendered.find("\"key\"").expect("key is listed");
    assert!(culture_at < key_at, "{rendered}");
}
