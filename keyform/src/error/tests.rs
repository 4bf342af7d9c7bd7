//! Unit tests for error construction and rendering.

use rstest::rstest;

use super::KeyformError;

#[rstest]
fn pattern_syntax_names_fragment_and_position() {
    let err = KeyformError::pattern_syntax("{A}}", 3, "}", "unmatched '}'");
    let rendered = err.to_string();
    assert!(rendered.contains("position 3"), "{rendered}");
    assert!(rendered.contains("('}')"), "{rendered}");
    assert_eq!(err.position(), Some(3));
}

#[rstest]
fn key_syntax_has_no_position() {
    let err = KeyformError::key_syntax("culture", "odd number of fields");
    assert!(err.to_string().contains("odd number of fields"));
    assert_eq!(err.position(), None);
}

#[rstest]
fn figment_errors_convert_into_configuration() {
    let err: KeyformError = figment::Error::from("boom").into();
    assert!(matches!(err, KeyformError::Configuration(_)));
}
