//! Shared text normalization helpers for behavioural test suites.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Normalizes a scalar placeholder by trimming and unquoting one outer layer.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Splits `name=value` pairs separated by commas, preserving order.
///
/// Entries without `=` are ignored; names and values are trimmed.
///
/// ```
/// use keyform_test_helpers::text::split_assignments;
///
/// let pairs = split_assignments("culture=en, type=Login");
/// assert_eq!(pairs, vec![
///     ("culture".to_owned(), "en".to_owned()),
///     ("type".to_owned(), "Login".to_owned()),
/// ]);
/// ```
#[must_use]
pub fn split_assignments(value: &str) -> Vec<(String, String)> {
    unquote(value)
        .split(',')
        .filter_map(|entry| entry.split_once('='))
        .map(|(name, val)| (name.trim().to_owned(), val.trim().to_owned()))
        .collect()
}
