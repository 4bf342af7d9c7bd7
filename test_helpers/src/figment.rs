//! Shared helpers for working with `figment::Jail` in tests.
//!
//! These utilities run a closure inside a jail and propagate its return value
//! as an `anyhow::Result`, so callers can create configuration files in an
//! isolated directory without hand-written `Option` plumbing.

use std::path::PathBuf;

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down automatically once the closure completes, even when
/// the closure returns an error.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Writes `contents` to `name` inside a fresh jail and hands `f` the path.
///
/// # Errors
///
/// Returns an error when the file cannot be created or `f` fails.
pub fn with_config_file<F, T>(name: &str, contents: &str, f: F) -> Result<T>
where
    F: FnOnce(PathBuf) -> figment::error::Result<T>,
{
    with_jail(|j| {
        j.create_file(name, contents)?;
        f(j.directory().join(name))
    })
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Helpful when a jail closure calls an API with its own error type.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers usually own the error they are converting"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
