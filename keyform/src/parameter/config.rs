//! Loading parameter metadata from configuration sources.

use std::path::Path;

use figment::{
    Figment,
    providers::{Format, Toml},
};
use serde::Deserialize;

use super::{ParameterInfo, ParameterInfos};
use crate::error::KeyformResult;

const fn include_defaults() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ParameterConfig {
    #[serde(default = "include_defaults")]
    include_defaults: bool,
    #[serde(default)]
    parameters: Vec<ParameterInfo>,
}

impl ParameterInfos {
    /// Extracts a registry from `figment`.
    ///
    /// Configured entries replace built-ins of the same name unless
    /// `include_defaults = false`, in which case only configured entries are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`KeyformError::Configuration`](crate::KeyformError::Configuration)
    /// when extraction fails and
    /// [`KeyformError::PartRegex`](crate::KeyformError::PartRegex) when a
    /// configured pattern is not a valid regex.
    pub fn from_figment(figment: &Figment) -> KeyformResult<Self> {
        let config: ParameterConfig = figment.extract()?;
        let mut infos = if config.include_defaults {
            Self::default()
        } else {
            Self::empty()
        };
        for info in config.parameters {
            infos.insert(info);
        }
        infos.validate()?;
        tracing::debug!(
            parameters = infos.len(),
            include_defaults = config.include_defaults,
            "loaded parameter registry"
        );
        Ok(infos)
    }

    /// Parses a registry from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyform::{Classification, ParameterInfos};
    ///
    /// let infos = ParameterInfos::from_toml_str(
    ///     r#"
    ///     [[parameters]]
    ///     name = "plugin"
    ///     classification = "non-canonical"
    ///     "#,
    /// )
    /// .expect("valid configuration");
    /// assert_eq!(infos.classify("plugin"), Classification::NonCanonical);
    /// assert_eq!(infos.classify("culture"), Classification::NonCanonical);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`ParameterInfos::from_figment`].
    pub fn from_toml_str(data: &str) -> KeyformResult<Self> {
        Self::from_figment(&Figment::from(Toml::string(data)))
    }

    /// Loads a registry from a TOML file. A missing file yields the
    /// built-in registry.
    ///
    /// # Errors
    ///
    /// See [`ParameterInfos::from_figment`].
    pub fn load(path: impl AsRef<Path>) -> KeyformResult<Self> {
        Self::from_figment(&Figment::from(Toml::file(path.as_ref())))
    }
}
