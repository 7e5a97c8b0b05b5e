//! Generator configuration.
//!
//! Built in code through `typed-builder`, or loaded from a TOML file where
//! every key is optional:
//!
//! ```toml
//! runtime_path = "::dynamic_sql"
//! descriptor_suffix = "TableSupport"
//! mapper_suffix = "Mapper"
//! row_access = "getter"
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::error::ConfigError;

pub const DEFAULT_RUNTIME_PATH: &str = "::dynamic_sql";
pub const DEFAULT_DESCRIPTOR_SUFFIX: &str = "TableSupport";
pub const DEFAULT_MAPPER_SUFFIX: &str = "Mapper";
pub const DEFAULT_RESULT_MAP_SUFFIX: &str = "Result";

/// How generated mapper code reads values off a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RowAccess {
    /// `row.first_name.clone()`
    #[default]
    Field,
    /// `row.getFirstName()`
    Getter,
}

/// Options for a generation run.
///
/// # Examples
///
/// ```
/// use dynamic_mapper::config::{GeneratorConfig, RowAccess};
///
/// let config = GeneratorConfig::builder()
///     .runtime_path("crate::sql")
///     .row_access(RowAccess::Getter)
///     .build();
/// assert_eq!(config.mapper_suffix, "Mapper");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Deserialize)]
#[builder(doc)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path of the data-access runtime referenced by generated code
    #[builder(default = DEFAULT_RUNTIME_PATH.to_string(), setter(into))]
    pub runtime_path: String,

    /// Suffix of the table descriptor artifact (`Person` -> `PersonTableSupport`)
    #[builder(default = DEFAULT_DESCRIPTOR_SUFFIX.to_string(), setter(into))]
    pub descriptor_suffix: String,

    /// Suffix of the mapper trait (`Person` -> `PersonMapper`)
    #[builder(default = DEFAULT_MAPPER_SUFFIX.to_string(), setter(into))]
    pub mapper_suffix: String,

    /// Suffix of the result map id (`Person` -> `PersonResult`)
    #[builder(default = DEFAULT_RESULT_MAP_SUFFIX.to_string(), setter(into))]
    pub result_map_suffix: String,

    #[builder(default)]
    pub row_access: RowAccess,

    #[builder(default = true)]
    pub generate_descriptor: bool,

    #[builder(default = true)]
    pub generate_mapper: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
