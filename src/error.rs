use std::path::PathBuf;

use thiserror::Error;

pub type DynamicMapperResult<T> = Result<T, DynamicMapperError>;

#[derive(Error, Debug)]
pub enum DynamicMapperError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO Error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// A model input that could not be turned into a `ModelDefinition`.
/// The input is skipped and the run continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("Failed to parse model input: {0}")]
    Parse(String),
    #[error("`{0}` is not a model declaration; only structs with named fields can be models")]
    NotAModel(String),
    #[error("Model entity name must not be empty")]
    EmptyEntityName,
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidIdentifier(String),
    #[error("Model `{entity}` declares field `{field}` more than once")]
    DuplicateField { entity: String, field: String },
    #[error("Field `{field}` of `{entity}` has an unrecognised type `{ty}`")]
    InvalidType {
        entity: String,
        field: String,
        ty: String,
    },
    #[error("Field `{field}` of `{entity}` clashes with the generated `{generated}`")]
    ReservedField {
        entity: String,
        field: String,
        generated: String,
    },
    #[error("Invalid dynamic_model attribute on `{entity}`: {detail}")]
    InvalidAttribute { entity: String, detail: String },
}

/// A generated unit that could not be persisted.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("failed to create {artifact} file at {path}: {source}")]
    Io {
        artifact: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create {artifact} file: invalid package path `{package}`")]
    InvalidPackage { artifact: String, package: String },
    #[error("failed to create {artifact} file: {message}")]
    Rejected { artifact: String, message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
