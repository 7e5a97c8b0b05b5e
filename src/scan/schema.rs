//! Declarative TOML schema front end.
//!
//! ```toml
//! package = "crate::models"
//!
//! [[model]]
//! name = "Person"
//! table = "people"
//!
//! [[model.field]]
//! name = "id"
//! type = "int"
//!
//! [[model.field]]
//! name = "firstName"
//! type = "text"
//! ```
//!
//! Field types accept the keywords `text`, `int`, `integer`, `long`, `Long`,
//! `boolean`, `Boolean`, `float`, `Float`, `double`, `Double` and `timestamp`,
//! or any Rust type (`Option<i64>`, `uuid::Uuid`). Capitalised keywords and
//! `integer` declare the nullable form.

use serde::Deserialize;

use super::{ModelScanner, validate};
use crate::{
    error::ScanError,
    model::{Field, ModelDefinition},
    types::FieldType,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Default package for every model in the file.
    #[serde(default)]
    pub package: String,
    #[serde(default, rename = "model", alias = "models")]
    pub models: Vec<ModelDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDecl {
    pub name: String,
    /// Explicit table name; empty means derive it from `name`.
    #[serde(default)]
    pub table: String,
    /// Overrides the file-level package.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default, rename = "field", alias = "fields")]
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub skip: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaScanner {
    pub package: String,
}

impl SchemaScanner {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }
}

impl ModelScanner for SchemaScanner {
    type Input = ModelDecl;

    fn scan(&self, decl: &ModelDecl) -> Result<ModelDefinition, ScanError> {
        let package = decl.package.clone().unwrap_or_else(|| self.package.clone());
        let mut model = ModelDefinition::new(package, decl.name.trim()).with_table(decl.table.trim());

        for field in decl.fields.iter().filter(|field| !field.skip) {
            let ty = FieldType::from_schema_name(&field.ty).ok_or_else(|| ScanError::InvalidType {
                entity: decl.name.clone(),
                field: field.name.clone(),
                ty: field.ty.clone(),
            })?;
            model.fields.push(Field::new(field.name.trim(), ty));
        }

        validate(&model)?;
        Ok(model)
    }
}

/// Scan every `[[model]]` entry of a schema file, one result per entry.
pub fn scan_schema(text: &str) -> Vec<Result<ModelDefinition, ScanError>> {
    let schema: SchemaFile = match toml::from_str(text) {
        Ok(schema) => schema,
        Err(err) => return vec![Err(ScanError::Parse(err.to_string()))],
    };
    let scanner = SchemaScanner::new(schema.package);
    schema.models.iter().map(|decl| scanner.scan(decl)).collect()
}
