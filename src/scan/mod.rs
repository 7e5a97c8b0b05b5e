//! Model scanning.
//!
//! A scanner turns one model input into a [`ModelDefinition`]. Two front ends
//! exist and both feed the same generators:
//!
//! 1. [`SourceScanner`] - Rust structs marked with `#[dynamic_model]`
//! 2. [`SchemaScanner`] - `[[model]]` entries of a TOML schema file
//!
//! Inputs that fail to scan produce a [`ScanError`]; callers skip them and
//! carry on with the next input.

use std::{collections::HashSet, fs, path::Path};

use crate::{
    error::{DynamicMapperError, DynamicMapperResult, ScanError},
    generate::TABLE_FIELD,
    model::ModelDefinition,
    naming::to_static_name,
    render::{is_valid_identifier, is_valid_path, is_valid_type},
};

pub mod schema;
pub mod source;

pub use schema::{FieldDecl, ModelDecl, SchemaFile, SchemaScanner, scan_schema};
pub use source::{SourceScanner, scan_source};

pub trait ModelScanner {
    type Input: ?Sized;

    fn scan(&self, input: &Self::Input) -> Result<ModelDefinition, ScanError>;
}

/// One scan result per marked item in a Rust source file.
pub fn scan_source_file(
    path: impl AsRef<Path>,
    package: &str,
) -> DynamicMapperResult<Vec<Result<ModelDefinition, ScanError>>> {
    Ok(scan_source(&read(path.as_ref())?, package))
}

/// One scan result per `[[model]]` entry in a TOML schema file.
pub fn scan_schema_file(
    path: impl AsRef<Path>,
) -> DynamicMapperResult<Vec<Result<ModelDefinition, ScanError>>> {
    Ok(scan_schema(&read(path.as_ref())?))
}

fn read(path: &Path) -> DynamicMapperResult<String> {
    fs::read_to_string(path).map_err(|source| DynamicMapperError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks shared by every front end.
pub fn validate(model: &ModelDefinition) -> Result<(), ScanError> {
    if model.entity.is_empty() {
        return Err(ScanError::EmptyEntityName);
    }
    if !is_valid_identifier(&model.entity) {
        return Err(ScanError::InvalidIdentifier(model.entity.clone()));
    }
    if !is_valid_path(&model.package) {
        return Err(ScanError::InvalidIdentifier(model.package.clone()));
    }
    if let Some(table) = &model.table
        && table.contains(char::is_whitespace)
    {
        return Err(ScanError::InvalidAttribute {
            entity: model.entity.clone(),
            detail: format!("table name `{table}` contains whitespace"),
        });
    }

    let static_name = to_static_name(&model.entity);
    let mut seen = HashSet::new();
    for field in &model.fields {
        if !is_valid_identifier(&field.name) {
            return Err(ScanError::InvalidIdentifier(field.name.clone()));
        }
        if let Some(generated) = [TABLE_FIELD, static_name.as_str()]
            .into_iter()
            .find(|generated| *generated == field.name)
        {
            return Err(ScanError::ReservedField {
                entity: model.entity.clone(),
                field: field.name.clone(),
                generated: generated.to_string(),
            });
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ScanError::DuplicateField {
                entity: model.entity.clone(),
                field: field.name.clone(),
            });
        }
        if !is_valid_type(&field.ty) {
            return Err(ScanError::InvalidType {
                entity: model.entity.clone(),
                field: field.name.clone(),
                ty: field.ty.rust_type(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn test_validate_accepts_plain_model() {
        let model = ModelDefinition::new("crate::models", "Person")
            .with_field("id", FieldType::Int)
            .with_field("type", FieldType::Text);
        assert_eq!(validate(&model), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_entity() {
        let model = ModelDefinition::new("", "");
        assert_eq!(validate(&model), Err(ScanError::EmptyEntityName));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let model = ModelDefinition::new("", "Person")
            .with_field("name", FieldType::Text)
            .with_field("name", FieldType::Int);
        assert!(matches!(
            validate(&model),
            Err(ScanError::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_names_and_types() {
        let model = ModelDefinition::new("", "Person").with_field("first name", FieldType::Text);
        assert!(matches!(
            validate(&model),
            Err(ScanError::InvalidIdentifier(_))
        ));

        let model = ModelDefinition::new("", "Person")
            .with_field("blob", FieldType::Other("Vec<".into()));
        assert!(matches!(validate(&model), Err(ScanError::InvalidType { .. })));

        let model = ModelDefinition::new("", "Person").with_table("my table");
        assert!(matches!(
            validate(&model),
            Err(ScanError::InvalidAttribute { .. })
        ));

        let model = ModelDefinition::new("crate::", "Person");
        assert!(matches!(
            validate(&model),
            Err(ScanError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_xid_names() {
        let model = ModelDefinition::new("", "Tag").with_field("x²", FieldType::Text);
        assert_eq!(
            validate(&model),
            Err(ScanError::InvalidIdentifier("x²".into()))
        );
        let model = ModelDefinition::new("", "Café").with_field("naïve", FieldType::Text);
        assert_eq!(validate(&model), Ok(()));
    }

    #[test]
    fn test_validate_rejects_fields_clashing_with_descriptor_items() {
        let model = ModelDefinition::new("", "Doc").with_field("sql_table", FieldType::Text);
        assert_eq!(
            validate(&model),
            Err(ScanError::ReservedField {
                entity: "Doc".into(),
                field: "sql_table".into(),
                generated: "sql_table".into(),
            })
        );

        let model = ModelDefinition::new("", "Person").with_field("PERSON", FieldType::Text);
        assert!(matches!(
            validate(&model),
            Err(ScanError::ReservedField { generated, .. }) if generated == "PERSON"
        ));

        let model = ModelDefinition::new("", "Person").with_field("person", FieldType::Text);
        assert_eq!(validate(&model), Ok(()));
    }

    #[test]
    fn test_scan_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("models.rs");
        fs::write(&source, "#[dynamic_model] pub struct Tag { pub id: i64 }").unwrap();
        let results = scan_source_file(&source, "crate::models").unwrap();
        assert_eq!(results[0].as_ref().unwrap().entity, "Tag");

        let missing = scan_schema_file(dir.path().join("schema.toml"));
        assert!(matches!(missing, Err(DynamicMapperError::Io { .. })));
    }

    #[test]
    fn test_zero_field_model_is_valid() {
        assert_eq!(validate(&ModelDefinition::new("", "Empty")), Ok(()));
    }
}
