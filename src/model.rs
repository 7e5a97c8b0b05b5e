//! In-memory model definitions and the column bindings derived from them.

use derive_more::Display;

use crate::{
    naming::{entity_to_table_default, field_to_column},
    types::{FieldType, JdbcType},
};

/// Name of the field that marks a row's identity.
pub const IDENTITY_FIELD: &str = "id";

/// A model field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{name}: {}", ty.rust_type())]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Identity is decided by name alone; the declared type is not checked.
    pub fn is_identity(&self) -> bool {
        self.name == IDENTITY_FIELD
    }
}

/// Everything the generators need to know about one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelDefinition {
    /// Rust module path the model lives in (`crate::models`). May be empty.
    pub package: String,
    pub entity: String,
    /// Explicit table name. An empty override is stored as `None`.
    pub table: Option<String>,
    pub fields: Vec<Field>,
}

impl ModelDefinition {
    pub fn new(package: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            entity: entity.into(),
            table: None,
            fields: Vec::new(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        self.table = (!table.is_empty()).then_some(table);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Override if set, otherwise derived from the entity name.
    pub fn table_name(&self) -> String {
        match &self.table {
            Some(table) => table.clone(),
            None => entity_to_table_default(&self.entity),
        }
    }

    pub fn identity_field(&self) -> Option<&Field> {
        self.fields.iter().find(|field| field.is_identity())
    }

    pub fn has_identity(&self) -> bool {
        self.identity_field().is_some()
    }

    /// One binding per field, in declaration order.
    pub fn column_bindings(&self) -> Vec<ColumnBinding> {
        self.fields.iter().map(ColumnBinding::from_field).collect()
    }

    /// `entity` qualified with the package path.
    pub fn qualified_entity(&self) -> String {
        if self.package.is_empty() {
            self.entity.clone()
        } else {
            format!("{}::{}", self.package, self.entity)
        }
    }
}

/// Association between a field and its storage column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnBinding {
    pub field: String,
    pub column: String,
    pub jdbc_type: JdbcType,
    /// Boxed form of the declared type, used as the column's value type.
    pub value_type: FieldType,
    pub primary_key: bool,
}

impl ColumnBinding {
    pub fn from_field(field: &Field) -> Self {
        Self {
            field: field.name.clone(),
            column: field_to_column(&field.name),
            jdbc_type: field.ty.jdbc_type(),
            value_type: field.ty.boxed(),
            primary_key: field.is_identity(),
        }
    }
}
