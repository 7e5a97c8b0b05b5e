//! Declared field types and their storage mappings.
//!
//! A [`FieldType`] is what a model declares. It maps to a logical storage type
//! ([`JdbcType`]) and to a boxed form, which is the nullable `Option<T>` shape
//! used for column bindings in generated code.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use syn::{GenericArgument, PathArguments, Type};

/// Logical storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum JdbcType {
    Varchar,
    Integer,
    Timestamp,
    Boolean,
    Bigint,
    Double,
    Float,
}

impl JdbcType {
    /// Variant name as written in generated code (`JdbcType::Bigint`).
    pub fn variant_name(self) -> String {
        format!("{self:?}")
    }
}

/// Paths recognised as timestamps when scanning Rust types.
const TIMESTAMP_TYPES: &[&str] = &[
    "NaiveDateTime",
    "DateTime",
    "PrimitiveDateTime",
    "OffsetDateTime",
    "SystemTime",
];

/// Default Rust type for schema fields declared as `timestamp`.
pub const DEFAULT_TIMESTAMP_TYPE: &str = "chrono::NaiveDateTime";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Int,
    BoxedInt,
    Long,
    BoxedLong,
    Bool,
    BoxedBool,
    Float,
    BoxedFloat,
    Double,
    BoxedDouble,
    /// Date-time value; holds the Rust type path as written.
    Timestamp(String),
    /// Anything else; holds the Rust type path as written.
    Other(String),
}

impl FieldType {
    /// Storage type lookup. First match wins, unknown types fall back to VARCHAR.
    pub fn jdbc_type(&self) -> JdbcType {
        match self {
            Self::Text => JdbcType::Varchar,
            Self::Int | Self::BoxedInt => JdbcType::Integer,
            Self::Timestamp(_) => JdbcType::Timestamp,
            Self::Bool | Self::BoxedBool => JdbcType::Boolean,
            Self::Long | Self::BoxedLong => JdbcType::Bigint,
            Self::Double | Self::BoxedDouble => JdbcType::Double,
            Self::Float | Self::BoxedFloat => JdbcType::Float,
            Self::Other(_) => JdbcType::Varchar,
        }
    }

    /// Nullable form of a primitive; reference types pass through unchanged.
    pub fn boxed(&self) -> Self {
        match self {
            Self::Int => Self::BoxedInt,
            Self::Bool => Self::BoxedBool,
            Self::Long => Self::BoxedLong,
            Self::Double => Self::BoxedDouble,
            Self::Float => Self::BoxedFloat,
            other => other.clone(),
        }
    }

    pub fn is_boxed(&self) -> bool {
        matches!(
            self,
            Self::BoxedInt | Self::BoxedLong | Self::BoxedBool | Self::BoxedFloat | Self::BoxedDouble
        )
    }

    /// Rust type written in generated code.
    pub fn rust_type(&self) -> String {
        match self {
            Self::Text => "String".to_string(),
            Self::Int => "i32".to_string(),
            Self::BoxedInt => "Option<i32>".to_string(),
            Self::Long => "i64".to_string(),
            Self::BoxedLong => "Option<i64>".to_string(),
            Self::Bool => "bool".to_string(),
            Self::BoxedBool => "Option<bool>".to_string(),
            Self::Float => "f32".to_string(),
            Self::BoxedFloat => "Option<f32>".to_string(),
            Self::Double => "f64".to_string(),
            Self::BoxedDouble => "Option<f64>".to_string(),
            Self::Timestamp(path) | Self::Other(path) => path.clone(),
        }
    }

    /// Classify a Rust field type.
    pub fn from_rust_type(ty: &Type) -> Self {
        if let Some(inner) = option_inner(ty) {
            return match Self::from_rust_type(inner) {
                Self::Int => Self::BoxedInt,
                Self::Long => Self::BoxedLong,
                Self::Bool => Self::BoxedBool,
                Self::Float => Self::BoxedFloat,
                Self::Double => Self::BoxedDouble,
                Self::Timestamp(_) => Self::Timestamp(type_string(ty)),
                _ => Self::Other(type_string(ty)),
            };
        }

        let Some(last) = last_segment_name(ty) else {
            return Self::Other(type_string(ty));
        };
        match last.as_str() {
            "String" | "str" => Self::Text,
            "i32" => Self::Int,
            "i64" => Self::Long,
            "bool" => Self::Bool,
            "f32" => Self::Float,
            "f64" => Self::Double,
            name if TIMESTAMP_TYPES.contains(&name) => Self::Timestamp(type_string(ty)),
            _ => Self::Other(type_string(ty)),
        }
    }

    /// Classify a type name from a schema file. Returns `None` when the name is
    /// not a known keyword and does not parse as a Rust type.
    pub fn from_schema_name(name: &str) -> Option<Self> {
        let ty = match name.trim() {
            "text" | "string" | "String" => Self::Text,
            "int" | "i32" => Self::Int,
            "integer" | "Integer" => Self::BoxedInt,
            "long" | "i64" => Self::Long,
            "Long" => Self::BoxedLong,
            "boolean" | "bool" => Self::Bool,
            "Boolean" => Self::BoxedBool,
            "float" | "f32" => Self::Float,
            "Float" => Self::BoxedFloat,
            "double" | "f64" => Self::Double,
            "Double" => Self::BoxedDouble,
            "timestamp" | "datetime" => Self::Timestamp(DEFAULT_TIMESTAMP_TYPE.to_string()),
            other => {
                let parsed = syn::parse_str::<Type>(other).ok()?;
                Self::from_rust_type(&parsed)
            }
        };
        Some(ty)
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        Type::Reference(reference) => last_segment_name(&reference.elem),
        Type::Group(group) => last_segment_name(&group.elem),
        Type::Paren(paren) => last_segment_name(&paren.elem),
        _ => None,
    }
}

/// Source text of a type without the token spacing `quote` inserts.
fn type_string(ty: &Type) -> String {
    quote::quote!(#ty)
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use syn::parse_quote;

    #[test]
    fn test_jdbc_mapping() {
        assert_eq!(FieldType::Text.jdbc_type(), JdbcType::Varchar);
        assert_eq!(FieldType::Int.jdbc_type(), JdbcType::Integer);
        assert_eq!(FieldType::BoxedInt.jdbc_type(), JdbcType::Integer);
        assert_eq!(FieldType::Long.jdbc_type(), JdbcType::Bigint);
        assert_eq!(FieldType::BoxedLong.jdbc_type(), JdbcType::Bigint);
        assert_eq!(FieldType::Bool.jdbc_type(), JdbcType::Boolean);
        assert_eq!(FieldType::Float.jdbc_type(), JdbcType::Float);
        assert_eq!(FieldType::Double.jdbc_type(), JdbcType::Double);
        assert_eq!(
            FieldType::Timestamp(DEFAULT_TIMESTAMP_TYPE.into()).jdbc_type(),
            JdbcType::Timestamp
        );
        assert_eq!(
            FieldType::Other("uuid::Uuid".into()).jdbc_type(),
            JdbcType::Varchar
        );
    }

    #[test]
    fn test_boxed_mapping() {
        assert_eq!(FieldType::Long.boxed(), FieldType::BoxedLong);
        assert_eq!(FieldType::Int.boxed(), FieldType::BoxedInt);
        assert_eq!(FieldType::BoxedInt.boxed(), FieldType::BoxedInt);
        assert_eq!(FieldType::Text.boxed(), FieldType::Text);
        assert_eq!(FieldType::Long.boxed().rust_type(), "Option<i64>");
    }

    #[test]
    fn test_jdbc_display_is_sql_name() {
        let names: Vec<String> = JdbcType::iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            ["VARCHAR", "INTEGER", "TIMESTAMP", "BOOLEAN", "BIGINT", "DOUBLE", "FLOAT"]
        );
        assert_eq!(JdbcType::Bigint.variant_name(), "Bigint");
        assert_eq!("BIGINT".parse::<JdbcType>().unwrap(), JdbcType::Bigint);
    }

    #[test]
    fn test_from_rust_type() {
        assert_eq!(FieldType::from_rust_type(&parse_quote!(String)), FieldType::Text);
        assert_eq!(FieldType::from_rust_type(&parse_quote!(&'static str)), FieldType::Text);
        assert_eq!(FieldType::from_rust_type(&parse_quote!(i32)), FieldType::Int);
        assert_eq!(
            FieldType::from_rust_type(&parse_quote!(Option<i64>)),
            FieldType::BoxedLong
        );
        assert_eq!(
            FieldType::from_rust_type(&parse_quote!(Option<String>)),
            FieldType::Other("Option<String>".into())
        );
        assert_eq!(
            FieldType::from_rust_type(&parse_quote!(Option<String>)).jdbc_type(),
            JdbcType::Varchar
        );
        assert_eq!(
            FieldType::from_rust_type(&parse_quote!(chrono::NaiveDateTime)),
            FieldType::Timestamp("chrono::NaiveDateTime".into())
        );
        assert_eq!(
            FieldType::from_rust_type(&parse_quote!(Vec<u8>)),
            FieldType::Other("Vec<u8>".into())
        );
        assert_eq!(
            FieldType::from_rust_type(&parse_quote!(Option<uuid::Uuid>)),
            FieldType::Other("Option<uuid::Uuid>".into())
        );
    }

    #[test]
    fn test_from_schema_name() {
        assert_eq!(FieldType::from_schema_name("text"), Some(FieldType::Text));
        assert_eq!(FieldType::from_schema_name("long"), Some(FieldType::Long));
        assert_eq!(FieldType::from_schema_name("Long"), Some(FieldType::BoxedLong));
        assert_eq!(
            FieldType::from_schema_name("timestamp"),
            Some(FieldType::Timestamp(DEFAULT_TIMESTAMP_TYPE.into()))
        );
        assert_eq!(
            FieldType::from_schema_name("uuid::Uuid"),
            Some(FieldType::Other("uuid::Uuid".into()))
        );
        assert_eq!(FieldType::from_schema_name("not a type"), None);
    }
}
