// Common test utilities and helpers

#![allow(dead_code)]

use dynamic_mapper::prelude::*;
use syn::{Item, ItemTrait, TraitItem};

/// `Person { id: int, firstName: text, lastName: text }`
pub fn person() -> ModelDefinition {
    ModelDefinition::new("crate::models", "Person")
        .with_field("id", FieldType::Int)
        .with_field("firstName", FieldType::Text)
        .with_field("lastName", FieldType::Text)
}

/// `Address { street: text }`, no identity field
pub fn address() -> ModelDefinition {
    ModelDefinition::new("crate::models", "Address").with_field("street", FieldType::Text)
}

/// Run the default generator over `models` into memory.
pub fn generate_all(models: Vec<ModelDefinition>) -> (GenerationReport, MemoryEmitter) {
    let mut emitter = MemoryEmitter::new();
    let report = run(
        models.into_iter().map(Ok),
        &GeneratorConfig::default(),
        &mut emitter,
    );
    (report, emitter)
}

/// Parse a generated mapper unit and return its trait.
pub fn mapper_trait(unit: &SourceUnit) -> ItemTrait {
    let file = unit.parse().expect("generated mapper must parse");
    file.items
        .into_iter()
        .find_map(|item| match item {
            Item::Trait(item) => Some(item),
            _ => None,
        })
        .expect("generated mapper must contain a trait")
}

pub fn trait_methods(item: &ItemTrait) -> Vec<String> {
    item.items
        .iter()
        .filter_map(|member| match member {
            TraitItem::Fn(f) => Some(f.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Column literals passed to `table.column(..)` in a generated descriptor, in order.
pub fn descriptor_columns(unit: &SourceUnit) -> Vec<String> {
    let mut columns = Vec::new();
    let mut rest = unit.body.as_str();
    while let Some(start) = rest.find(". column (\"") {
        let after = &rest[start + ". column (\"".len()..];
        let end = after.find('"').expect("unterminated column literal");
        columns.push(after[..end].to_string());
        rest = &after[end..];
    }
    columns
}
