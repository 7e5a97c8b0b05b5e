//! Scans Rust source for structs carrying the `#[dynamic_model]` marker.

use syn::{
    Attribute, Block, Fields, Item, ItemMod, LitStr, Meta, Type,
    ext::IdentExt,
    visit::{self, Visit},
};

use super::{ModelScanner, validate};
use crate::{
    error::ScanError,
    model::{Field, ModelDefinition},
    types::FieldType,
};

/// Name of the marker attribute, matched on the last path segment so both
/// `#[dynamic_model]` and `#[dynamic_mapper::dynamic_model]` are recognised.
pub const MARKER: &str = "dynamic_model";

/// Turns a marked struct into a [`ModelDefinition`] located in `package`.
#[derive(Debug, Clone, Default)]
pub struct SourceScanner {
    pub package: String,
}

impl SourceScanner {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }
}

impl ModelScanner for SourceScanner {
    type Input = Item;

    fn scan(&self, input: &Item) -> Result<ModelDefinition, ScanError> {
        let Item::Struct(item) = input else {
            return Err(ScanError::NotAModel(item_name(input)));
        };
        let entity = item.ident.unraw().to_string();

        let Fields::Named(named) = &item.fields else {
            return Err(ScanError::NotAModel(entity));
        };
        if !item.generics.params.is_empty() {
            return Err(ScanError::InvalidAttribute {
                entity,
                detail: "generic parameters are not supported on models".into(),
            });
        }

        let mut model = ModelDefinition::new(self.package.clone(), entity.clone());
        if let Some(attr) = find_marker(&item.attrs) {
            let table = parse_table(attr).map_err(|err| ScanError::InvalidAttribute {
                entity: entity.clone(),
                detail: err.to_string(),
            })?;
            if let Some(table) = table {
                model = model.with_table(table);
            }
        }

        for field in &named.named {
            let Some(ident) = &field.ident else {
                continue;
            };
            let skip = field_is_skipped(&field.attrs).map_err(|err| {
                ScanError::InvalidAttribute {
                    entity: entity.clone(),
                    detail: err.to_string(),
                }
            })?;
            if skip || is_phantom(&field.ty) {
                continue;
            }
            model
                .fields
                .push(Field::new(ident.unraw().to_string(), FieldType::from_rust_type(&field.ty)));
        }

        validate(&model)?;
        Ok(model)
    }
}

/// Scan every marked item in a Rust source file.
///
/// Inline `mod` blocks extend `package` with their name. Items inside function
/// bodies and other blocks are not searched. A file that does not parse
/// yields a single error.
pub fn scan_source(text: &str, package: &str) -> Vec<Result<ModelDefinition, ScanError>> {
    let file = match syn::parse_file(text) {
        Ok(file) => file,
        Err(err) => return vec![Err(ScanError::Parse(err.to_string()))],
    };

    let mut collector = MarkedItemCollector {
        modules: vec![package.to_string()],
        results: Vec::new(),
    };
    collector.visit_file(&file);
    collector.results
}

struct MarkedItemCollector {
    modules: Vec<String>,
    results: Vec<Result<ModelDefinition, ScanError>>,
}

impl MarkedItemCollector {
    fn current_package(&self) -> String {
        self.modules.last().cloned().unwrap_or_default()
    }
}

impl<'ast> Visit<'ast> for MarkedItemCollector {
    fn visit_item(&mut self, item: &'ast Item) {
        if item_attrs(item).is_some_and(|attrs| find_marker(attrs).is_some()) {
            let scanner = SourceScanner::new(self.current_package());
            self.results.push(scanner.scan(item));
        }
        visit::visit_item(self, item);
    }

    fn visit_item_mod(&mut self, module: &'ast ItemMod) {
        let name = module.ident.unraw().to_string();
        let package = match self.modules.last() {
            Some(parent) if !parent.is_empty() => format!("{parent}::{name}"),
            _ => name,
        };
        self.modules.push(package);
        visit::visit_item_mod(self, module);
        self.modules.pop();
    }

    fn visit_block(&mut self, _: &'ast Block) {}
}

fn find_marker(attrs: &[Attribute]) -> Option<&Attribute> {
    attrs.iter().find(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == MARKER)
    })
}

fn parse_table(attr: &Attribute) -> syn::Result<Option<String>> {
    let Meta::List(_) = &attr.meta else {
        return Ok(None);
    };
    let mut table = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("table") {
            let value: LitStr = meta.value()?.parse()?;
            table = Some(value.value());
            Ok(())
        } else {
            Err(meta.error("unknown dynamic_model argument, expected `table`"))
        }
    })?;
    Ok(table)
}

fn field_is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs {
        let is_marker = attr
            .path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == MARKER);
        if !is_marker || !matches!(attr.meta, Meta::List(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown dynamic_model field option, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn is_phantom(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData"),
        _ => false,
    }
}

fn item_attrs(item: &Item) -> Option<&[Attribute]> {
    match item {
        Item::Struct(item) => Some(&item.attrs),
        Item::Enum(item) => Some(&item.attrs),
        Item::Union(item) => Some(&item.attrs),
        Item::Type(item) => Some(&item.attrs),
        Item::Trait(item) => Some(&item.attrs),
        Item::Fn(item) => Some(&item.attrs),
        Item::Const(item) => Some(&item.attrs),
        Item::Static(item) => Some(&item.attrs),
        _ => None,
    }
}

fn item_name(item: &Item) -> String {
    match item {
        Item::Struct(item) => item.ident.to_string(),
        Item::Enum(item) => item.ident.to_string(),
        Item::Union(item) => item.ident.to_string(),
        Item::Type(item) => item.ident.to_string(),
        Item::Trait(item) => item.ident.to_string(),
        Item::Fn(item) => item.sig.ident.to_string(),
        Item::Const(item) => item.ident.to_string(),
        Item::Static(item) => item.ident.to_string(),
        Item::Mod(item) => item.ident.to_string(),
        _ => "<item>".to_string(),
    }
}
