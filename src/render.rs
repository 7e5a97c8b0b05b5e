//! Token helpers shared by the generators and the source-unit type they
//! produce.

use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Ident, Path, Type};

use crate::types::FieldType;

/// Header written at the top of every generated unit.
pub const GENERATED_HEADER: &str = "// @generated by dynamic_mapper. Do not edit by hand.";

/// Names that can never be used as identifiers, not even in raw form.
const RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Whether `name` can be written as a Rust identifier (raw form allowed).
///
/// Accepts exactly the names [`ident`] can build.
pub fn is_valid_identifier(name: &str) -> bool {
    !RESERVED.contains(&name) && parse_ident(name).is_some()
}

/// Identifier for a validated name; keywords come out in raw form (`r#type`).
///
/// Names rejected by [`is_valid_identifier`] render as a `compile_error!` so an
/// unvalidated model never panics the generator.
pub fn ident(name: &str) -> TokenStream {
    match parse_ident(name) {
        Some(ident) if !RESERVED.contains(&name) => ident.into_token_stream(),
        _ => syn::Error::new(
            Span::call_site(),
            format!("`{name}` is not a valid Rust identifier"),
        )
        .to_compile_error(),
    }
}

fn parse_ident(name: &str) -> Option<Ident> {
    if name.is_empty() || name.starts_with("r#") {
        return None;
    }
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .ok()
}

/// Tokens for a `::`-separated path. An empty path yields no tokens.
pub fn path_tokens(path: &str) -> TokenStream {
    if path.is_empty() {
        return TokenStream::new();
    }
    match syn::parse_str::<Path>(path) {
        Ok(path) => path.into_token_stream(),
        Err(err) => err.to_compile_error(),
    }
}

/// `prefix::name`, or just `name` when the prefix is empty.
pub fn qualified(prefix: &str, name: TokenStream) -> TokenStream {
    if prefix.is_empty() {
        name
    } else {
        let prefix = path_tokens(prefix);
        quote!(#prefix::#name)
    }
}

pub fn type_tokens(ty: &FieldType) -> TokenStream {
    match syn::parse_str::<Type>(&ty.rust_type()) {
        Ok(ty) => ty.into_token_stream(),
        Err(err) => err.to_compile_error(),
    }
}

pub fn is_valid_path(path: &str) -> bool {
    path.is_empty() || syn::parse_str::<Path>(path).is_ok()
}

pub fn is_valid_type(ty: &FieldType) -> bool {
    syn::parse_str::<Type>(&ty.rust_type()).is_ok()
}

/// One generated source file, ready to hand to an emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Module path of the model the unit was generated for.
    pub package: String,
    /// Symbolic artifact name (`PersonTableSupport`).
    pub name: String,
    /// File name the unit should be written to (`person_table_support.rs`).
    pub file_name: String,
    pub body: String,
}

impl SourceUnit {
    pub fn new(package: &str, name: &str, file_name: String, tokens: TokenStream) -> Self {
        Self {
            package: package.to_string(),
            name: name.to_string(),
            file_name,
            body: format!("{GENERATED_HEADER}\n{tokens}\n"),
        }
    }

    /// Parse the body back into a syntax tree.
    pub fn parse(&self) -> syn::Result<syn::File> {
        syn::parse_file(&self.body)
    }
}

impl fmt::Display for SourceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.package, self.name)
        }
    }
}
