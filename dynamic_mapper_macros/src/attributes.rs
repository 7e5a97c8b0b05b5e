use syn::{
    Attribute, Expr, ExprLit, Field, Lit, LitStr, Meta, Token, punctuated::Punctuated,
    spanned::Spanned, visit_mut::VisitMut,
};

use crate::errors::MarkerError;

pub const MARKER: &str = "dynamic_model";

/// Arguments accepted by `#[dynamic_model(...)]` on a struct.
#[derive(Debug, Default)]
pub struct ModelArgs {
    pub table: Option<LitStr>,
}

impl ModelArgs {
    pub fn parse(args: Punctuated<Meta, Token![,]>) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for meta in args {
            let Meta::NameValue(name_value) = meta else {
                let span = meta.span();
                let found = quote::quote!(#meta).to_string();
                return Err(MarkerError::UnknownModelArgument(found).into_syn(span));
            };

            if !name_value.path.is_ident("table") {
                let path = &name_value.path;
                let found = quote::quote!(#path).to_string();
                return Err(MarkerError::UnknownModelArgument(found).into_syn(path.span()));
            }

            match name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => parsed.table = Some(lit),
                other => return Err(MarkerError::TableNotString.into_syn(other.span())),
            }
        }
        Ok(parsed)
    }
}

/// Removes field level `#[dynamic_model(skip)]` markers so the struct compiles
/// as plain Rust, collecting any malformed options it meets.
#[derive(Default)]
pub struct FieldMarkerStripper {
    pub errors: Vec<syn::Error>,
}

impl FieldMarkerStripper {
    fn check(&mut self, attr: &Attribute) {
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                Ok(())
            } else {
                let path = &meta.path;
                let found = quote::quote!(#path).to_string();
                Err(MarkerError::UnknownFieldOption(found).into_syn(path.span()))
            }
        });
        if let Err(err) = result {
            self.errors.push(err);
        }
    }
}

/// Matches `#[dynamic_model]` as well as qualified forms such as
/// `#[dynamic_mapper::dynamic_model]`.
fn is_marker(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == MARKER)
}

impl VisitMut for FieldMarkerStripper {
    fn visit_field_mut(&mut self, field: &mut Field) {
        let (markers, kept): (Vec<_>, Vec<_>) = field
            .attrs
            .drain(..)
            .partition(is_marker);
        for marker in &markers {
            self.check(marker);
        }
        field.attrs = kept;
    }
}
