use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Fields, Item, Meta, Token, parse_macro_input, punctuated::Punctuated, visit_mut::VisitMut,
};

use crate::{
    attributes::{FieldMarkerStripper, ModelArgs},
    errors::MarkerError,
};

mod attributes;
mod errors;

/// Marks a struct as a dynamic model.
///
/// The attribute does not generate code by itself. It validates its
/// arguments and leaves the struct in place so the `dynamic_mapper` scanner
/// (usually run from a build script) can pick it up and emit the
/// `<Model>TableSupport` module and `<Model>Mapper` trait.
///
/// # Attributes
///
/// - `#[dynamic_model]` - table name derived from the struct name
///   (`DynamicModel` -> `dynamic_model`)
/// - `#[dynamic_model(table = "people")]` - explicit table name; an empty
///   string means "not set"
/// - `#[dynamic_model(skip)]` on a field - the field is not a column
///
/// # Examples
///
/// ```
/// use dynamic_mapper_macros::dynamic_model;
///
/// #[dynamic_model(table = "people")]
/// pub struct Person {
///     pub id: i32,
///     pub first_name: String,
///     #[dynamic_model(skip)]
///     pub display_cache: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn dynamic_model(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated<Meta, Token![,]>::parse_terminated);
    let args = match ModelArgs::parse(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    if let Some(table) = &args.table
        && table.value().contains(char::is_whitespace)
    {
        return MarkerError::TableHasWhitespace
            .into_syn(table.span())
            .to_compile_error()
            .into();
    }

    let item = parse_macro_input!(item as Item);
    let mut model = match item {
        Item::Struct(model) if matches!(model.fields, Fields::Named(_)) => model,
        other => {
            return syn::Error::new_spanned(other, MarkerError::IncorrectModelType.to_string())
                .to_compile_error()
                .into();
        }
    };

    let mut stripper = FieldMarkerStripper::default();
    stripper.visit_item_struct_mut(&mut model);
    let errors = stripper.errors.iter().map(syn::Error::to_compile_error);

    quote! {
        #model
        #(#errors)*
    }
    .into()
}
