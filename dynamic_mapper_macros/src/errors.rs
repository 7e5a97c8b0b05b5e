use proc_macro2::Span;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("dynamic_model requires a struct with named fields")]
    IncorrectModelType,
    #[error("expected `table = \"...\"`, found `{0}`")]
    UnknownModelArgument(String),
    #[error("the table override must be a string literal")]
    TableNotString,
    #[error("the table override must not contain whitespace")]
    TableHasWhitespace,
    #[error("unknown field option `{0}`; only `skip` is supported")]
    UnknownFieldOption(String),
}

impl MarkerError {
    pub fn into_syn(self, span: Span) -> syn::Error {
        syn::Error::new(span, self.to_string())
    }
}
