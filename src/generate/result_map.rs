use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::{
    config::GeneratorConfig,
    model::{ColumnBinding, ModelDefinition},
};

/// Column-to-property mapping used by raw select statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMap {
    /// `<Entity><result_map_suffix>`
    pub id: String,
    pub bindings: Vec<ColumnBinding>,
}

pub fn build_result_map(model: &ModelDefinition, config: &GeneratorConfig) -> ResultMap {
    ResultMap {
        id: format!("{}{}", model.entity, config.result_map_suffix),
        bindings: model.column_bindings(),
    }
}

impl ResultMap {
    pub fn id_binding(&self) -> Option<&ColumnBinding> {
        self.bindings.iter().find(|binding| binding.primary_key)
    }

    /// Const expression building the runtime's `ResultMap` value.
    pub fn to_expr(&self, runtime: &TokenStream) -> TokenStream {
        let id = &self.id;
        let columns = self.bindings.iter().map(|b| &b.column);
        let properties = self.bindings.iter().map(|b| &b.field);
        let jdbc_types = self
            .bindings
            .iter()
            .map(|b| format_ident!("{}", b.jdbc_type.variant_name()));
        let primary_keys = self.bindings.iter().map(|b| b.primary_key);

        quote! {
            #runtime::ResultMap {
                id: #id,
                results: &[
                    #(
                        #runtime::ResultMapping {
                            column: #columns,
                            property: #properties,
                            jdbc_type: #runtime::JdbcType::#jdbc_types,
                            id: #primary_keys,
                        },
                    )*
                ],
            }
        }
    }
}
