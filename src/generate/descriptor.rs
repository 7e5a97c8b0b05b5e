use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::Artifact;
use crate::{
    config::GeneratorConfig,
    model::{ColumnBinding, ModelDefinition},
    naming::{to_instance_name, to_static_name},
    render::{ident, path_tokens, type_tokens},
};

/// Private field of the table-model struct holding the table itself. Model
/// fields may not use this name.
pub const TABLE_FIELD: &str = "sql_table";

/// Table/column descriptor for one entity.
///
/// Renders to a module holding a table-model struct, a shared instance of it
/// and one accessor function per column:
///
/// ```ignore
/// #[allow(non_snake_case, non_upper_case_globals, dead_code, unused_imports)]
/// pub mod person_table_support {
///     use super::*;
///
///     pub struct Person {
///         sql_table: ::dynamic_sql::SqlTable,
///         pub id: ::dynamic_sql::SqlColumn<Option<i32>>,
///         pub firstName: ::dynamic_sql::SqlColumn<String>,
///     }
///
///     impl Person {
///         pub const TABLE_NAME: &'static str = "person";
///         pub fn new() -> Self { /* table.column("first_name", JdbcType::Varchar) ... */ }
///     }
///
///     pub static PERSON: ::std::sync::LazyLock<Person> = ::std::sync::LazyLock::new(Person::new);
///
///     pub fn id() -> &'static ::dynamic_sql::SqlColumn<Option<i32>> { &PERSON.id }
///     pub fn firstName() -> &'static ::dynamic_sql::SqlColumn<String> { &PERSON.firstName }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTableDescriptor {
    /// `<Entity><descriptor_suffix>`
    pub name: String,
    /// Snake-case form of `name`, used as the generated module name.
    pub module_name: String,
    pub package: String,
    pub table_name: String,
    /// `to_instance_name(entity)`; the static is its shouty snake form.
    pub instance_name: String,
    /// Name of the table-model struct, same as the entity.
    pub table_type: String,
    pub bindings: Vec<ColumnBinding>,
}

pub fn build_descriptor(model: &ModelDefinition, config: &GeneratorConfig) -> GeneratedTableDescriptor {
    let name = format!("{}{}", model.entity, config.descriptor_suffix);
    GeneratedTableDescriptor {
        module_name: name.to_snake_case(),
        name,
        package: model.package.clone(),
        table_name: model.table_name(),
        instance_name: to_instance_name(&model.entity),
        table_type: model.entity.clone(),
        bindings: model.column_bindings(),
    }
}

impl GeneratedTableDescriptor {
    /// Name of the shared `static` holding the table-model instance.
    pub fn static_name(&self) -> String {
        to_static_name(&self.instance_name)
    }

    pub fn binding(&self, field: &str) -> Option<&ColumnBinding> {
        self.bindings.iter().find(|binding| binding.field == field)
    }
}

impl Artifact for GeneratedTableDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn package(&self) -> &str {
        &self.package
    }

    fn file_name(&self) -> String {
        format!("{}.rs", self.module_name)
    }

    fn to_tokens(&self, config: &GeneratorConfig) -> TokenStream {
        let runtime = path_tokens(&config.runtime_path);
        let module = ident(&self.module_name);
        let table_type = ident(&self.table_type);
        let instance = ident(&self.static_name());
        let table_name = &self.table_name;
        let table_field = ident(TABLE_FIELD);

        let fields: Vec<_> = self.bindings.iter().map(|b| ident(&b.field)).collect();
        let value_types: Vec<_> = self.bindings.iter().map(|b| type_tokens(&b.value_type)).collect();
        let columns = self.bindings.iter().map(|b| &b.column);
        let jdbc_types = self
            .bindings
            .iter()
            .map(|b| format_ident!("{}", b.jdbc_type.variant_name()));

        quote! {
            #[allow(non_snake_case, non_upper_case_globals, dead_code, unused_imports)]
            pub mod #module {
                use super::*;

                pub struct #table_type {
                    #table_field: #runtime::SqlTable,
                    #(pub #fields: #runtime::SqlColumn<#value_types>,)*
                }

                impl #table_type {
                    pub const TABLE_NAME: &'static str = #table_name;

                    pub fn new() -> Self {
                        let table = #runtime::SqlTable::new(Self::TABLE_NAME);
                        Self {
                            #(#fields: table.column(#columns, #runtime::JdbcType::#jdbc_types),)*
                            #table_field: table,
                        }
                    }

                    pub fn table(&self) -> &#runtime::SqlTable {
                        &self.#table_field
                    }
                }

                impl ::std::default::Default for #table_type {
                    fn default() -> Self {
                        Self::new()
                    }
                }

                pub static #instance: ::std::sync::LazyLock<#table_type> =
                    ::std::sync::LazyLock::new(#table_type::new);

                #(
                    pub fn #fields() -> &'static #runtime::SqlColumn<#value_types> {
                        &#instance.#fields
                    }
                )*
            }
        }
    }
}
