use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;

use super::{Artifact, build_descriptor, build_result_map, result_map::ResultMap};
use crate::{
    config::{GeneratorConfig, RowAccess},
    model::{ColumnBinding, Field, ModelDefinition},
    naming::getter_name,
    render::{ident, path_tokens, qualified, type_tokens},
};

/// One member of a generated mapper trait, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperOperation {
    Insert { bindings: Vec<ColumnBinding> },
    SelectManyByStatement,
    SelectOneByStatement,
    SelectOne,
    FindById { id: Field },
    SelectMany,
    FindAll,
    Update,
    UpdateByPrimaryKey { id: Field, assignments: Vec<Field> },
    Delete,
    DeleteByPrimaryKey { id: Field },
}

impl MapperOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::SelectManyByStatement => "select_many_by_statement",
            Self::SelectOneByStatement => "select_one_by_statement",
            Self::SelectOne => "select_one",
            Self::FindById { .. } => "find_by_id",
            Self::SelectMany => "select_many",
            Self::FindAll => "find_all",
            Self::Update => "update",
            Self::UpdateByPrimaryKey { .. } => "update_by_primary_key",
            Self::Delete => "delete",
            Self::DeleteByPrimaryKey { .. } => "delete_by_primary_key",
        }
    }

    /// Raw statement and completer passthroughs, marked `#[deprecated]`.
    pub fn is_legacy(&self) -> bool {
        matches!(
            self,
            Self::SelectManyByStatement | Self::SelectOneByStatement | Self::Update | Self::Delete
        )
    }

    pub fn requires_identity(&self) -> bool {
        matches!(
            self,
            Self::FindById { .. }
                | Self::Update
                | Self::UpdateByPrimaryKey { .. }
                | Self::Delete
                | Self::DeleteByPrimaryKey { .. }
        )
    }
}

/// CRUD mapper trait for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMapperInterface {
    /// `<Entity><mapper_suffix>`
    pub name: String,
    pub package: String,
    /// Entity type the mapper reads and writes.
    pub row_type: String,
    /// Module name of the descriptor the mapper refers to.
    pub descriptor_module: String,
    /// Static instance inside the descriptor module.
    pub descriptor_instance: String,
    /// Field names selected by every query, in declaration order.
    pub select_list: Vec<String>,
    pub result_map: ResultMap,
    pub operations: Vec<MapperOperation>,
}

pub fn build_mapper(model: &ModelDefinition, config: &GeneratorConfig) -> GeneratedMapperInterface {
    let descriptor = build_descriptor(model, config);
    let identity = model.identity_field().cloned();

    let mut operations = vec![
        MapperOperation::Insert {
            bindings: model.column_bindings(),
        },
        MapperOperation::SelectManyByStatement,
        MapperOperation::SelectOneByStatement,
        MapperOperation::SelectOne,
    ];
    if let Some(id) = &identity {
        operations.push(MapperOperation::FindById { id: id.clone() });
    }
    operations.extend([MapperOperation::SelectMany, MapperOperation::FindAll]);

    if let Some(id) = identity {
        let assignments = model
            .fields
            .iter()
            .filter(|field| !field.is_identity())
            .cloned()
            .collect();
        operations.extend([
            MapperOperation::Update,
            MapperOperation::UpdateByPrimaryKey {
                id: id.clone(),
                assignments,
            },
            MapperOperation::Delete,
            MapperOperation::DeleteByPrimaryKey { id },
        ]);
    }

    GeneratedMapperInterface {
        name: format!("{}{}", model.entity, config.mapper_suffix),
        package: model.package.clone(),
        row_type: model.entity.clone(),
        descriptor_instance: descriptor.static_name(),
        descriptor_module: descriptor.module_name,
        select_list: model.fields.iter().map(|field| field.name.clone()).collect(),
        result_map: build_result_map(model, config),
        operations,
    }
}

impl GeneratedMapperInterface {
    pub fn operation(&self, name: &str) -> Option<&MapperOperation> {
        self.operations.iter().find(|operation| operation.name() == name)
    }

    pub fn operation_names(&self) -> Vec<&'static str> {
        self.operations.iter().map(MapperOperation::name).collect()
    }
}

/// Paths shared by every operation body.
struct Scope {
    runtime: TokenStream,
    row: TokenStream,
    table_support: TokenStream,
    instance: TokenStream,
    row_access: RowAccess,
}

impl Scope {
    fn column(&self, field: &str) -> TokenStream {
        let table_support = &self.table_support;
        let field = ident(field);
        quote!(#table_support::#field())
    }

    fn read(&self, field: &str) -> TokenStream {
        match self.row_access {
            RowAccess::Field => {
                let field = ident(field);
                quote!(row.#field.clone())
            }
            RowAccess::Getter => {
                let getter = ident(&getter_name(field));
                quote!(row.#getter())
            }
        }
    }

    fn operation(&self, operation: &MapperOperation) -> TokenStream {
        let Self {
            runtime,
            row,
            instance,
            ..
        } = self;

        match operation {
            MapperOperation::Insert { bindings } => {
                let columns = bindings.iter().map(|b| self.column(&b.field));
                let properties = bindings.iter().map(|b| &b.field);
                quote! {
                    fn insert(&self, row: &#row) -> u64 {
                        #runtime::utils::insert(
                            |provider| self.insert_statement(provider),
                            row,
                            &*#instance,
                            |c| c #(.map(#columns).to_property(#properties))*,
                        )
                    }
                }
            }
            MapperOperation::SelectManyByStatement => quote! {
                #[deprecated(note = "use `select_many` with a completer")]
                fn select_many_by_statement(
                    &self,
                    select_statement: #runtime::SelectStatementProvider,
                ) -> ::std::vec::Vec<#row>;
            },
            MapperOperation::SelectOneByStatement => quote! {
                #[deprecated(note = "use `select_one` with a completer")]
                fn select_one_by_statement(
                    &self,
                    select_statement: #runtime::SelectStatementProvider,
                ) -> ::std::option::Option<#row>;
            },
            MapperOperation::SelectOne => quote! {
                fn select_one(
                    &self,
                    completer: #runtime::SelectDslCompleter,
                ) -> ::std::option::Option<#row> {
                    #runtime::utils::select_one(
                        |statement| self.select_one_by_statement(statement),
                        Self::select_list(),
                        &*#instance,
                        completer,
                    )
                }
            },
            MapperOperation::FindById { id } => {
                let id_type = type_tokens(&id.ty);
                let id_column = self.column(&id.name);
                quote! {
                    fn find_by_id(&self, entity_id: #id_type) -> ::std::option::Option<#row> {
                        self.select_one(#runtime::SelectDslCompleter::new(move |c| {
                            c.and_where(#id_column, #runtime::SqlBuilder::is_equal_to(entity_id))
                        }))
                    }
                }
            }
            MapperOperation::SelectMany => quote! {
                fn select_many(&self, completer: #runtime::SelectDslCompleter) -> ::std::vec::Vec<#row> {
                    #runtime::utils::select_list(
                        |statement| self.select_many_by_statement(statement),
                        Self::select_list(),
                        &*#instance,
                        completer,
                    )
                }
            },
            MapperOperation::FindAll => quote! {
                fn find_all(&self) -> ::std::vec::Vec<#row> {
                    self.select_many(#runtime::SelectDslCompleter::all_rows())
                }
            },
            MapperOperation::Update => quote! {
                #[deprecated(note = "use `update_by_primary_key`")]
                fn update(&self, completer: #runtime::UpdateDslCompleter) -> u64 {
                    #runtime::utils::update(
                        |provider| self.update_statement(provider),
                        &*#instance,
                        completer,
                    )
                }
            },
            MapperOperation::UpdateByPrimaryKey { id, assignments } => {
                let columns = assignments.iter().map(|f| self.column(&f.name));
                let values = assignments.iter().map(|f| self.read(&f.name));
                let id_column = self.column(&id.name);
                let id_value = self.read(&id.name);
                quote! {
                    fn update_by_primary_key(&self, row: &#row) -> u64 {
                        self.update(#runtime::UpdateDslCompleter::new(move |c| {
                            c #(.set(#columns).equal_to_when_present(#values))*
                                .and_where(#id_column, #runtime::SqlBuilder::is_equal_to(#id_value))
                        }))
                    }
                }
            }
            MapperOperation::Delete => quote! {
                #[deprecated(note = "use `delete_by_primary_key`")]
                fn delete(&self, completer: #runtime::DeleteDslCompleter) -> u64 {
                    #runtime::utils::delete_from(
                        |provider| self.delete_statement(provider),
                        &*#instance,
                        completer,
                    )
                }
            },
            MapperOperation::DeleteByPrimaryKey { id } => {
                let id_type = type_tokens(&id.ty);
                let id_column = self.column(&id.name);
                quote! {
                    fn delete_by_primary_key(&self, record_id: #id_type) -> u64 {
                        self.delete(#runtime::DeleteDslCompleter::new(move |c| {
                            c.and_where(#id_column, #runtime::SqlBuilder::is_equal_to(record_id))
                        }))
                    }
                }
            }
        }
    }
}

impl Artifact for GeneratedMapperInterface {
    fn name(&self) -> &str {
        &self.name
    }

    fn package(&self) -> &str {
        &self.package
    }

    fn file_name(&self) -> String {
        format!("{}.rs", self.name.to_snake_case())
    }

    fn to_tokens(&self, config: &GeneratorConfig) -> TokenStream {
        let runtime = path_tokens(&config.runtime_path);
        let table_support = qualified(&self.package, ident(&self.descriptor_module));
        let instance = ident(&self.descriptor_instance);
        let scope = Scope {
            row: qualified(&self.package, ident(&self.row_type)),
            instance: quote!(#table_support::#instance),
            table_support,
            runtime,
            row_access: config.row_access,
        };

        let Scope { runtime, row, .. } = &scope;
        let name = ident(&self.name);
        let result_map = self.result_map.to_expr(runtime);
        let select_list = self.select_list.iter().map(|field| scope.column(field));
        let operations = self.operations.iter().map(|operation| scope.operation(operation));

        quote! {
            #[allow(deprecated)]
            pub trait #name:
                #runtime::CommonCountMapper
                + #runtime::CommonInsertMapper<#row>
                + #runtime::CommonUpdateMapper
                + #runtime::CommonDeleteMapper
            {
                const RESULT_MAP: #runtime::ResultMap = #result_map;

                fn select_list() -> ::std::vec::Vec<#runtime::BasicColumn> {
                    ::std::vec![#(#runtime::BasicColumn::from(#select_list)),*]
                }

                #(#operations)*
            }
        }
    }
}
