//! Artifact generators.
//!
//! Each generator derives a structured artifact from a [`ModelDefinition`]
//! and renders it to tokens with `quote`. Nothing is written to disk here;
//! a rendered [`SourceUnit`] is handed to an emitter by the run loop.
//!
//! [`ModelDefinition`]: crate::model::ModelDefinition

use proc_macro2::TokenStream;

use crate::{config::GeneratorConfig, render::SourceUnit};

pub mod descriptor;
pub mod mapper;
pub mod result_map;

pub use descriptor::{GeneratedTableDescriptor, TABLE_FIELD, build_descriptor};
pub use mapper::{GeneratedMapperInterface, MapperOperation, build_mapper};
pub use result_map::{ResultMap, build_result_map};

/// A generated artifact that renders to one source unit.
pub trait Artifact {
    /// Symbolic artifact name (`PersonTableSupport`, `PersonMapper`).
    fn name(&self) -> &str;

    /// Module path the artifact belongs in.
    fn package(&self) -> &str;

    fn file_name(&self) -> String;

    fn to_tokens(&self, config: &GeneratorConfig) -> TokenStream;

    fn render(&self, config: &GeneratorConfig) -> SourceUnit {
        SourceUnit::new(
            self.package(),
            self.name(),
            self.file_name(),
            self.to_tokens(config),
        )
    }
}
