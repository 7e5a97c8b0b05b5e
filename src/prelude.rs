//! Prelude module for convenient imports.
//!
//! ```rust
//! use dynamic_mapper::prelude::*;
//! ```
//!
//! Brings in the scanners, the generators and their artifacts, the emitters
//! and the run loop.

pub use crate::{
    config::{GeneratorConfig, RowAccess},
    dynamic_model,
    emit::{ArtifactEmitter, FileEmitter, MemoryEmitter},
    error::{DynamicMapperError, DynamicMapperResult, EmitError, ScanError},
    generate::{
        Artifact, GeneratedMapperInterface, GeneratedTableDescriptor, MapperOperation, ResultMap,
        build_descriptor, build_mapper, build_result_map,
    },
    model::{ColumnBinding, Field, ModelDefinition},
    render::SourceUnit,
    run::{Diagnostic, DiagnosticKind, GenerationReport, Generator, run},
    scan::{ModelScanner, SchemaScanner, SourceScanner, scan_schema, scan_source},
    types::{FieldType, JdbcType},
};
