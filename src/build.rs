//! Helpers for calling the generator from a `build.rs`.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     dynamic_mapper::build::generate_from_source("src/models.rs", "crate::models")
//!         .expect("model generation failed");
//! }
//!
//! // src/models.rs
//! include!(concat!(env!("OUT_DIR"), "/models/person_table_support.rs"));
//! include!(concat!(env!("OUT_DIR"), "/models/person_mapper.rs"));
//! ```
//!
//! Inputs that fail to scan or emit do not fail the build; they are printed as
//! `cargo:warning` lines.

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    config::GeneratorConfig,
    emit::FileEmitter,
    error::{DynamicMapperError, DynamicMapperResult},
    run::{GenerationReport, Generator},
    scan::{scan_schema_file, scan_source_file},
};

/// Generate artifacts for every `#[dynamic_model]` struct in `source` into
/// `OUT_DIR`, with the default configuration.
pub fn generate_from_source(
    source: impl AsRef<Path>,
    package: &str,
) -> DynamicMapperResult<GenerationReport> {
    generate_from_source_with(source, package, &GeneratorConfig::default(), out_dir()?)
}

pub fn generate_from_source_with(
    source: impl AsRef<Path>,
    package: &str,
    config: &GeneratorConfig,
    out_dir: impl Into<PathBuf>,
) -> DynamicMapperResult<GenerationReport> {
    let source = source.as_ref();
    println!("cargo:rerun-if-changed={}", source.display());
    let inputs = scan_source_file(source, package)?;
    Ok(finish(Generator::new(config.clone()).run(inputs, &mut FileEmitter::new(out_dir))))
}

/// Generate artifacts for every model of a TOML schema into `OUT_DIR`.
pub fn generate_from_schema(schema: impl AsRef<Path>) -> DynamicMapperResult<GenerationReport> {
    generate_from_schema_with(schema, &GeneratorConfig::default(), out_dir()?)
}

pub fn generate_from_schema_with(
    schema: impl AsRef<Path>,
    config: &GeneratorConfig,
    out_dir: impl Into<PathBuf>,
) -> DynamicMapperResult<GenerationReport> {
    let schema = schema.as_ref();
    println!("cargo:rerun-if-changed={}", schema.display());
    let inputs = scan_schema_file(schema)?;
    Ok(finish(Generator::new(config.clone()).run(inputs, &mut FileEmitter::new(out_dir))))
}

fn out_dir() -> DynamicMapperResult<PathBuf> {
    env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or(DynamicMapperError::MissingEnv("OUT_DIR"))
}

fn finish(report: GenerationReport) -> GenerationReport {
    for diagnostic in &report.diagnostics {
        println!("cargo:warning={diagnostic}");
    }
    report
}
