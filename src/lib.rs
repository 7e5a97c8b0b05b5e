//! # Dynamic Mapper
//!
//! Source generator for simple single-table models. Each model yields two
//! Rust artifacts that target a MyBatis-style dynamic SQL runtime:
//!
//! - a **table descriptor** (`<Entity>TableSupport`): a module with the table
//!   name, one typed column per field and a shared instance
//! - a **mapper trait** (`<Entity>Mapper`): insert and select operations, plus
//!   update/delete by primary key when the model has an `id` field
//!
//! ## Features
//!
//! - **Two front ends**: `#[dynamic_model]` structs in Rust source, or
//!   `[[model]]` entries in a TOML schema
//! - **Best effort**: a bad model or a failed write is reported and the rest
//!   of the run carries on
//! - **Deterministic**: identical models render byte-identical units
//!
//! ## Quick Start
//!
//! ```rust
//! use dynamic_mapper::prelude::*;
//!
//! let inputs = scan_source(
//!     r#"
//!     #[dynamic_model]
//!     pub struct Person {
//!         pub id: i32,
//!         pub first_name: String,
//!     }
//!     "#,
//!     "crate::models",
//! );
//!
//! let mut emitter = MemoryEmitter::new();
//! let report = run(inputs, &GeneratorConfig::default(), &mut emitter);
//!
//! assert!(report.is_clean());
//! assert!(emitter.get("crate::models::PersonTableSupport").is_some());
//! assert!(emitter.get("crate::models::PersonMapper").is_some());
//! ```
//!
//! The generated code names the runtime by path (`::dynamic_sql` unless
//! [`GeneratorConfig::runtime_path`](config::GeneratorConfig::runtime_path)
//! says otherwise); this crate never links against it.

pub mod build;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod model;
pub mod naming;
pub mod prelude;
pub mod render;
pub mod run;
pub mod scan;
pub mod types;

pub use dynamic_mapper_macros::dynamic_model;
