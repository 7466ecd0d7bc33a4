//! # crudgen-core
//!
//! Core value types shared by every crudgen crate.
//!
//! - Parsed schema entities (`Schema`, `Model`, `Field`, `EnumDecl`)
//! - The normalized, generation-ready view of a model (`NormalizedModel`)
//! - Generated output units and their content digests (`GeneratedUnit`, `ContentHash`)
//! - The per-run summary returned by the writer (`GenerationReport`)
//! - Cross-cutting error types
//!
//! All values are created fresh per run and never mutated after construction.

pub mod entities;
pub mod errors;
pub mod hash;
pub mod report;

pub use entities::{
    EnumDecl, Field, FieldKind, GeneratedUnit, IdStrategy, Model, NormalizedField,
    NormalizedModel, ScalarType, Schema,
};
pub use errors::CoreError;
pub use hash::ContentHash;
pub use report::GenerationReport;
