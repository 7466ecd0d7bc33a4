//! Entity structs for every stage of the generation pipeline.
//!
//! `Schema`/`Model`/`Field` are produced by the parser, `NormalizedModel` by the
//! normalizer, and `GeneratedUnit` by the emitter. All derive `Serialize` so the
//! CLI can print them.

mod model;
mod normalized;
mod unit;

pub use model::{EnumDecl, Field, Model, Schema};
pub use normalized::{FieldKind, IdStrategy, NormalizedField, NormalizedModel, ScalarType};
pub use unit::GeneratedUnit;
