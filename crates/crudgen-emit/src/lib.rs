//! # crudgen-emit
//!
//! Turns [`NormalizedModel`](crudgen_core::NormalizedModel)s into TypeScript
//! service blocks for a Prisma-style client.
//!
//! Each block is a [`GeneratedUnit`](crudgen_core::GeneratedUnit): a record
//! interface, create/update input types, an id-coercion helper, and the five
//! operations (fetch-by-id, fetch-all, create, update, delete). Output is a
//! pure function of the model and [`EmitOptions`]: no timestamps and no
//! unordered iteration, so identical input always hashes identically.
//!
//! [`emit_runtime`] produces one more managed block, [`RUNTIME_BLOCK`], with the
//! imports and helpers the service blocks call. [`markers`] owns the begin/end
//! comment lines that delimit a block inside the target artifact; the writer
//! uses the same module to find blocks again.

pub mod markers;
mod options;
mod preamble;
mod runtime;
mod typescript;

pub use options::EmitOptions;
pub use preamble::emit_preamble;
pub use runtime::{RUNTIME_BLOCK, emit_runtime};
pub use typescript::{emit_all, emit_unit};
