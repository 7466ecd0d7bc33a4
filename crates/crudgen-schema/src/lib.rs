//! # crudgen-schema
//!
//! Front half of the generation pipeline:
//!
//! - [`parse_schema`]: schema text → [`Schema`](crudgen_core::Schema) (models and enums
//!   in declaration order)
//! - [`normalize_schema`] / [`normalize_model`]: parsed models → generation-ready
//!   [`NormalizedModel`](crudgen_core::NormalizedModel)s
//!
//! Both stages are pure functions over their input. Any error aborts the run
//! before the writer is reached.
//!
//! ```
//! let schema = crudgen_schema::parse_schema("model User { id Int name String }").unwrap();
//! let models = crudgen_schema::normalize_schema(&schema).unwrap();
//! assert_eq!(models[0].accessor_name, "user");
//! ```

mod error;
mod lexer;
mod normalize;
mod parser;

pub use error::{NormalizeError, SchemaError};
pub use normalize::{accessor_name, normalize_model, normalize_schema};
pub use parser::{parse_schema, parse_schema_file};
