//! # crudgen-writer
//!
//! Merges generated blocks into a hand-maintained target file without
//! clobbering manual edits.
//!
//! - [`ArtifactDocument`]: the target text split into free text and managed blocks
//! - [`Ledger`]: persisted `model → last written hash` record (TOML)
//! - [`merge`]: the pure per-model decision (append / skip / replace / conflict)
//! - [`IdempotentWriter`]: read, merge, and atomically persist one run
//!
//! Conflicts are reported, never raised. Only I/O and corrupt-state problems
//! are errors ([`PersistenceError`]).

mod document;
mod error;
mod ledger;
mod lock;
mod merge;
mod persist;
mod writer;

pub use document::{ArtifactDocument, DocumentError};
pub use error::PersistenceError;
pub use ledger::{LEDGER_VERSION, Ledger};
pub use lock::{RunLock, lock_path_for};
pub use merge::{MergeOptions, merge};
pub use writer::{IdempotentWriter, WriteOptions};
