//! Hand-maintained head of a freshly created artifact.
//!
//! Written once, when the target file does not exist yet. After that it is
//! ordinary user code: the writer never compares or rewrites it. Everything
//! the generated blocks depend on lives in the runtime block instead.

const NOTICE: &str = "\
// Model services generated by crudgen.
// Blocks between `// <crudgen:begin Name>` and `// <crudgen:end Name>` are
// regenerated from the schema. Hand edits inside a block are reported as
// conflicts and never overwritten; code outside the blocks is left alone.
";

/// Header comment for a new artifact.
#[must_use]
pub fn emit_preamble() -> String {
    NOTICE.to_string()
}
