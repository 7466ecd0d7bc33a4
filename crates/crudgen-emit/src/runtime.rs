//! Managed block with the imports and helpers every service block calls.
//!
//! It is tracked like a model block, so a file that crudgen adopts without
//! ever having created it still gets the client import, `TypeCoercionError`
//! and `isRecordNotFound`.

use crudgen_core::GeneratedUnit;

use crate::options::EmitOptions;

/// Block name of the runtime unit. `@` cannot start a model identifier, so it
/// never collides with a schema model.
pub const RUNTIME_BLOCK: &str = "@runtime";

const TEMPLATE: &str = r#"import { Prisma } from "__PRISMA_MODULE__";
__CLIENT_IMPORT__

/** Raised when a caller-supplied identifier cannot be coerced to the key type. */
export class TypeCoercionError extends Error {
  constructor(
    readonly model: string,
    readonly field: string,
    readonly received: unknown,
  ) {
    super(`${model}.${field}: cannot use ${String(received)} as an identifier`);
    this.name = "TypeCoercionError";
  }
}

function isRecordNotFound(error: unknown): boolean {
  return error instanceof Prisma.PrismaClientKnownRequestError && error.code === "P2025";
}
"#;

/// The runtime unit for the given client settings.
#[must_use]
pub fn emit_runtime(options: &EmitOptions) -> GeneratedUnit {
    let source = TEMPLATE
        .replace("__PRISMA_MODULE__", &options.prisma_module)
        .replace("__CLIENT_IMPORT__", options.client_import.trim_end());
    let unit = GeneratedUnit::new(RUNTIME_BLOCK, source);
    tracing::debug!(hash = %unit.content_hash.short(), "emitted runtime block");
    unit
}
