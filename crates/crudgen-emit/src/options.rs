use serde::{Deserialize, Serialize};

/// Knobs that change emitted text. Part of the determinism contract: the same
/// options and model always produce the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Identifier of the ORM client instance referenced by every operation.
    pub client_ident: String,
    /// Import line that brings `client_ident` into scope.
    pub client_import: String,
    /// Module exporting the `Prisma` namespace (error classes, `Decimal`).
    pub prisma_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            client_ident: "prisma".to_string(),
            client_import: r#"import { prisma } from "@/lib/prisma";"#.to_string(),
            prisma_module: "@prisma/client".to_string(),
        }
    }
}
