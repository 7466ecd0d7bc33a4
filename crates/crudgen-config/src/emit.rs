//! Generated-code settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_client_ident() -> String {
    "prisma".to_string()
}

fn default_client_import() -> String {
    r#"import { prisma } from "@/lib/prisma";"#.to_string()
}

fn default_prisma_module() -> String {
    "@prisma/client".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmitConfig {
    /// Identifier of the ORM client instance used by every operation.
    #[serde(default = "default_client_ident")]
    pub client_ident: String,

    /// Import line that brings `client_ident` into scope. Only used when the
    /// artifact is first created.
    #[serde(default = "default_client_import")]
    pub client_import: String,

    /// Module the `Prisma` namespace is imported from.
    #[serde(default = "default_prisma_module")]
    pub prisma_module: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            client_ident: default_client_ident(),
            client_import: default_client_import(),
            prisma_module: default_prisma_module(),
        }
    }
}

impl EmitConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !is_js_identifier(&self.client_ident) {
            return Err(ConfigError::InvalidValue {
                field: "emit.client_ident".to_string(),
                reason: format!("'{}' is not a JavaScript identifier", self.client_ident),
            });
        }
        if self.prisma_module.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "emit.prisma_module".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn is_js_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EmitConfig::default();
        assert_eq!(config.client_ident, "prisma");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_identifier_client() {
        let config = EmitConfig {
            client_ident: "my-client".to_string(),
            ..EmitConfig::default()
        };
        let err = config.validate().expect_err("should fail");
        assert!(err.to_string().contains("emit.client_ident"));
    }

    #[test]
    fn accepts_dollar_and_underscore() {
        assert!(is_js_identifier("$db"));
        assert!(is_js_identifier("_prisma2"));
        assert!(!is_js_identifier("2db"));
        assert!(!is_js_identifier(""));
    }
}
