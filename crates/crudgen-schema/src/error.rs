//! Parse and normalization error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or parsing schema text.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The text does not follow `model <Name> { <field-line>* }`.
    #[error(
        "Malformed schema at line {line}{}: {message}",
        .model.as_ref().map(|m| format!(" in model '{m}'")).unwrap_or_default()
    )]
    Malformed {
        line: usize,
        message: String,
        /// Model being parsed when the error was found, if any.
        model: Option<String>,
    },

    /// Non-empty input that declares no `model` block.
    #[error("No models found in schema")]
    NoModelsFound,

    /// The schema file could not be read.
    #[error("Failed to read schema file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
            model: None,
        }
    }

    pub(crate) fn in_model(line: usize, model: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
            model: Some(model.to_string()),
        }
    }

    /// Offending model name, when the error is tied to one.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Malformed { model, .. } => model.as_deref(),
            Self::NoModelsFound | Self::Read { .. } => None,
        }
    }

    /// One-line remediation hint for the user.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Self::Malformed { line, .. } => format!(
                "fix the schema near line {line}; models look like `model Name {{ id Int name String }}`"
            ),
            Self::NoModelsFound => {
                "declare at least one `model Name { id Int }` block, or point --schema at the right file"
                    .to_string()
            }
            Self::Read { path, .. } => {
                format!("check that '{}' exists and is readable", path.display())
            }
        }
    }
}

/// Errors from deriving a `NormalizedModel`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// No field literally named `id`.
    #[error("Model '{model}' has no primary key field named 'id'")]
    NoPrimaryKey { model: String },

    /// The `id` field exists but cannot serve as a generated identifier.
    #[error("Model '{model}' has an unsupported primary key type '{type_hint}'")]
    UnsupportedPrimaryKey { model: String, type_hint: String },
}

impl NormalizeError {
    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::NoPrimaryKey { model } | Self::UnsupportedPrimaryKey { model, .. } => model,
        }
    }

    /// One-line remediation hint for the user.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Self::NoPrimaryKey { model } => {
                format!("add an `id Int @id @default(autoincrement())` field to model '{model}'")
            }
            Self::UnsupportedPrimaryKey { model, .. } => format!(
                "declare `id` on model '{model}' as a required Int, BigInt or String"
            ),
        }
    }
}
