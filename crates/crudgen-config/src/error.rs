//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A config file named explicitly on the command line does not exist.
    #[error("Config file '{path}' does not exist")]
    MissingFile { path: PathBuf },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// One-line remediation hint for the user.
    #[must_use]
    pub fn hint(&self) -> String {
        match self {
            Self::Figment(_) => {
                "check crudgen.toml and CRUDGEN_* environment variables for typos".to_string()
            }
            Self::MissingFile { path } => {
                format!("create '{}' or drop the --config flag", path.display())
            }
            Self::InvalidValue { field, .. } => format!("fix '{field}' in crudgen.toml"),
        }
    }
}
