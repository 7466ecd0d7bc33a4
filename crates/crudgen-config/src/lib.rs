//! # crudgen-config
//!
//! Layered configuration loading for crudgen using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CRUDGEN_*` prefix, `__` as separator)
//! 2. Project-level `crudgen.toml`, or the file passed with `--config`
//! 3. User-level `~/.config/crudgen/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags sit above all of these; the binary applies them after
//! loading.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CRUDGEN_PATHS__OUT` -> `paths.out`,
//! `CRUDGEN_EMIT__CLIENT_IDENT` -> `emit.client_ident`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use crudgen_config::CrudgenConfig;
//!
//! let config = CrudgenConfig::load().expect("config");
//! println!("schema: {}", config.paths.schema.display());
//! println!("ledger: {}", config.paths.ledger_path().display());
//! ```

mod emit;
mod error;
mod paths;
mod writer;

pub use emit::EmitConfig;
pub use error::ConfigError;
pub use paths::PathsConfig;
pub use writer::WriterConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "crudgen.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrudgenConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub emit: EmitConfig,
    #[serde(default)]
    pub writer: WriterConfig,
}

impl CrudgenConfig {
    /// Load configuration from all default sources.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `config_file` in place of the
    /// project-local `crudgen.toml` when given.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_file)?.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add
    /// providers on top.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local (or explicit) config
        match config_file {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                });
            }
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        Ok(figment.merge(Env::prefixed("CRUDGEN_").split("__")))
    }

    /// Reject values that would produce broken generated code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.emit.validate()?;
        if self.paths.out.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.out".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.paths.ledger_path() == self.paths.out {
            return Err(ConfigError::InvalidValue {
                field: "paths.ledger".to_string(),
                reason: "must differ from paths.out".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("crudgen").join("config.toml"))
    }
}
