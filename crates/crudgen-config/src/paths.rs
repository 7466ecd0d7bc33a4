//! Input and output locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const LEDGER_SUFFIX: &str = ".ledger.toml";

fn default_schema() -> PathBuf {
    PathBuf::from("prisma/schema.prisma")
}

fn default_out() -> PathBuf {
    PathBuf::from("lib/generated/services.ts")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Schema file to read.
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    /// Generated artifact to merge into.
    #[serde(default = "default_out")]
    pub out: PathBuf,

    /// Hash ledger. Unset means `<out>.ledger.toml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            out: default_out(),
            ledger: None,
        }
    }
}

impl PathsConfig {
    /// Ledger location, falling back to one next to the artifact.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger
            .clone()
            .unwrap_or_else(|| ledger_beside(&self.out))
    }
}

fn ledger_beside(out: &Path) -> PathBuf {
    let mut name = out.as_os_str().to_os_string();
    name.push(LEDGER_SUFFIX);
    PathBuf::from(name)
}
