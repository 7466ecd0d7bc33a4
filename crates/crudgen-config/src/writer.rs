//! Merge behaviour settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_lock_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WriterConfig {
    /// Remove unedited blocks whose model is gone from the schema.
    #[serde(default)]
    pub prune_orphans: bool,

    /// Seconds to wait for another run to release the ledger lock.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            prune_orphans: false,
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl WriterConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }
}
