//! Engine settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECS: u64 = 4 * 60;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Per-operation time limits, in seconds.
///
/// A call that exceeds its limit fails like any other remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_timeout")]
    pub create_timeout: u64,
    #[serde(default = "default_timeout")]
    pub read_timeout: u64,
    #[serde(default = "default_timeout")]
    pub delete_timeout: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            create_timeout: default_timeout(),
            read_timeout: default_timeout(),
            delete_timeout: default_timeout(),
        }
    }
}

impl EngineConfig {
    pub fn create_timeout(&self) -> Duration {
        Duration::from_secs(self.create_timeout)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout)
    }
}
