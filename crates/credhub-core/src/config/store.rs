//! Credential store configuration.

use serde::{Deserialize, Serialize};

/// Credential store provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider: `"postgres"` or `"memory"`.
    ///
    /// The memory provider is suitable for single-node deployments and
    /// tests only; records do not survive a restart.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// How often the background purge removes long-expired records, in hours.
    /// `0` disables the purge task.
    #[serde(default = "default_purge_interval")]
    pub purge_interval_hours: u64,
    /// Age in hours past expiry before a record becomes eligible for purge.
    #[serde(default = "default_purge_grace")]
    pub purge_grace_hours: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            purge_interval_hours: default_purge_interval(),
            purge_grace_hours: default_purge_grace(),
        }
    }
}

fn default_provider() -> String {
    "postgres".to_string()
}

fn default_purge_interval() -> u64 {
    24
}

fn default_purge_grace() -> u64 {
    72
}
