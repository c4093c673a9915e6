//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default per-call deadline for store operations
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default number of recent messages a context provider shows
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Top-level configuration (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Deadline applied to each store call (optional; default 30s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Contact stores and context providers, in priority order
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

/// One configured service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServiceConfig {
    /// A directory of `.vcf` files acting as one address book account
    Vdir(VdirServiceConfig),
    /// A JMAP mail account used for recent-message context
    Jmap(JmapServiceConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VdirServiceConfig {
    /// Account name shown in messages (optional; defaults to the path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: PathBuf,
}

impl VdirServiceConfig {
    pub fn account_name(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JmapServiceConfig {
    pub session_endpoint: String,
    pub token: String,
    /// Messages to show per contact (optional; default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
}

impl JmapServiceConfig {
    pub fn max_results(&self) -> usize {
        self.max_results
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS)
    }
}
