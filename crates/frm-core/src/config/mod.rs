//! Configuration for frm
//!
//! Configuration lives in `config.toml` inside the config directory
//! (`$FRM_CONFIG_DIR`, else `~/.config/frm`). The interaction ledger is kept
//! alongside it.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{FrmError, Result};

pub use types::{
    Config, JmapServiceConfig, ServiceConfig, VdirServiceConfig, DEFAULT_MAX_RESULTS,
    DEFAULT_TIMEOUT_SECONDS,
};

const CONFIG_DIR: &str = "frm";
const CONFIG_FILE: &str = "config.toml";
pub const CONFIG_DIR_ENV_VAR: &str = "FRM_CONFIG_DIR";

/// Resolve the config directory, honouring the environment override
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV_VAR).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR))
        .ok_or_else(|| FrmError::Other("unable to determine config directory".to_string()))
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

impl Config {
    /// Load and validate `config.toml` from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = config_path(dir);
        let content = fs::read_to_string(&path).map_err(|e| {
            FrmError::config(
                &path,
                format!("cannot read config file ({e}); create it with your address book services"),
            )
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|e| FrmError::config(&path, e.to_string()))?;
        config.validate(&path)?;
        Ok(config)
    }

    /// Save configuration to `dir/config.toml`
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .map_err(|e| FrmError::io_operation("create config directory", dir.display(), e))?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| FrmError::Other(format!("failed to serialize config: {}", e)))?;
        let path = config_path(dir);
        fs::write(&path, content)
            .map_err(|e| FrmError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (index, service) in self.services.iter().enumerate() {
            match service {
                ServiceConfig::Vdir(vdir) if vdir.path.as_os_str().is_empty() => {
                    return Err(FrmError::config(
                        path,
                        format!("service {} (vdir) must include a path", index + 1),
                    ));
                }
                ServiceConfig::Jmap(jmap)
                    if jmap.session_endpoint.trim().is_empty() || jmap.token.trim().is_empty() =>
                {
                    return Err(FrmError::config(
                        path,
                        format!(
                            "service {} (jmap) must include session_endpoint and token",
                            index + 1
                        ),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Address book services in configured order
    pub fn contact_services(&self) -> Vec<&VdirServiceConfig> {
        self.services
            .iter()
            .filter_map(|s| match s {
                ServiceConfig::Vdir(vdir) => Some(vdir),
                _ => None,
            })
            .collect()
    }

    /// Mail services usable as context providers
    pub fn jmap_services(&self) -> Vec<&JmapServiceConfig> {
        self.services
            .iter()
            .filter_map(|s| match s {
                ServiceConfig::Jmap(jmap) => Some(jmap),
                _ => None,
            })
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}
