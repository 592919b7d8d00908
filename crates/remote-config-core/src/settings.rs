//! Manager settings
//!
//! Stores non-sensitive configuration in a plain `settings.json` file next to
//! the durable store. The defaults are the interop constants shared with
//! existing stores, so a missing file is the normal case.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

/// Keychain service name under which per-host passwords are stored
pub const DEFAULT_SERVICE_NAME: &str = "nuclide.remoteProjectConfig";

/// Prefix of durable record keys; the host or IP alias follows it
pub const DEFAULT_KEY_PREFIX: &str = "nuclide-connections:";

/// Settings for [`crate::ConnectionConfigManager`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerSettings {
    /// Keychain service name
    pub service_name: String,
    /// Durable record key prefix
    pub key_prefix: String,
    /// Also delete the keychain secret when a record is cleared
    pub purge_secret_on_clear: bool,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            purge_secret_on_clear: false,
        }
    }
}

impl ManagerSettings {
    /// Durable store key for a host name or IP alias
    pub fn record_key(&self, host: &str) -> String {
        format!("{}{}", self.key_prefix, host)
    }
}

/// Settings file manager
pub struct SettingsManager {
    settings_file: PathBuf,
    settings: ManagerSettings,
}

impl SettingsManager {
    /// Load settings from `storage_dir`, falling back to defaults
    pub fn new(storage_dir: &Path) -> Result<Self> {
        let settings_file = storage_dir.join("settings.json");
        let settings = Self::load_from_file(&settings_file)?;

        Ok(Self {
            settings_file,
            settings,
        })
    }

    fn load_from_file(path: &Path) -> Result<ManagerSettings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(ManagerSettings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: ManagerSettings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub async fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.settings)?;

        let temp_path = self.settings_file.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await?;
        tokio::fs::rename(&temp_path, &self.settings_file).await?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Get mutable settings
    pub fn get_mut(&mut self) -> &mut ManagerSettings {
        &mut self.settings
    }

    /// Consume the manager, keeping the settings
    pub fn into_settings(self) -> ManagerSettings {
        self.settings
    }
}
