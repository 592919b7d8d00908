//! Connection configuration manager
//!
//! Public `get`/`set`/`clear` never fail from the caller's side: any error is
//! logged with the host and turned into "no saved configuration". The
//! `try_*` variants return the typed error instead.

use std::sync::Arc;
use tracing::{debug, error, info};

use super::codec::ConfigCodec;
use super::types::{ConnectionConfiguration, SerializableConnectionConfiguration};
use crate::crypto::account_id;
use crate::error::Result;
use crate::settings::ManagerSettings;
use crate::storage::{KeyValueStore, SecretBackend};

/// Saved connection configurations, keyed by host name or IP alias
pub struct ConnectionConfigManager {
    /// Durable record store
    store: Arc<dyn KeyValueStore>,
    /// Secret backend (shared with the codec)
    secrets: Arc<dyn SecretBackend>,
    codec: ConfigCodec,
    settings: ManagerSettings,
}

impl ConnectionConfigManager {
    /// Create a manager with default settings
    pub fn new(store: Arc<dyn KeyValueStore>, secrets: Arc<dyn SecretBackend>) -> Self {
        Self::with_settings(store, secrets, ManagerSettings::default())
    }

    /// Create a manager with custom settings
    pub fn with_settings(
        store: Arc<dyn KeyValueStore>,
        secrets: Arc<dyn SecretBackend>,
        settings: ManagerSettings,
    ) -> Self {
        let codec = ConfigCodec::with_service(secrets.clone(), settings.service_name.clone());

        debug!(
            "Connection config manager using {} and {}",
            store.backend_name(),
            secrets.backend_name()
        );

        Self {
            store,
            secrets,
            codec,
            settings,
        }
    }

    /// Current settings
    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Codec used for records
    pub fn codec(&self) -> &ConfigCodec {
        &self.codec
    }

    /// Saved configuration for `host`, or `None` if absent or unreadable
    pub async fn get_connection_config(&self, host: &str) -> Option<ConnectionConfiguration> {
        match self.try_get_connection_config(host).await {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to read connection configuration for {}: {}", host, e);
                None
            }
        }
    }

    /// Save `config` under its host and under `ip_address`
    ///
    /// Insecure configurations are not saved.
    pub async fn set_connection_config(&self, config: &ConnectionConfiguration, ip_address: &str) {
        if let Err(e) = self.try_set_connection_config(config, ip_address).await {
            error!(
                "Failed to save connection configuration for {}: {}",
                config.host, e
            );
        }
    }

    /// Remove the saved record for `host`
    pub async fn clear_connection_config(&self, host: &str) {
        if let Err(e) = self.try_clear_connection_config(host).await {
            error!("Failed to clear connection configuration for {}: {}", host, e);
        }
    }

    /// Hosts and IP aliases with a saved record, sorted
    pub async fn list_connection_hosts(&self) -> Vec<String> {
        match self.try_list_connection_hosts().await {
            Ok(hosts) => hosts,
            Err(e) => {
                error!("Failed to list connection configurations: {}", e);
                Vec::new()
            }
        }
    }

    /// Fallible form of [`Self::get_connection_config`]
    pub async fn try_get_connection_config(
        &self,
        host: &str,
    ) -> Result<Option<ConnectionConfiguration>> {
        let record = match self.read_record(host).await? {
            Some(record) => record,
            None => {
                debug!("No saved connection configuration for {}", host);
                return Ok(None);
            }
        };

        let config = self.codec.decrypt_config(&record).await?;
        Ok(Some(config))
    }

    /// Fallible form of [`Self::set_connection_config`]
    pub async fn try_set_connection_config(
        &self,
        config: &ConnectionConfiguration,
        ip_address: &str,
    ) -> Result<()> {
        if config.is_insecure() {
            debug!("Not saving insecure connection configuration for {}", config.host);
            return Ok(());
        }

        let record = self.codec.encrypt_config(config).await?;
        let json = record.to_json()?;

        // Two independent writes; a concurrent reader may see one before the other
        self.store
            .set(&self.settings.record_key(&config.host), &json)
            .await?;
        self.store
            .set(&self.settings.record_key(ip_address), &json)
            .await?;

        info!(
            "Saved connection configuration for {} ({})",
            config.host, ip_address
        );
        Ok(())
    }

    /// Fallible form of [`Self::clear_connection_config`]
    pub async fn try_clear_connection_config(&self, host: &str) -> Result<()> {
        if self.settings.purge_secret_on_clear {
            self.purge_secret(host).await?;
        }

        self.store.delete(&self.settings.record_key(host)).await?;

        info!("Cleared connection configuration for {}", host);
        Ok(())
    }

    /// Fallible form of [`Self::list_connection_hosts`]
    pub async fn try_list_connection_hosts(&self) -> Result<Vec<String>> {
        let prefix = &self.settings.key_prefix;
        let mut hosts: Vec<String> = self
            .store
            .list_keys(prefix)
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(prefix.as_str()).map(str::to_string))
            .collect();

        hosts.sort();
        Ok(hosts)
    }

    async fn read_record(&self, host: &str) -> Result<Option<SerializableConnectionConfiguration>> {
        match self.store.get(&self.settings.record_key(host)).await? {
            Some(json) => Ok(Some(SerializableConnectionConfiguration::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Delete the keychain secret belonging to the record stored for `host`
    ///
    /// Other aliases of the same host:port share the secret and stop
    /// decrypting once it is gone.
    async fn purge_secret(&self, host: &str) -> Result<()> {
        let record = match self.read_record(host).await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(()),
            Err(e) => {
                debug!("Skipping secret purge for {}: {}", host, e);
                return Ok(());
            }
        };

        let account = account_id(&record.host, record.port);
        self.secrets
            .delete_secret(&self.settings.service_name, &account)
            .await?;

        debug!("Purged keychain secret for {}:{}", record.host, record.port);
        Ok(())
    }
}
