//! In-memory storage for tests and ephemeral sessions

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::{KeyValueStore, SecretBackend};
use crate::error::Result;

/// Volatile key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .entries
            .read()
            .await
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "Memory Store"
    }
}

/// Volatile secret backend
#[derive(Debug, Default)]
pub struct MemorySecretBackend {
    secrets: RwLock<HashMap<(String, String), String>>,
}

impl MemorySecretBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets
    pub async fn len(&self) -> usize {
        self.secrets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.secrets.read().await.is_empty()
    }
}

#[async_trait]
impl SecretBackend for MemorySecretBackend {
    async fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>> {
        let key = (service.to_string(), account.to_string());
        Ok(self.secrets.read().await.get(&key).cloned())
    }

    async fn set_secret(&self, service: &str, account: &str, secret: &str) -> Result<()> {
        let key = (service.to_string(), account.to_string());
        self.secrets.write().await.insert(key, secret.to_string());
        Ok(())
    }

    async fn delete_secret(&self, service: &str, account: &str) -> Result<()> {
        let key = (service.to_string(), account.to_string());
        self.secrets.write().await.remove(&key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "Memory Secret Backend"
    }
}
