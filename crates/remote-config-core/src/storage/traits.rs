//! Storage trait definitions

use crate::error::Result;
use async_trait::async_trait;

/// Durable string-keyed, string-valued map for non-secret records
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key succeeds
    async fn delete(&self, key: &str) -> Result<()>;

    /// List all keys with a given prefix
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;

    /// Get a human-readable name for this store
    fn backend_name(&self) -> &'static str;
}

/// Secret store addressed by (service, account) pairs, one secret string per pair
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Read the secret for `(service, account)`
    async fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>>;

    /// Store the secret for `(service, account)`; last write wins
    async fn set_secret(&self, service: &str, account: &str, secret: &str) -> Result<()>;

    /// Remove the secret for `(service, account)`; removing a missing secret succeeds
    async fn delete_secret(&self, service: &str, account: &str) -> Result<()>;

    /// Get a human-readable name for this backend
    fn backend_name(&self) -> &'static str;
}
