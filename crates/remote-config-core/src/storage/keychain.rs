//! OS Keychain secret backend
//!
//! Uses the system keychain for secret storage:
//! - macOS: Keychain
//! - Windows: Credential Manager (DPAPI)
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use super::SecretBackend;
use crate::crypto::SecretString;
use crate::error::{ConfigError, Result};

/// OS Keychain secret backend
#[derive(Debug, Default, Clone)]
pub struct KeychainBackend;

impl KeychainBackend {
    /// Create a new keychain backend
    pub fn new() -> Self {
        Self
    }

    fn entry(service: &str, account: &str) -> Result<Entry> {
        Entry::new(service, account).map_err(|e| ConfigError::BackendError(e.to_string()))
    }
}

#[async_trait]
impl SecretBackend for KeychainBackend {
    async fn get_secret(&self, service: &str, account: &str) -> Result<Option<String>> {
        let (service, account) = (service.to_string(), account.to_string());

        run_blocking(move || {
            let entry = Self::entry(&service, &account)?;

            match entry.get_password() {
                Ok(secret) => {
                    debug!("Retrieved secret from keychain: {}/{}", service, account);
                    Ok(Some(secret))
                }
                Err(keyring::Error::NoEntry) => {
                    debug!("No keychain entry for {}/{}", service, account);
                    Ok(None)
                }
                Err(e) => Err(ConfigError::BackendError(e.to_string())),
            }
        })
        .await
    }

    async fn set_secret(&self, service: &str, account: &str, secret: &str) -> Result<()> {
        let (service, account) = (service.to_string(), account.to_string());
        let secret = SecretString::new(secret.to_string());

        run_blocking(move || {
            let entry = Self::entry(&service, &account)?;

            entry
                .set_password(secret.expose())
                .map_err(|e| ConfigError::BackendError(e.to_string()))?;

            debug!("Stored secret in keychain: {}/{}", service, account);
            Ok(())
        })
        .await
    }

    async fn delete_secret(&self, service: &str, account: &str) -> Result<()> {
        let (service, account) = (service.to_string(), account.to_string());

        run_blocking(move || {
            let entry = Self::entry(&service, &account)?;

            match entry.delete_password() {
                Ok(()) => {
                    debug!("Deleted secret from keychain: {}/{}", service, account);
                    Ok(())
                }
                Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::BackendError(e.to_string())),
            }
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        #[cfg(target_os = "macos")]
        return "macOS Keychain";

        #[cfg(target_os = "windows")]
        return "Windows Credential Manager";

        #[cfg(target_os = "linux")]
        return "Linux Secret Service";

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        return "System Keychain";
    }
}

/// Run a blocking keychain call off the async worker threads
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ConfigError::BackendError(format!("Keychain task failed: {}", e)))?
}
