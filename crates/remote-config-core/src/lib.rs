//! # remote-config-core
//!
//! Saved connection configurations for remote hosts:
//! - AES-128-CBC protection of the client private key
//! - Per-host keys held in the OS keychain, looked up by a SHA-1 account id
//! - Durable JSON records keyed by host name and IP alias
//! - A manager whose public operations never fail from the caller's side

pub mod crypto;
pub mod storage;
pub mod connection;
pub mod error;
pub mod settings;

pub use error::{ConfigError, Result};
pub use crypto::{account_id, decrypt, encrypt, generate_random_secret, SecretString};
pub use storage::{
    JsonFileStore, KeyValueStore, KeychainBackend, MemorySecretBackend, MemoryStore, SecretBackend,
};
pub use connection::{
    AddressFamily, ConfigCodec, ConnectionConfigManager, ConnectionConfiguration,
    SerializableConnectionConfiguration,
};
pub use settings::{ManagerSettings, SettingsManager};
