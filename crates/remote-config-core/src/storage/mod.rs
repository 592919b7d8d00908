//! Storage seams for connection configurations
//!
//! Two independent resources back the manager:
//! 1. A durable key-value store for non-secret JSON records
//! 2. A secret backend (OS keychain) holding one password per host and port
//!
//! Each has an on-disk/OS implementation and an in-memory one for tests.

mod traits;
mod keychain;
mod json_file;
mod memory;

pub use traits::{KeyValueStore, SecretBackend};
pub use keychain::KeychainBackend;
pub use json_file::JsonFileStore;
pub use memory::{MemorySecretBackend, MemoryStore};
