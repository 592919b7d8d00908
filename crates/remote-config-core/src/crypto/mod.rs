//! Cryptographic primitives for connection configuration storage
//!
//! This module provides:
//! - AES-128-CBC encryption of text blobs with base64 keys and IVs
//! - Random secret generation for keys and IVs
//! - Deterministic keychain account ids
//! - Secure memory handling with zeroize

mod account;
mod cipher;
mod secure_memory;

pub use account::account_id;
pub use cipher::{decrypt, encrypt, generate_random_secret, SECRET_LEN};
pub use secure_memory::SecretString;
