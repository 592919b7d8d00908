//! Keychain account id derivation

use sha1::{Digest, Sha1};

/// Account id under which a host's secret is kept: lowercase hex SHA-1 of `host:port`
///
/// The id is reproducible from the durable record alone, so the record never
/// needs a reference to its secret.
pub fn account_id(host: &str, port: u16) -> String {
    let digest = Sha1::digest(format!("{}:{}", host, port).as_bytes());
    hex::encode(digest)
}
