//! Connection configuration type definitions

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Address family hint for a remote endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AddressFamily {
    V4,
    V6,
}

impl TryFrom<u8> for AddressFamily {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(format!("invalid address family {}, expected 4 or 6", other)),
        }
    }
}

impl From<AddressFamily> for u8 {
    fn from(family: AddressFamily) -> Self {
        match family {
            AddressFamily::V4 => 4,
            AddressFamily::V6 => 6,
        }
    }
}

/// In-memory connection configuration for a remote host
///
/// Either all three PEM fields are present (secure) or none are (insecure).
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfiguration {
    /// Host name identifying the remote endpoint
    pub host: String,
    pub port: u16,
    pub family: Option<AddressFamily>,
    /// PEM certificate of the certificate authority
    pub ca_certificate: Option<Vec<u8>>,
    /// PEM client certificate
    pub client_certificate: Option<Vec<u8>>,
    /// PEM client private key (plaintext)
    pub client_key: Option<Vec<u8>>,
}

impl ConnectionConfiguration {
    /// Create a secure configuration carrying TLS material
    pub fn secure(
        host: impl Into<String>,
        port: u16,
        ca_certificate: Vec<u8>,
        client_certificate: Vec<u8>,
        client_key: Vec<u8>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            family: None,
            ca_certificate: Some(ca_certificate),
            client_certificate: Some(client_certificate),
            client_key: Some(client_key),
        }
    }

    /// Create an insecure configuration with no certificate or key material
    pub fn insecure(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            family: None,
            ca_certificate: None,
            client_certificate: None,
            client_key: None,
        }
    }

    /// Set the address family hint
    pub fn with_family(mut self, family: AddressFamily) -> Self {
        self.family = Some(family);
        self
    }

    /// True when no certificate or key material is present
    pub fn is_insecure(&self) -> bool {
        self.ca_certificate.is_none()
            && self.client_certificate.is_none()
            && self.client_key.is_none()
    }
}

impl std::fmt::Debug for ConnectionConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfiguration")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("family", &self.family)
            .field("ca_certificate", &self.ca_certificate.as_ref().map(|c| c.len()))
            .field(
                "client_certificate",
                &self.client_certificate.as_ref().map(|c| c.len()),
            )
            .field("client_key", &self.client_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Durable JSON form of a connection configuration
///
/// `client_key` holds `"<ciphertext-base64>.<salt-base64>"`, never PEM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableConnectionConfiguration {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<AddressFamily>,
    #[serde(
        rename = "certificateAuthorityCertificate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ca_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
}

impl SerializableConnectionConfiguration {
    /// Split `client_key` into its ciphertext and salt halves at the first `.`
    pub fn client_key_parts(&self) -> Result<(&str, &str)> {
        let client_key = self.client_key.as_deref().ok_or_else(|| {
            ConfigError::MalformedCiphertext(format!("no clientKey stored for {}", self.host))
        })?;

        match client_key.split_once('.') {
            Some((ciphertext, salt)) if !ciphertext.is_empty() && !salt.is_empty() => {
                Ok((ciphertext, salt))
            }
            _ => Err(ConfigError::MalformedCiphertext(format!(
                "clientKey for {} is not <ciphertext>.<salt>",
                self.host
            ))),
        }
    }

    /// Parse a record from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record to JSON text
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
