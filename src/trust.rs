//! Trust store: the external source of public keys accepted for seal and
//! PDF signature verification.
//!
//! The visual seal path addresses keys by the certificate reference decoded
//! from the seal header; the PDF path addresses them by the serial number of
//! the certificate embedded in the signature. Both lookups answer `Ok(None)`
//! for unknown references, which the verdict layer reports as an unrecognized
//! issuer rather than a tampered document.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Error, Result};

/// External supplier of trusted public keys.
pub trait TrustStore {
    /// Look up DER-encoded SubjectPublicKeyInfo key material by the
    /// signer/certificate reference from a seal header (seal path).
    fn key_by_reference(&self, certificate_reference: &str) -> Result<Option<Vec<u8>>>;

    /// Look up a PEM public key by certificate serial number (PDF path).
    /// Serials are lowercase hex without separators.
    fn key_by_serial(&self, serial_number: &str) -> Result<Option<String>>;
}

/// Strip PEM framing and all whitespace, leaving the bare base64 body.
///
/// Two keys are considered identical when their normalized bodies match
/// byte-for-byte, which sidesteps line-wrapping differences between PEM
/// producers.
pub fn normalize_pem(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Decode a PEM public key into its DER bytes.
pub fn pem_to_der(pem: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(normalize_pem(pem))
        .map_err(|e| Error::InvalidKey(format!("PEM body is not base64: {}", e)))
}

/// Compare DER key material against a PEM public key after normalization.
pub fn der_matches_pem(der: &[u8], pem: &str) -> bool {
    BASE64.encode(der) == normalize_pem(pem)
}

/// In-memory trust store, useful as a cache in front of a remote key
/// service and as a test double.
#[derive(Debug, Default)]
pub struct InMemoryTrustStore {
    by_reference: std::collections::HashMap<String, Vec<u8>>,
    by_serial: std::collections::HashMap<String, String>,
}

impl InMemoryTrustStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a DER-encoded seal verification key under a certificate
    /// reference.
    pub fn insert_reference(&mut self, reference: impl Into<String>, der: Vec<u8>) {
        self.by_reference.insert(reference.into(), der);
    }

    /// Register a PEM public key under a certificate serial number.
    pub fn insert_serial(&mut self, serial: impl Into<String>, pem: impl Into<String>) {
        self.by_serial.insert(serial.into(), pem.into());
    }
}

impl TrustStore for InMemoryTrustStore {
    fn key_by_reference(&self, certificate_reference: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.by_reference.get(certificate_reference).cloned())
    }

    fn key_by_serial(&self, serial_number: &str) -> Result<Option<String>> {
        Ok(self.by_serial.get(serial_number).cloned())
    }
}
