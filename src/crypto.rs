//! Cryptographic capability for signature verification.
//!
//! The engine never talks to a concrete cryptographic backend directly; it
//! goes through [`SignatureBackend`] so the curve/digest implementation can
//! be swapped without touching the decode or verdict logic. The default
//! backend covers the one algorithm seals are specified with: ECDSA over
//! P-256 with a SHA-256 digest.

use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;
use sha2::{Digest, Sha256};
use signature::DigestVerifier;

use crate::error::{Error, Result};

/// Signature algorithms a seal may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    /// ECDSA on NIST P-256 (secp256r1) over a SHA-256 digest
    #[default]
    EcdsaP256Sha256,
}

impl SignatureAlgorithm {
    /// Get the name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 => "ECDSA-P256-SHA256",
        }
    }
}

/// Capability interface for signature verification.
///
/// `Ok(false)` is a definite cryptographic mismatch; `Err` means the key or
/// signature material could not even be interpreted.
pub trait SignatureBackend {
    /// Verify `signature` over `content` with a DER-encoded
    /// SubjectPublicKeyInfo public key.
    fn verify(
        &self,
        algorithm: SignatureAlgorithm,
        public_key_der: &[u8],
        signature: &[u8],
        content: &[u8],
    ) -> Result<bool>;
}

/// Default backend on the pure-Rust `p256` stack.
#[derive(Debug, Default)]
pub struct P256Backend;

impl P256Backend {
    /// Create the default backend.
    pub fn new() -> Self {
        Self
    }
}

impl SignatureBackend for P256Backend {
    fn verify(
        &self,
        algorithm: SignatureAlgorithm,
        public_key_der: &[u8],
        signature: &[u8],
        content: &[u8],
    ) -> Result<bool> {
        let SignatureAlgorithm::EcdsaP256Sha256 = algorithm;
        let key = VerifyingKey::from_public_key_der(public_key_der)
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        // CAdES-style signers emit ASN.1/DER, WebCrypto emits raw r||s.
        let sig = Signature::from_der(signature)
            .or_else(|_| Signature::from_slice(signature))
            .map_err(|e| Error::InvalidSignature(e.to_string()))?;
        let digest = Sha256::new_with_prefix(content);
        Ok(key.verify_digest(digest, &sig).is_ok())
    }
}
