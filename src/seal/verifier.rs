//! Seal signature verification.
//!
//! The signature zone covers the exact byte prefix of the seal buffer before
//! the signature tag. The verification key is addressed by the certificate
//! reference decoded from the header.

use log::{debug, warn};

use crate::crypto::{SignatureAlgorithm, SignatureBackend};
use crate::error::{Error, Result};
use crate::seal::types::DigitalSeal;
use crate::trust::TrustStore;

/// Verify a decoded seal's signature over the original byte buffer.
///
/// Returns `Ok(true)`/`Ok(false)` for a definite cryptographic answer and
/// `Err(Error::UnknownCertificate)` when the trust store does not know the
/// seal's certificate reference; the latter is an unrecognized issuer, not
/// an invalid signature.
pub fn verify_seal_signature(
    data: &[u8],
    seal: &DigitalSeal,
    trust: &dyn TrustStore,
    backend: &dyn SignatureBackend,
) -> Result<bool> {
    let key_der = trust
        .key_by_reference(&seal.certificate_reference)?
        .ok_or_else(|| Error::UnknownCertificate(seal.certificate_reference.clone()))?;

    let signed = data
        .get(..seal.signature_offset)
        .ok_or(Error::UnexpectedEof {
            offset: seal.signature_offset,
        })?;

    let valid = backend.verify(
        SignatureAlgorithm::EcdsaP256Sha256,
        &key_der,
        &seal.signature,
        signed,
    )?;
    if valid {
        debug!(
            "seal signature valid for certificate reference {}",
            seal.certificate_reference
        );
    } else {
        warn!(
            "seal signature INVALID for certificate reference {}",
            seal.certificate_reference
        );
    }
    Ok(valid)
}
