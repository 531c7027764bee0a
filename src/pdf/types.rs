//! Externally-extracted PDF signature records.
//!
//! A signature extractor (outside this crate) walks the PDF, checks the
//! ByteRange digest and the certificate chain, and produces one record per
//! signature. The records arrive as structured data, so everything here
//! derives serde.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::trust::pem_to_der;

/// Validity window of an embedded certificate, as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityPeriod {
    /// Start of validity
    pub not_before: String,
    /// End of validity
    pub not_after: String,
}

/// One certificate embedded in a PDF signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedCertificate {
    /// Whether this is the signer's client certificate (as opposed to an
    /// intermediate or root of the chain)
    pub client_certificate: bool,
    /// Common name of the issuing authority
    pub issued_by: String,
    /// Common name of the subject
    pub issued_to: String,
    /// Certificate serial number, lowercase hex; derived from
    /// `pem_certificate` when absent
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Subject public key as PEM; derived from `pem_certificate` when absent
    #[serde(default)]
    pub public_key_pem: Option<String>,
    /// Full certificate as PEM
    #[serde(default)]
    pub pem_certificate: Option<String>,
    /// Validity window
    pub validity_period: ValidityPeriod,
}

impl EmbeddedCertificate {
    /// Serial number and DER subject public key of this certificate.
    ///
    /// Prefers the fields the extractor filled in; falls back to parsing
    /// `pem_certificate` when either is missing.
    pub fn credentials(&self) -> Result<(String, Vec<u8>)> {
        if let (Some(serial), Some(key_pem)) = (&self.serial_number, &self.public_key_pem) {
            return Ok((normalize_serial(serial), pem_to_der(key_pem)?));
        }
        let pem = self.pem_certificate.as_deref().ok_or_else(|| {
            Error::InvalidCertificate("record carries neither key material nor PEM".to_string())
        })?;
        parse_pem_certificate(pem)
    }
}

/// One signature found in a PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSignatureRecord {
    /// Content hash matches the signed hash (document unmodified)
    pub integrity: bool,
    /// Certificate chain trusted by the verifying environment
    pub authenticity: bool,
    /// Signing certificate expired
    pub expired: bool,
    /// Signing reason, typically carrying the document number
    #[serde(default)]
    pub reason: Option<String>,
    /// Contact information of the signer
    #[serde(default)]
    pub contact_info: Option<String>,
    /// Signing location
    #[serde(default)]
    pub location: Option<String>,
    /// Name of the signer
    #[serde(default)]
    pub signer_name: Option<String>,
    /// Certificates embedded in the signature
    #[serde(default)]
    pub certificates: Vec<EmbeddedCertificate>,
}

/// Lowercase a serial and drop the common separator characters.
fn normalize_serial(serial: &str) -> String {
    serial
        .chars()
        .filter(|c| !matches!(c, ':' | ' '))
        .collect::<String>()
        .to_lowercase()
}

/// Extract serial number and DER subject public key from a PEM certificate.
fn parse_pem_certificate(pem: &str) -> Result<(String, Vec<u8>)> {
    let (_, parsed) = x509_parser::pem::parse_x509_pem(pem.as_bytes())
        .map_err(|e| Error::InvalidCertificate(e.to_string()))?;
    let cert = parsed
        .parse_x509()
        .map_err(|e| Error::InvalidCertificate(e.to_string()))?;
    let serial = normalize_serial(&cert.raw_serial_as_string());
    let spki = cert.public_key().raw.to_vec();
    Ok((serial, spki))
}
