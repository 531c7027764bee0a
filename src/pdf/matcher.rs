//! Matching PDF signatures against the trust store.
//!
//! The extractor already answered the cryptographic questions per signature
//! (integrity, chain trust, expiry). What remains is deciding whether any of
//! the embedded client certificates belongs to an issuer we trust, by
//! comparing its public key byte-for-byte against the key the trust store
//! holds for its serial number.

use log::{debug, warn};

use crate::error::Result;
use crate::pdf::types::{PdfSignatureRecord, ValidityPeriod};
use crate::trust::{der_matches_pem, TrustStore};

/// The signature selected as authoritative for the document.
#[derive(Debug, Clone)]
pub struct MatchedSignature {
    /// Name of the signer
    pub signer_name: Option<String>,
    /// Signing reason
    pub reason: Option<String>,
    /// Contact information
    pub contact_info: Option<String>,
    /// Signing location
    pub location: Option<String>,
    /// Common name of the authority that issued the matched certificate
    pub issued_by: String,
    /// Whether the extractor could verify the certificate chain
    pub chain_trusted: bool,
    /// Whether the matched certificate has expired
    pub expired: bool,
    /// Validity window of the matched certificate
    pub validity_period: ValidityPeriod,
}

/// Outcome of matching a PDF's signatures against the trust store.
#[derive(Debug)]
pub enum PdfMatchOutcome {
    /// A signature failed its integrity check: the document was modified
    /// after signing. Takes precedence over every other outcome.
    Tampered,
    /// A client certificate's public key matches a trusted key.
    Matched(Box<MatchedSignature>),
    /// Client certificates were present but none matched a trusted key.
    UnrecognizedIssuer,
    /// No signature with a client certificate was found.
    NoSignature,
}

/// Walk the extracted signature records in order and select the
/// authoritative one.
///
/// The first record with `integrity == false` short-circuits the whole
/// verification as [`PdfMatchOutcome::Tampered`], regardless of any valid
/// signatures that might follow.
pub fn match_signatures(
    records: &[PdfSignatureRecord],
    trust: &dyn TrustStore,
) -> Result<PdfMatchOutcome> {
    let mut found_client_cert = false;

    for record in records {
        if !record.integrity {
            warn!("PDF signature failed integrity check; document modified after signing");
            return Ok(PdfMatchOutcome::Tampered);
        }

        for cert in &record.certificates {
            if !cert.client_certificate {
                continue;
            }
            found_client_cert = true;

            let (serial, spki_der) = cert.credentials()?;
            let trusted_pem = match trust.key_by_serial(&serial)? {
                Some(pem) => pem,
                None => {
                    debug!("serial {} not in trust store, trying next certificate", serial);
                    continue;
                },
            };
            if !der_matches_pem(&spki_der, &trusted_pem) {
                debug!("serial {} known but key material differs", serial);
                continue;
            }

            debug!("matched trusted certificate, serial {}", serial);
            return Ok(PdfMatchOutcome::Matched(Box::new(MatchedSignature {
                signer_name: record.signer_name.clone(),
                reason: record.reason.clone(),
                contact_info: record.contact_info.clone(),
                location: record.location.clone(),
                issued_by: cert.issued_by.clone(),
                chain_trusted: record.authenticity,
                expired: record.expired,
                validity_period: cert.validity_period.clone(),
            })));
        }
    }

    if found_client_cert {
        Ok(PdfMatchOutcome::UnrecognizedIssuer)
    } else {
        Ok(PdfMatchOutcome::NoSignature)
    }
}
