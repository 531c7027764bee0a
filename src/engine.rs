//! High-level verification engines for the two seal paths.
//!
//! [`SealVerifier`] drives the visual path: scanned DataMatrix text to byte
//! buffer, decode, signature check, document-validity check, verdict.
//! [`PdfVerifier`] drives the PDF path: extracted signature records through
//! the matcher and the document-validity check to a verdict.
//!
//! Each call owns its decode state; verifiers borrow their collaborators
//! immutably and can serve concurrent verifications.

use regex::Regex;

use crate::crypto::{P256Backend, SignatureBackend};
use crate::error::Result;
use crate::pdf::matcher::{match_signatures, MatchedSignature, PdfMatchOutcome};
use crate::pdf::types::PdfSignatureRecord;
use crate::profile::ProfileResolver;
use crate::scan::scan_text_to_bytes;
use crate::seal::decoder::SealDecoder;
use crate::seal::verifier::verify_seal_signature;
use crate::trust::TrustStore;
use crate::verdict::{
    disclose_pdf, disclose_seal, verdict_from_error, verdict_from_pdf_outcome, ReasonCode,
    VerificationVerdict,
};

/// Message-zone tag conventionally carrying the document number.
pub const DOCUMENT_NUMBER_TAG: u8 = 0x04;

/// External check whether a document is still valid (not withdrawn).
///
/// Unknown document numbers answer `true`: the register only knows about
/// documents that were explicitly withdrawn.
pub trait DocumentValidity {
    /// Whether the document with this number is still valid.
    fn is_valid(&self, document_number: &str) -> Result<bool>;
}

/// Document-validity check backed by a withdrawal list. Anything not on the
/// list is valid.
#[derive(Debug, Default)]
pub struct RevocationList {
    withdrawn: std::collections::HashSet<String>,
}

impl RevocationList {
    /// Create an empty list (every document valid).
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a document number as withdrawn.
    pub fn withdraw(&mut self, document_number: impl Into<String>) {
        self.withdrawn.insert(document_number.into());
    }
}

impl DocumentValidity for RevocationList {
    fn is_valid(&self, document_number: &str) -> Result<bool> {
        Ok(!self.withdrawn.contains(document_number))
    }
}

/// Verification engine for the visual seal path.
pub struct SealVerifier<'a> {
    profiles: &'a dyn ProfileResolver,
    trust: &'a dyn TrustStore,
    validity: &'a dyn DocumentValidity,
    backend: Box<dyn SignatureBackend>,
    document_number_tag: u8,
}

impl<'a> SealVerifier<'a> {
    /// Create a verifier with the default P-256 backend.
    pub fn new(
        profiles: &'a dyn ProfileResolver,
        trust: &'a dyn TrustStore,
        validity: &'a dyn DocumentValidity,
    ) -> Self {
        Self {
            profiles,
            trust,
            validity,
            backend: Box::new(P256Backend::new()),
            document_number_tag: DOCUMENT_NUMBER_TAG,
        }
    }

    /// Replace the cryptographic backend.
    pub fn with_backend(mut self, backend: Box<dyn SignatureBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Use a different message-zone tag for the document number.
    pub fn with_document_number_tag(mut self, tag: u8) -> Self {
        self.document_number_tag = tag;
        self
    }

    /// Verify a scanned DataMatrix payload string.
    pub fn verify_scan_text(&self, text: &str) -> VerificationVerdict {
        match scan_text_to_bytes(text) {
            Ok(data) => self.verify_bytes(&data),
            Err(e) => verdict_from_error(&e),
        }
    }

    /// Verify a raw seal byte buffer.
    pub fn verify_bytes(&self, data: &[u8]) -> VerificationVerdict {
        let seal = match SealDecoder::new(self.profiles).decode(data) {
            Ok(seal) => seal,
            Err(e) => return verdict_from_error(&e),
        };

        let signature_valid =
            match verify_seal_signature(data, &seal, self.trust, &*self.backend) {
                Ok(valid) => valid,
                Err(e) => return verdict_from_error(&e),
            };
        if !signature_valid {
            return VerificationVerdict::invalid(
                ReasonCode::SignatureInvalid,
                "the seal's digital signature does not match its content",
            );
        }

        // Business-level withdrawal check, keyed by the disclosed document
        // number when the profile carries one
        if let Some(number) = seal.text_field(self.document_number_tag) {
            match self.validity.is_valid(number) {
                Ok(true) => {},
                Ok(false) => {
                    return VerificationVerdict::invalid(
                        ReasonCode::DocumentRevoked,
                        format!("the document '{}' was withdrawn", number),
                    )
                },
                Err(e) => return verdict_from_error(&e),
            }
        }

        VerificationVerdict::Valid(disclose_seal(&seal))
    }
}

/// Verification engine for the PDF signature path.
pub struct PdfVerifier<'a> {
    trust: &'a dyn TrustStore,
    validity: &'a dyn DocumentValidity,
    document_number_pattern: Regex,
}

impl<'a> PdfVerifier<'a> {
    /// Create a verifier.
    ///
    /// The default document-number pattern takes the last whitespace-
    /// separated token of the signing reason; deployments whose reasons
    /// follow a fixed wording set a tighter pattern via
    /// [`with_document_number_pattern`](Self::with_document_number_pattern).
    pub fn new(trust: &'a dyn TrustStore, validity: &'a dyn DocumentValidity) -> Self {
        Self {
            trust,
            validity,
            document_number_pattern: Regex::new(r"(\S+)\s*$").unwrap(),
        }
    }

    /// Replace the pattern extracting the document number from the signing
    /// reason. Capture group 1 is the number.
    pub fn with_document_number_pattern(mut self, pattern: Regex) -> Self {
        self.document_number_pattern = pattern;
        self
    }

    /// Verify a list of extracted signature records.
    pub fn verify_records(&self, records: &[PdfSignatureRecord]) -> VerificationVerdict {
        match match_signatures(records, self.trust) {
            Err(e) => verdict_from_error(&e),
            Ok(PdfMatchOutcome::Matched(matched)) => self.finish_match(&matched),
            Ok(ref other) => verdict_from_pdf_outcome(other).unwrap_or_else(|| {
                VerificationVerdict::unknown(ReasonCode::NoSignature, "no signature found")
            }),
        }
    }

    fn finish_match(&self, matched: &MatchedSignature) -> VerificationVerdict {
        let number = matched.reason.as_deref().and_then(|reason| {
            self.document_number_pattern
                .captures(reason)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string())
        });
        let number = match number {
            Some(number) => number,
            None => {
                return VerificationVerdict::invalid(
                    ReasonCode::MissingDocumentNumber,
                    "the signature is valid but its reason carries no document number",
                )
            },
        };
        match self.validity.is_valid(&number) {
            Ok(true) => VerificationVerdict::Valid(disclose_pdf(matched)),
            Ok(false) => VerificationVerdict::invalid(
                ReasonCode::DocumentRevoked,
                format!("the document '{}' was withdrawn", number),
            ),
            Err(e) => verdict_from_error(&e),
        }
    }
}
