//! Verification verdicts.
//!
//! The terminal artifact of every verification attempt. Presentation code
//! branches on the reason code, so each failure keeps its specific code
//! instead of collapsing into a generic negative.

use chrono::NaiveDate;

use crate::error::Error;
use crate::pdf::matcher::{MatchedSignature, PdfMatchOutcome};
use crate::pdf::types::ValidityPeriod;
use crate::seal::types::DigitalSeal;

/// Stable reason codes for non-valid verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonCode {
    /// Seal structure violated (magic, version, country, length, date)
    MalformedSeal,
    /// Document profile number not known
    UnknownProfile,
    /// Message zone carries a tag the profile does not declare
    UnknownMessageTag,
    /// A field the profile requires is absent
    MissingRequiredField,
    /// Certificate reference or serial not in the trust store
    UnknownCertificate,
    /// Signature cryptographically invalid over the signed content
    SignatureInvalid,
    /// PDF content modified after signing
    DocumentModified,
    /// Document-validity check answered false (withdrawn/revoked)
    DocumentRevoked,
    /// Signature present but no certificate matched a trusted key
    UnrecognizedIssuer,
    /// Signature reason carries no recognizable document number
    MissingDocumentNumber,
    /// No signature found at all
    NoSignature,
    /// External lookup failed; verification inconclusive
    LookupFailed,
}

impl ReasonCode {
    /// Stable string form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::MalformedSeal => "malformed-seal",
            ReasonCode::UnknownProfile => "unknown-profile",
            ReasonCode::UnknownMessageTag => "unknown-message-tag",
            ReasonCode::MissingRequiredField => "missing-required-field",
            ReasonCode::UnknownCertificate => "unknown-certificate",
            ReasonCode::SignatureInvalid => "signature-invalid",
            ReasonCode::DocumentModified => "document-modified",
            ReasonCode::DocumentRevoked => "document-revoked",
            ReasonCode::UnrecognizedIssuer => "unrecognized-issuer",
            ReasonCode::MissingDocumentNumber => "missing-document-number",
            ReasonCode::NoSignature => "no-signature",
            ReasonCode::LookupFailed => "lookup-failed",
        }
    }
}

/// One disclosed attribute, a read-only projection of decoded data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosedAttribute {
    /// Attribute name as declared by the profile or signature metadata
    pub name: String,
    /// Rendered value
    pub value: String,
}

/// Attested facts disclosed by a positive verification.
#[derive(Debug, Clone, Default)]
pub struct VerifiedDocument {
    /// Issuer of the document (signer identifier or signer name)
    pub issuer: Option<String>,
    /// Date the document was issued (seal path)
    pub issue_date: Option<NaiveDate>,
    /// Disclosed attributes in wire/metadata order
    pub attributes: Vec<DisclosedAttribute>,
    /// Whether the certificate chain was verifiable (PDF path; the seal
    /// path establishes trust directly through the key store)
    pub chain_trusted: bool,
    /// Certificate validity window (PDF path)
    pub validity_period: Option<ValidityPeriod>,
    /// Whether the matched certificate has expired
    pub expired: bool,
}

/// Terminal outcome of a verification attempt.
#[derive(Debug, Clone)]
pub enum VerificationVerdict {
    /// Seal or signature genuine; disclosed facts attached
    Valid(VerifiedDocument),
    /// Definitely not trustworthy (malformed, tampered, revoked)
    Invalid {
        /// Stable reason code
        reason: ReasonCode,
        /// Human-readable detail
        detail: String,
    },
    /// Could not be verified (unrecognized or inconclusive)
    Unknown {
        /// Stable reason code
        reason: ReasonCode,
        /// Human-readable detail
        detail: String,
    },
}

impl VerificationVerdict {
    /// Shorthand for an Invalid verdict.
    pub fn invalid(reason: ReasonCode, detail: impl Into<String>) -> Self {
        VerificationVerdict::Invalid {
            reason,
            detail: detail.into(),
        }
    }

    /// Shorthand for an Unknown verdict.
    pub fn unknown(reason: ReasonCode, detail: impl Into<String>) -> Self {
        VerificationVerdict::Unknown {
            reason,
            detail: detail.into(),
        }
    }

    /// Whether this verdict is positive.
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationVerdict::Valid(_))
    }
}

/// Map a decode or lookup error onto a verdict.
pub fn verdict_from_error(err: &Error) -> VerificationVerdict {
    match err {
        Error::UnknownProfile(nr) => {
            VerificationVerdict::unknown(ReasonCode::UnknownProfile, format!(
                "the seal carries an unknown document profile number '{}'",
                nr
            ))
        },
        Error::UnknownTag(tag) => VerificationVerdict::unknown(
            ReasonCode::UnknownMessageTag,
            format!("the seal carries an unknown message tag 0x{:02x}", tag),
        ),
        Error::UnknownCertificate(reference) => VerificationVerdict::unknown(
            ReasonCode::UnknownCertificate,
            format!("the seal carries an unknown certificate reference '{}'", reference),
        ),
        Error::Lookup(detail) => {
            VerificationVerdict::unknown(ReasonCode::LookupFailed, detail.clone())
        },
        Error::MissingRequiredField { tag, name } => VerificationVerdict::invalid(
            ReasonCode::MissingRequiredField,
            format!("required field 0x{:02x} ({}) is missing", tag, name),
        ),
        other => VerificationVerdict::invalid(ReasonCode::MalformedSeal, other.to_string()),
    }
}

/// Disclosed facts of a verified visual seal.
pub fn disclose_seal(seal: &DigitalSeal) -> VerifiedDocument {
    VerifiedDocument {
        issuer: Some(seal.signer_identifier.clone()),
        issue_date: Some(seal.document_issue_date),
        attributes: seal
            .fields
            .values()
            .map(|field| DisclosedAttribute {
                name: field.name.clone(),
                value: field.value.to_string(),
            })
            .collect(),
        chain_trusted: true,
        validity_period: None,
        expired: false,
    }
}

/// Disclosed facts of a matched PDF signature.
pub fn disclose_pdf(matched: &MatchedSignature) -> VerifiedDocument {
    let mut attributes = Vec::new();
    if let Some(reason) = &matched.reason {
        attributes.push(DisclosedAttribute {
            name: "Reason".into(),
            value: reason.clone(),
        });
    }
    if let Some(contact) = &matched.contact_info {
        attributes.push(DisclosedAttribute {
            name: "Contact".into(),
            value: contact.clone(),
        });
    }
    if let Some(location) = &matched.location {
        attributes.push(DisclosedAttribute {
            name: "Location".into(),
            value: location.clone(),
        });
    }
    attributes.push(DisclosedAttribute {
        name: "Verified by".into(),
        value: matched.issued_by.clone(),
    });
    VerifiedDocument {
        issuer: matched.signer_name.clone(),
        issue_date: None,
        attributes,
        chain_trusted: matched.chain_trusted,
        validity_period: Some(matched.validity_period.clone()),
        expired: matched.expired,
    }
}

/// Map a non-matched PDF outcome onto a verdict.
///
/// [`PdfMatchOutcome::Matched`] is not handled here: a match still has to
/// pass the document-validity check before a verdict can be rendered.
pub fn verdict_from_pdf_outcome(outcome: &PdfMatchOutcome) -> Option<VerificationVerdict> {
    match outcome {
        PdfMatchOutcome::Tampered => Some(VerificationVerdict::invalid(
            ReasonCode::DocumentModified,
            "the document was modified after signing",
        )),
        PdfMatchOutcome::UnrecognizedIssuer => Some(VerificationVerdict::unknown(
            ReasonCode::UnrecognizedIssuer,
            "a signature is present but could not be attributed to a trusted issuer",
        )),
        PdfMatchOutcome::NoSignature => Some(VerificationVerdict::unknown(
            ReasonCode::NoSignature,
            "no digital signature was found",
        )),
        PdfMatchOutcome::Matched(_) => None,
    }
}
