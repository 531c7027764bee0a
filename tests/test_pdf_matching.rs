//! End-to-end tests for the PDF signature path.
//!
//! Signature records arrive as JSON from an external extractor; the tests
//! deserialize realistic extractor output and run it through the public
//! [`PdfVerifier`] surface down to the final verdict.

use regex::Regex;

use seal_oxide::trust::InMemoryTrustStore;
use seal_oxide::{
    PdfSignatureRecord, PdfVerifier, ReasonCode, RevocationList, VerificationVerdict,
};

const KEY_PEM: &str = "-----BEGIN PUBLIC KEY-----\nMFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE\n-----END PUBLIC KEY-----";

fn records(integrity: bool, reason: &str, serial: &str) -> Vec<PdfSignatureRecord> {
    let json = format!(
        r#"[{{
            "integrity": {integrity},
            "authenticity": true,
            "expired": false,
            "reason": "{reason}",
            "location": "Bonn",
            "signerName": "Central Office",
            "certificates": [{{
                "clientCertificate": true,
                "issuedBy": "Office Root CA",
                "issuedTo": "Office Signer",
                "serialNumber": "{serial}",
                "publicKeyPem": "-----BEGIN PUBLIC KEY-----\nMFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE\n-----END PUBLIC KEY-----",
                "validityPeriod": {{"notBefore": "2023-01-01", "notAfter": "2026-01-01"}}
            }}]
        }}]"#
    );
    serde_json::from_str(&json).unwrap()
}

fn trust() -> InMemoryTrustStore {
    let mut store = InMemoryTrustStore::new();
    store.insert_serial("0abc", KEY_PEM);
    store
}

fn document_number_pattern() -> Regex {
    Regex::new(r"Document evaluation (.+)").unwrap()
}

#[test]
fn test_matched_signature_yields_valid_verdict() {
    let trust = trust();
    let validity = RevocationList::new();
    let verifier =
        PdfVerifier::new(&trust, &validity).with_document_number_pattern(document_number_pattern());

    match verifier.verify_records(&records(true, "Document evaluation 7AB42", "0abc")) {
        VerificationVerdict::Valid(doc) => {
            assert_eq!(doc.issuer.as_deref(), Some("Central Office"));
            assert!(doc.chain_trusted);
            assert!(!doc.expired);
            let period = doc.validity_period.expect("validity window disclosed");
            assert_eq!(period.not_before, "2023-01-01");
            assert!(doc
                .attributes
                .iter()
                .any(|a| a.name == "Location" && a.value == "Bonn"));
            assert!(doc
                .attributes
                .iter()
                .any(|a| a.name == "Verified by" && a.value == "Office Root CA"));
        },
        other => panic!("expected Valid, got {:?}", other),
    }
}

#[test]
fn test_failed_integrity_is_tampered() {
    let trust = trust();
    let validity = RevocationList::new();
    let verifier = PdfVerifier::new(&trust, &validity);

    match verifier.verify_records(&records(false, "Document evaluation 7AB42", "0abc")) {
        VerificationVerdict::Invalid { reason, .. } => {
            assert_eq!(reason, ReasonCode::DocumentModified);
        },
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_unknown_serial_is_unrecognized_issuer() {
    let trust = trust();
    let validity = RevocationList::new();
    let verifier = PdfVerifier::new(&trust, &validity);

    match verifier.verify_records(&records(true, "Document evaluation 7AB42", "ffff")) {
        VerificationVerdict::Unknown { reason, .. } => {
            assert_eq!(reason, ReasonCode::UnrecognizedIssuer);
        },
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_reason_without_document_number() {
    let trust = trust();
    let validity = RevocationList::new();
    let verifier =
        PdfVerifier::new(&trust, &validity).with_document_number_pattern(document_number_pattern());

    match verifier.verify_records(&records(true, "Approved for release", "0abc")) {
        VerificationVerdict::Invalid { reason, .. } => {
            assert_eq!(reason, ReasonCode::MissingDocumentNumber);
        },
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_withdrawn_document_is_revoked() {
    let trust = trust();
    let mut validity = RevocationList::new();
    validity.withdraw("7AB42");
    let verifier =
        PdfVerifier::new(&trust, &validity).with_document_number_pattern(document_number_pattern());

    match verifier.verify_records(&records(true, "Document evaluation 7AB42", "0abc")) {
        VerificationVerdict::Invalid { reason, detail } => {
            assert_eq!(reason, ReasonCode::DocumentRevoked);
            assert!(detail.contains("7AB42"));
        },
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_no_records_is_no_signature() {
    let trust = trust();
    let validity = RevocationList::new();
    let verifier = PdfVerifier::new(&trust, &validity);

    match verifier.verify_records(&[]) {
        VerificationVerdict::Unknown { reason, .. } => {
            assert_eq!(reason, ReasonCode::NoSignature);
        },
        other => panic!("expected Unknown, got {:?}", other),
    }
}
