//! End-to-end tests for the visual seal path.
//!
//! Each test builds a complete synthetic seal: header, profile-driven
//! message zone, and an ECDSA P-256 signature over everything before the
//! signature tag. Verification runs through the public [`SealVerifier`]
//! surface, from scanned text or raw bytes down to the final verdict.

use p256::ecdsa::{Signature, SigningKey};
use p256::pkcs8::EncodePublicKey;
use signature::Signer;

use seal_oxide::profile::StaticProfileResolver;
use seal_oxide::trust::InMemoryTrustStore;
use seal_oxide::{
    FieldSchema, ReasonCode, RevocationList, SealVerifier, VerificationVerdict,
};

const PROFILE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<profile>
  <profileNumber>123456</profileNumber>
  <profileName>Statement of Comparability</profileName>
  <creator>Central Office</creator>
  <entry tag="1" optional="false">
    <name>Family name</name>
    <type>string</type>
  </entry>
  <entry tag="4" optional="false">
    <name>Document number</name>
    <type>alphanum</type>
  </entry>
</profile>"#;

// Producing-side fixture encoders: the restricted C40 alphabet, packed
// dates and short-form TLV.

fn c40_char_digit(c: char) -> u16 {
    match c {
        '0'..='9' => c as u16 - '0' as u16 + 4,
        'A'..='Z' => c as u16 - 'A' as u16 + 14,
        ' ' => 3,
        other => panic!("not C40-encodable: {:?}", other),
    }
}

fn c40_encode(text: &str) -> Vec<u8> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    for chunk in chars.chunks(3) {
        match chunk {
            [a] => out.extend_from_slice(&[0xFE, *a as u8 + 1]),
            [a, b] => {
                let v16 = c40_char_digit(*a) * 1600 + c40_char_digit(*b) * 40 + 1;
                out.extend_from_slice(&v16.to_be_bytes());
            },
            [a, b, c] => {
                let v16 =
                    c40_char_digit(*a) * 1600 + c40_char_digit(*b) * 40 + c40_char_digit(*c) + 1;
                out.extend_from_slice(&v16.to_be_bytes());
            },
            _ => unreachable!(),
        }
    }
    out
}

fn encode_date(month: u32, day: u32, year: u32) -> [u8; 3] {
    let v24 = month * 1_000_000 + day * 10_000 + year;
    [(v24 >> 16) as u8, (v24 >> 8) as u8, v24 as u8]
}

fn tlv(tag: u8, value: &[u8]) -> Vec<u8> {
    assert!(value.len() <= 0x7F, "fixtures use short lengths");
    let mut out = vec![tag, value.len() as u8];
    out.extend_from_slice(value);
    out
}

fn signing_key() -> SigningKey {
    SigningKey::from_slice(&[0x42; 32]).unwrap()
}

/// Complete version 4 seal, signed over everything before the signature tag.
fn signed_seal(key: &SigningKey, document_number: &str, family_name: &str) -> Vec<u8> {
    let mut data = vec![0xDC, 0x03]; // magic, version byte 3 -> version 4
    data.extend(c40_encode("D  "));
    data.extend(c40_encode("ABCD5")); // signer id + reference length 5
    data.extend(c40_encode("00001 ")); // reference "00001" padded
    data.extend(encode_date(3, 25, 2024));
    data.extend(encode_date(4, 1, 2024));
    data.extend([0x01, 0x02]);
    data.extend(tlv(0x00, &c40_encode("123456")));
    data.extend(tlv(0x04, &c40_encode(document_number)));
    data.extend(tlv(0x01, family_name.as_bytes()));

    let sig: Signature = key.sign(&data);
    data.extend(tlv(0xFF, sig.to_der().as_bytes()));
    data
}

/// Render seal bytes the way a barcode scanner hands them over: bytes in
/// the Windows-1252 C1 block arrive as their mapped Unicode code points.
fn to_scan_text(data: &[u8]) -> String {
    data.iter()
        .map(|&b| match b {
            0x80 => '\u{20AC}',
            0x82 => '\u{201A}',
            0x83 => '\u{0192}',
            0x84 => '\u{201E}',
            0x85 => '\u{2026}',
            0x86 => '\u{2020}',
            0x87 => '\u{2021}',
            0x88 => '\u{02C6}',
            0x89 => '\u{2030}',
            0x8A => '\u{0160}',
            0x8B => '\u{2039}',
            0x8C => '\u{0152}',
            0x8E => '\u{017D}',
            0x91 => '\u{2018}',
            0x92 => '\u{2019}',
            0x93 => '\u{201C}',
            0x94 => '\u{201D}',
            0x95 => '\u{2022}',
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            0x98 => '\u{02DC}',
            0x99 => '\u{2122}',
            0x9A => '\u{0161}',
            0x9B => '\u{203A}',
            0x9C => '\u{0153}',
            0x9E => '\u{017E}',
            0x9F => '\u{0178}',
            other => other as char,
        })
        .collect()
}

fn profiles() -> StaticProfileResolver {
    let mut resolver = StaticProfileResolver::new();
    resolver.insert("123456", FieldSchema::from_xml(PROFILE_XML).unwrap());
    resolver
}

fn trust_with(key: &SigningKey) -> InMemoryTrustStore {
    let mut trust = InMemoryTrustStore::new();
    trust.insert_reference(
        "00001",
        key.verifying_key().to_public_key_der().unwrap().into_vec(),
    );
    trust
}

#[test]
fn test_valid_seal_verifies_from_bytes() {
    let key = signing_key();
    let data = signed_seal(&key, "XY98765", "Erika Mustermann");
    let profiles = profiles();
    let trust = trust_with(&key);
    let validity = RevocationList::new();

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    match verifier.verify_bytes(&data) {
        VerificationVerdict::Valid(doc) => {
            assert_eq!(doc.issuer.as_deref(), Some("ABCD"));
            assert_eq!(
                doc.issue_date.map(|d| d.to_string()).as_deref(),
                Some("2024-03-25")
            );
            let number = doc
                .attributes
                .iter()
                .find(|a| a.name == "Document number")
                .expect("document number disclosed");
            assert_eq!(number.value, "XY98765");
            let name = doc
                .attributes
                .iter()
                .find(|a| a.name == "Family name")
                .expect("family name disclosed");
            assert_eq!(name.value, "Erika Mustermann");
        },
        other => panic!("expected Valid, got {:?}", other),
    }
}

#[test]
fn test_valid_seal_verifies_from_scan_text() {
    let key = signing_key();
    let data = signed_seal(&key, "XY98765", "Erika Mustermann");
    let profiles = profiles();
    let trust = trust_with(&key);
    let validity = RevocationList::new();

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    let verdict = verifier.verify_scan_text(&to_scan_text(&data));
    assert!(verdict.is_valid(), "expected Valid, got {:?}", verdict);
}

#[test]
fn test_modified_field_invalidates_signature() {
    let key = signing_key();
    let mut data = signed_seal(&key, "XY98765", "Erika Mustermann");
    // Flip one character inside the family-name value; the seal still
    // decodes, only the signature no longer covers it
    let pos = data
        .windows(5)
        .position(|w| w == b"Erika")
        .expect("name bytes present");
    data[pos] = b'B';

    let profiles = profiles();
    let trust = trust_with(&key);
    let validity = RevocationList::new();

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    match verifier.verify_bytes(&data) {
        VerificationVerdict::Invalid { reason, .. } => {
            assert_eq!(reason, ReasonCode::SignatureInvalid);
        },
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_withdrawn_document_number_is_revoked() {
    let key = signing_key();
    let data = signed_seal(&key, "XY98765", "Erika Mustermann");
    let profiles = profiles();
    let trust = trust_with(&key);
    let mut validity = RevocationList::new();
    validity.withdraw("XY98765");

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    match verifier.verify_bytes(&data) {
        VerificationVerdict::Invalid { reason, detail } => {
            assert_eq!(reason, ReasonCode::DocumentRevoked);
            assert!(detail.contains("XY98765"));
        },
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn test_unknown_certificate_reference_is_inconclusive() {
    let key = signing_key();
    let data = signed_seal(&key, "XY98765", "Erika Mustermann");
    let profiles = profiles();
    let trust = InMemoryTrustStore::new(); // knows no keys
    let validity = RevocationList::new();

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    match verifier.verify_bytes(&data) {
        VerificationVerdict::Unknown { reason, .. } => {
            assert_eq!(reason, ReasonCode::UnknownCertificate);
        },
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_unknown_profile_is_inconclusive() {
    let key = signing_key();
    let data = signed_seal(&key, "XY98765", "Erika Mustermann");
    let profiles = StaticProfileResolver::new(); // knows no profiles
    let trust = trust_with(&key);
    let validity = RevocationList::new();

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    match verifier.verify_bytes(&data) {
        VerificationVerdict::Unknown { reason, detail } => {
            assert_eq!(reason, ReasonCode::UnknownProfile);
            assert!(detail.contains("123456"));
        },
        other => panic!("expected Unknown, got {:?}", other),
    }
}

#[test]
fn test_truncated_buffer_is_malformed() {
    let key = signing_key();
    let data = signed_seal(&key, "XY98765", "Erika Mustermann");
    let profiles = profiles();
    let trust = trust_with(&key);
    let validity = RevocationList::new();

    let verifier = SealVerifier::new(&profiles, &trust, &validity);
    match verifier.verify_bytes(&data[..12]) {
        VerificationVerdict::Invalid { reason, .. } => {
            assert_eq!(reason, ReasonCode::MalformedSeal);
        },
        other => panic!("expected Invalid, got {:?}", other),
    }
}
