//! # Seal Oxide
//!
//! Verification engine for cryptographically sealed documents.
//!
//! ## Core Features
//!
//! ### Visual seals (DataMatrix)
//! - **Binary seal decoding**: header, message and signature zones of
//!   BSI TR-03137 style seals, versions 3 and 4
//! - **C40 text decoding**: packed character pairs with escape sequences
//! - **Profile-driven message zone**: field names, types and requiredness
//!   come from externally defined XML profiles
//! - **Scan transcoding**: Windows-1252 remapping of barcode scanner output
//! - **Signature verification**: ECDSA P-256 with SHA-256 over the header
//!   and message zones, keys resolved by certificate reference
//!
//! ### PDF signatures
//! - **Trust matching**: embedded client certificates matched byte-for-byte
//!   against trusted public keys by serial number
//! - **Tamper precedence**: a failed integrity check overrides everything
//!
//! ### Verdicts
//! - **Three-way outcome**: valid with disclosed attributes, invalid with a
//!   stable reason code, or unknown when verification is inconclusive
//! - **Document-validity hook**: withdrawn document numbers turn an
//!   otherwise valid seal into an invalid verdict
//!
//! ## Architecture
//! - **Pluggable design**: trait seams for profile resolution
//!   ([`ProfileResolver`]), key lookup ([`TrustStore`]), crypto
//!   ([`crypto::SignatureBackend`]) and document validity
//!   ([`DocumentValidity`])
//! - **No I/O**: callers bring bytes, records and lookups; the crate only
//!   decodes, matches and verifies
//!
//! ## Quick Start
//!
//! ```ignore
//! use seal_oxide::{FieldSchema, RevocationList, SealVerifier};
//! use seal_oxide::profile::StaticProfileResolver;
//! use seal_oxide::trust::InMemoryTrustStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut profiles = StaticProfileResolver::new();
//! let xml = std::fs::read_to_string("profile.xml")?;
//! profiles.insert("123456", FieldSchema::from_xml(&xml)?);
//!
//! let mut trust = InMemoryTrustStore::new();
//! trust.insert_reference("UTTS5", std::fs::read("signer.der")?);
//!
//! let validity = RevocationList::new();
//! let verifier = SealVerifier::new(&profiles, &trust, &validity);
//! let verdict = verifier.verify_scan_text(&scanned_text);
//! println!("valid: {}", verdict.is_valid());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Low-level decoding primitives
pub mod c40;
pub mod cursor;
pub mod scan;

// Profile and trust lookups
pub mod profile;
pub mod trust;

// Cryptography
pub mod crypto;

// Visual seal path
pub mod seal;

// PDF signature path
pub mod pdf;

// Verdict assembly and orchestration
pub mod engine;
pub mod verdict;

// Re-exports
pub use engine::{DocumentValidity, PdfVerifier, RevocationList, SealVerifier};
pub use error::{Error, Result};
pub use pdf::{MatchedSignature, PdfMatchOutcome, PdfSignatureRecord};
pub use profile::{FieldSchema, FieldType, ProfileResolver, SchemaEntry};
pub use seal::{DecodedField, DigitalSeal, FieldValue, SealDecoder, SealVersion};
pub use trust::TrustStore;
pub use verdict::{
    DisclosedAttribute, ReasonCode, VerificationVerdict, VerifiedDocument,
};
