//! PDF signature path.
//!
//! The PDF container itself is parsed by an external extractor; this module
//! consumes the signature records it hands over and matches the embedded
//! certificates against the trust store.

pub mod matcher;
pub mod types;

pub use matcher::{match_signatures, MatchedSignature, PdfMatchOutcome};
pub use types::{EmbeddedCertificate, PdfSignatureRecord, ValidityPeriod};
