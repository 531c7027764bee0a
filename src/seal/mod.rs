//! Visual seal decoding and signature verification.
//!
//! A visual seal is the binary payload of a DataMatrix code: a fixed header,
//! a profile-driven message zone, and a trailing signature zone. This module
//! turns the raw byte buffer into a [`DigitalSeal`](types::DigitalSeal) and
//! checks its signature against the trust store.

pub mod decoder;
pub mod types;
pub mod verifier;

pub use decoder::SealDecoder;
pub use types::{DecodedField, DigitalSeal, FieldValue, SealVersion};
pub use verifier::verify_seal_signature;
