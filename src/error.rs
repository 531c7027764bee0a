//! Error types for the seal verification engine.
//!
//! Every failure mode carries a specific variant: the verdict layer must be
//! able to tell "not our format" from "tampered" from "unsupported profile",
//! so there is no generic parse error.

/// Result type alias for seal verification operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding or verifying a seal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// First byte of the seal is not the 0xDC magic constant
    #[error("Invalid magic constant: expected 0xdc, found 0x{0:02x}")]
    InvalidMagic(u8),

    /// Seal version is neither 3 nor 4
    #[error("Unsupported seal version: {0}")]
    UnsupportedVersion(u8),

    /// Issuing country code does not match the expected sentinel
    #[error("Invalid issuing country: expected 'D<<', found '{0}'")]
    InvalidCountry(String),

    /// Read past the end of the seal buffer
    #[error("End of seal data reached unexpectedly at byte {offset}")]
    UnexpectedEof {
        /// Byte offset where the read was attempted
        offset: usize,
    },

    /// Length field uses a lead byte outside the supported encodings
    #[error("Invalid length encoding: lead byte 0x{0:02x}")]
    InvalidLengthEncoding(u8),

    /// Date value with a declared length other than 3
    #[error("Invalid date length: expected 3, found {0}")]
    InvalidDateLength(usize),

    /// Encoded date does not form a valid calendar date
    #[error("Invalid date value: 0x{0:06x}")]
    InvalidDate(u32),

    /// A tag byte differs from the one the zone structure requires
    #[error("Unexpected tag: expected 0x{expected:02x}, found 0x{found:02x}")]
    UnexpectedTag {
        /// Tag the decoder expected at this position
        expected: u8,
        /// Tag actually read
        found: u8,
    },

    /// Document profile number not known to the profile resolver
    #[error("Unknown document profile number '{0}'")]
    UnknownProfile(String),

    /// Message-zone tag not declared by the resolved profile
    #[error("Unknown message tag 0x{0:02x}")]
    UnknownTag(u8),

    /// Profile declares a non-optional field that the seal does not carry
    #[error("Missing required field: tag 0x{tag:02x} ({name})")]
    MissingRequiredField {
        /// Tag of the missing field
        tag: u8,
        /// Field name from the profile
        name: String,
    },

    /// Profile declares a field type outside the supported set
    #[error("Unknown schema field type '{0}'")]
    InvalidSchemaType(String),

    /// Profile XML is structurally unusable
    #[error("Invalid profile XML: {0}")]
    InvalidProfileXml(String),

    /// Version-4 certificate reference with unparsable length digits
    #[error("Invalid certificate reference: {0}")]
    InvalidCertificateReference(String),

    /// Certificate reference or serial not present in the trust store
    #[error("Unknown certificate reference '{0}'")]
    UnknownCertificate(String),

    /// Public key material could not be imported
    #[error("Invalid public key: {0}")]
    InvalidKey(String),

    /// Signature bytes are not in a recognizable format
    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),

    /// Embedded certificate could not be parsed
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    /// Scanned barcode text contains a code point with no byte mapping
    #[error("Scan text contains unmappable code point U+{code:04X}")]
    InvalidScanText {
        /// Offending code point
        code: u32,
    },

    /// External lookup (profile, key, document validity) failed
    #[error("Lookup failed: {0}")]
    Lookup(String),
}

impl Error {
    /// Whether this error means the seal structure itself is broken,
    /// as opposed to the seal referencing something we do not know.
    pub fn is_malformed(&self) -> bool {
        !matches!(
            self,
            Error::UnknownProfile(_)
                | Error::UnknownTag(_)
                | Error::UnknownCertificate(_)
                | Error::Lookup(_)
        )
    }
}
