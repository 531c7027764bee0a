//! Decoded seal data structures.

use chrono::NaiveDate;
use indexmap::IndexMap;

/// Magic constant opening every seal buffer.
pub const MAGIC: u8 = 0xDC;

/// Terminator tag closing the message zone and opening the signature zone.
pub const SIGNATURE_TAG: u8 = 0xFF;

/// Tag of the mandatory document-profile-number field.
pub const PROFILE_NR_TAG: u8 = 0x00;

/// Seal format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealVersion {
    /// Version 3: fixed 6-byte signer/certificate field
    V3,
    /// Version 4: variable-length certificate reference
    V4,
}

impl SealVersion {
    /// Numeric version as encoded in the header (raw byte + 1).
    pub fn number(&self) -> u8 {
        match self {
            SealVersion::V3 => 3,
            SealVersion::V4 => 4,
        }
    }
}

/// One decoded message-zone value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Alphanumeric or free text
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// Calendar date
    Date(NaiveDate),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Binary(b) => {
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            },
            FieldValue::Date(d) => write!(f, "{}", d.format("%d.%m.%Y")),
        }
    }
}

/// A message-zone field together with its profile-declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    /// Field name from the document profile
    pub name: String,
    /// Decoded value
    pub value: FieldValue,
}

/// A fully decoded seal. Immutable once constructed; the decoder only hands
/// this out after every zone parsed and the required-field check passed.
#[derive(Debug, Clone)]
pub struct DigitalSeal {
    /// Seal format version
    pub version: SealVersion,
    /// Issuing country code with '<' fill, e.g. "D<<"
    pub issuing_country: String,
    /// Four-character signer identifier
    pub signer_identifier: String,
    /// Certificate reference addressing the verification key
    pub certificate_reference: String,
    /// Date the sealed document was issued
    pub document_issue_date: NaiveDate,
    /// Date the signature was created
    pub signature_creation_date: NaiveDate,
    /// Document feature definition reference
    pub feature_definition_ref: u8,
    /// Document type category
    pub document_type_category: u8,
    /// Document profile number keying the message-zone schema
    pub doc_profile_nr: String,
    /// Message-zone fields in wire order, keyed by tag
    pub fields: IndexMap<u8, DecodedField>,
    /// Byte offset where signed content ends and the signature zone begins
    pub signature_offset: usize,
    /// Raw signature bytes
    pub signature: Vec<u8>,
}

impl DigitalSeal {
    /// Text value of a field, if present and textual.
    pub fn text_field(&self, tag: u8) -> Option<&str> {
        match self.fields.get(&tag) {
            Some(DecodedField {
                value: FieldValue::Text(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_numbers() {
        assert_eq!(SealVersion::V3.number(), 3);
        assert_eq!(SealVersion::V4.number(), 4);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("ABC 123".into()).to_string(), "ABC 123");
        assert_eq!(FieldValue::Binary(vec![0xDE, 0xAD]).to_string(), "dead");
        let date = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        assert_eq!(FieldValue::Date(date).to_string(), "25.03.2024");
    }
}
