//! Binary seal decoder.
//!
//! A strictly sequential, single-pass state machine over the seal buffer:
//! header, then the profile-driven message zone, then the signature zone.
//! There is no backtracking; every structural violation fails immediately
//! with the specific error for that violation.

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::debug;

use crate::c40;
use crate::cursor::ByteCursor;
use crate::error::{Error, Result};
use crate::profile::{FieldType, ProfileResolver};
use crate::seal::types::{
    DecodedField, DigitalSeal, FieldValue, SealVersion, MAGIC, PROFILE_NR_TAG, SIGNATURE_TAG,
};

/// Decoder for the binary seal format.
///
/// Holds no state between calls; all decode state lives on the stack of
/// [`decode`](SealDecoder::decode) and only a complete [`DigitalSeal`] is
/// ever returned.
pub struct SealDecoder<'r> {
    profiles: &'r dyn ProfileResolver,
}

impl<'r> SealDecoder<'r> {
    /// Create a decoder resolving profiles through `profiles`.
    pub fn new(profiles: &'r dyn ProfileResolver) -> Self {
        Self { profiles }
    }

    /// Decode a seal byte buffer into a [`DigitalSeal`].
    pub fn decode(&self, data: &[u8]) -> Result<DigitalSeal> {
        let mut cursor = ByteCursor::new(data);

        // Header
        let magic = cursor.read_u8()?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }
        let version_nr = cursor.read_u8()?.wrapping_add(1);
        let version = match version_nr {
            3 => SealVersion::V3,
            4 => SealVersion::V4,
            other => return Err(Error::UnsupportedVersion(other)),
        };
        // ICAO-style fill: decoded spaces stand for '<' in the country code
        let issuing_country = c40::decode(&mut cursor, 2)?.replace(' ', "<");
        if issuing_country != "D<<" {
            return Err(Error::InvalidCountry(issuing_country));
        }
        let (signer_identifier, certificate_reference) =
            decode_signer_and_reference(&mut cursor, version)?;
        let document_issue_date = decode_date(&mut cursor)?;
        let signature_creation_date = decode_date(&mut cursor)?;
        let feature_definition_ref = cursor.read_u8()?;
        let document_type_category = cursor.read_u8()?;
        debug!(
            "seal header: version {}, signer {}, certificate {}",
            version.number(),
            signer_identifier,
            certificate_reference
        );

        // Message zone. The profile number comes first, everything after it
        // is dictated by the resolved schema.
        expect_tag(&mut cursor, PROFILE_NR_TAG)?;
        let len = read_length(&mut cursor)?;
        let doc_profile_nr = c40::decode(&mut cursor, len)?;

        let schema = self
            .profiles
            .resolve(&doc_profile_nr)?
            .ok_or_else(|| Error::UnknownProfile(doc_profile_nr.clone()))?;

        let mut fields: IndexMap<u8, DecodedField> = IndexMap::new();
        loop {
            let tag = cursor.peek_u8()?;
            if tag == SIGNATURE_TAG {
                break;
            }
            let entry = schema.entry(tag).ok_or(Error::UnknownTag(tag))?;
            cursor.read_u8()?;
            let len = read_length(&mut cursor)?;
            let value = match entry.field_type {
                FieldType::Alphanum => FieldValue::Text(c40::decode(&mut cursor, len)?),
                FieldType::Text | FieldType::MultilineText => {
                    FieldValue::Text(String::from_utf8_lossy(cursor.read_bytes(len)?).into_owned())
                },
                FieldType::Binary => FieldValue::Binary(cursor.read_bytes(len)?.to_vec()),
                FieldType::Date => {
                    if len != 3 {
                        return Err(Error::InvalidDateLength(len));
                    }
                    FieldValue::Date(decode_date(&mut cursor)?)
                },
            };
            debug!("seal field 0x{:02x} ({}): {}", tag, entry.name, value);
            fields.insert(
                tag,
                DecodedField {
                    name: entry.name.clone(),
                    value,
                },
            );
        }
        for entry in schema.required() {
            if !fields.contains_key(&entry.tag) {
                return Err(Error::MissingRequiredField {
                    tag: entry.tag,
                    name: entry.name.clone(),
                });
            }
        }

        // Signature zone. Everything before this offset is the signed content.
        let signature_offset = cursor.position();
        expect_tag(&mut cursor, SIGNATURE_TAG)?;
        let len = read_length(&mut cursor)?;
        let signature = cursor.read_bytes(len)?.to_vec();

        Ok(DigitalSeal {
            version,
            issuing_country,
            signer_identifier,
            certificate_reference,
            document_issue_date,
            signature_creation_date,
            feature_definition_ref,
            document_type_category,
            doc_profile_nr,
            fields,
            signature_offset,
            signature,
        })
    }
}

/// Decode the version-dependent signer identifier and certificate reference.
fn decode_signer_and_reference(
    cursor: &mut ByteCursor<'_>,
    version: SealVersion,
) -> Result<(String, String)> {
    match version {
        SealVersion::V3 => {
            // Fixed 6-byte field: 4 signer characters, rest is the reference
            let signer_cert = c40::decode(cursor, 6)?;
            let (signer, reference) = split_chars(&signer_cert, 4);
            Ok((signer, reference))
        },
        SealVersion::V4 => {
            // 4-byte field: 4 signer characters plus the reference length,
            // then a length-dependent C40 field truncated to that length
            let signer_len = c40::decode(cursor, 4)?;
            let (signer, len_digits) = split_chars(&signer_len, 4);
            let len: usize = len_digits.trim().parse().map_err(|_| {
                Error::InvalidCertificateReference(format!(
                    "length digits '{}' are not a number",
                    len_digits
                ))
            })?;
            let packed = c40::decode(cursor, (len * 2).div_ceil(3))?;
            let reference: String = packed.chars().take(len).collect();
            Ok((signer, reference))
        },
    }
}

/// Split a string after `n` characters.
fn split_chars(s: &str, n: usize) -> (String, String) {
    let head: String = s.chars().take(n).collect();
    let tail: String = s.chars().skip(n).collect();
    (head, tail)
}

/// Decode a 3-byte packed date.
///
/// The 24-bit value is the decimal concatenation month|day|year (two digits
/// each for month and day, four for the year).
fn decode_date(cursor: &mut ByteCursor<'_>) -> Result<NaiveDate> {
    let v24 = cursor.read_u24_be()?;
    let year = (v24 % 10_000) as i32;
    let month = (v24 / 1_000_000) % 100;
    let day = (v24 / 10_000) % 100;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidDate(v24))
}

/// Consume a tag byte and require it to be `expected`.
fn expect_tag(cursor: &mut ByteCursor<'_>, expected: u8) -> Result<()> {
    let found = cursor.read_u8()?;
    if found != expected {
        return Err(Error::UnexpectedTag { expected, found });
    }
    Ok(())
}

/// Decode a length field.
///
/// One byte up to 0x7F is the length itself; 0x81/0x82/0x83 announce one,
/// two or three following length bytes, combined big-endian. Anything else
/// is an invalid encoding.
pub(crate) fn read_length(cursor: &mut ByteCursor<'_>) -> Result<usize> {
    let b = cursor.read_u8()?;
    match b {
        0x00..=0x7F => Ok(b as usize),
        0x81 => Ok(cursor.read_u8()? as usize),
        0x82 => Ok(cursor.read_u16_be()? as usize),
        0x83 => Ok(cursor.read_u24_be()? as usize),
        other => Err(Error::InvalidLengthEncoding(other)),
    }
}
