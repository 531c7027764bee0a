//! C40 text decoding.
//!
//! Seal header fields and alphanumeric message values use a base-40 packing
//! that stores up to three characters of a restricted alphabet in two bytes
//! (Annex B of BSI TR-03137 part 1). An escape pair with lead byte 0xFE
//! carries one arbitrary character as `second byte - 1`.
//!
//! Decode-only: the verification engine never re-encodes.

use crate::cursor::ByteCursor;
use crate::error::Result;

/// Lead byte marking an escape pair.
pub const ESCAPE: u8 = 0xFE;

/// Decode `len` bytes (even count) of C40 data from the cursor.
pub fn decode(cursor: &mut ByteCursor<'_>, len: usize) -> Result<String> {
    let mut text = String::new();
    let mut consumed = 0;
    while consumed < len {
        let b1 = cursor.read_u8()?;
        let b2 = cursor.read_u8()?;
        consumed += 2;
        if b1 == ESCAPE {
            text.push(b2.saturating_sub(1) as char);
            continue;
        }
        let v16 = u16::from(b1) * 256 + u16::from(b2);
        // Pair value 0 is outside the encodable range; saturate instead of
        // underflowing so a garbled pair decodes as fill rather than panicking.
        let v = v16.saturating_sub(1);
        let u1 = v / 1600;
        let u2 = (v - u1 * 1600) / 40;
        let u3 = v - u1 * 1600 - u2 * 40;
        text.push(digit_to_char(u1));
        text.push(digit_to_char(u2));
        if u3 != 0 {
            text.push(digit_to_char(u3));
        }
    }
    Ok(text)
}

/// Map a single C40 digit to its character.
///
/// Digits 4..=13 are '0'..='9', 14..=39 are 'A'..='Z'. Everything else,
/// notably the shift digits 0..=3, decodes as a space.
fn digit_to_char(digit: u16) -> char {
    match digit {
        4..=13 => (b'0' + (digit - 4) as u8) as char,
        14..=39 => (b'A' + (digit - 14) as u8) as char,
        _ => ' ',
    }
}
