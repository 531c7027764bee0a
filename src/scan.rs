//! Scanned barcode text to seal bytes.
//!
//! Barcode scanning libraries hand the DataMatrix payload over as text in the
//! platform string encoding. Bytes in the 0x80..=0x9F block of the legacy
//! Windows-1252 code page arrive as their mapped Unicode code points (for
//! example 0x80 as U+20AC), so they have to be folded back to single bytes
//! before the decoder sees the buffer.

use crate::error::{Error, Result};

/// Fold a scanned payload string back into the raw seal byte buffer.
///
/// Code points below 0x100 pass through as-is; the fixed table below undoes
/// the Windows-1252 C1 remapping. Any other code point cannot come from a
/// seal payload and fails as malformed scan text.
pub fn scan_text_to_bytes(text: &str) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        if code < 0x100 {
            data.push(code as u8);
        } else {
            let b = remap_high_char(c).ok_or(Error::InvalidScanText { code })?;
            data.push(b);
        }
    }
    Ok(data)
}

/// Windows-1252 0x80..=0x9F block, Unicode side to byte side.
fn remap_high_char(c: char) -> Option<u8> {
    let b = match c {
        '\u{20AC}' => 0x80, // EURO SIGN
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let bytes = scan_text_to_bytes("ABC\u{00DC}").unwrap();
        assert_eq!(bytes, vec![0x41, 0x42, 0x43, 0xDC]);
    }

    #[test]
    fn test_euro_sign_maps_to_0x80() {
        let bytes = scan_text_to_bytes("\u{20AC}").unwrap();
        assert_eq!(bytes, vec![0x80]);
    }

    #[test]
    fn test_full_c1_block_roundtrip() {
        let text = "\u{201E}\u{2026}\u{2019}\u{0178}";
        let bytes = scan_text_to_bytes(text).unwrap();
        assert_eq!(bytes, vec![0x84, 0x85, 0x92, 0x9F]);
    }

    #[test]
    fn test_unmapped_code_point_fails() {
        match scan_text_to_bytes("\u{4E2D}") {
            Err(Error::InvalidScanText { code }) => assert_eq!(code, 0x4E2D),
            other => panic!("expected InvalidScanText, got {:?}", other),
        }
    }
}
