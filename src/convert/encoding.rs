//! Source decoding.
//!
//! Exports come out of different spreadsheet tools: UTF-8 with or without BOM, and
//! sometimes UTF-16 ("Unicode text"). Everything ends up as a Rust [String].
use log::warn;

use crate::error::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Number of bytes looked at when sniffing the delimiter.
const SNIFF_LEN: usize = 2048;

/// Decode raw file content.
///
/// BOM-marked UTF-16 is decoded, a UTF-8 BOM is stripped, anything else must be UTF-8.
/// With `lossy`, invalid sequences are replaced by U+FFFD instead of failing.
pub fn decode(bytes: &[u8], lossy: bool) -> Result<String, Error> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return decode_utf8(rest, lossy);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes, lossy);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes, lossy);
    }
    decode_utf8(bytes, lossy)
}

fn decode_utf8(bytes: &[u8], lossy: bool) -> Result<String, Error> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(e) if lossy => {
            warn!(
                "invalid UTF-8 at byte {}, replacing invalid sequences",
                e.valid_up_to()
            );
            Ok(String::from_utf8_lossy(bytes).into_owned())
        }
        Err(e) => Err(Error::Encoding(format!(
            "invalid UTF-8 at byte {}",
            e.valid_up_to()
        ))),
    }
}

fn decode_utf16(bytes: &[u8], to_u16: fn([u8; 2]) -> u16, lossy: bool) -> Result<String, Error> {
    if bytes.len() % 2 != 0 && !lossy {
        return Err(Error::Encoding("odd number of bytes in UTF-16 input".to_string()));
    }

    let units = bytes.chunks_exact(2).map(|c| to_u16([c[0], c[1]]));
    let mut out = String::with_capacity(bytes.len() / 2);
    let mut nb_invalid = 0;
    for c in char::decode_utf16(units) {
        match c {
            Ok(c) => out.push(c),
            Err(_) if lossy => {
                nb_invalid += 1;
                out.push(char::REPLACEMENT_CHARACTER);
            }
            Err(e) => {
                return Err(Error::Encoding(format!(
                    "unpaired surrogate {:#x} in UTF-16 input",
                    e.unpaired_surrogate()
                )))
            }
        }
    }

    // dangling byte of an odd-sized input
    if bytes.len() % 2 != 0 {
        nb_invalid += 1;
        out.push(char::REPLACEMENT_CHARACTER);
    }

    if nb_invalid > 0 {
        warn!("replaced {} invalid UTF-16 sequences", nb_invalid);
    }
    Ok(out)
}

/// Guess the delimiter of a tabular text: tab unless commas outnumber tabs.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample = &text.as_bytes()[..text.len().min(SNIFF_LEN)];
    let tabs = sample.iter().filter(|b| **b == b'\t').count();
    let commas = sample.iter().filter(|b| **b == b',').count();
    if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_with_bom() {
        let bytes = [UTF8_BOM, "id,lemma".as_bytes()].concat();
        assert_eq!(decode(&bytes, false).unwrap(), "id,lemma");
    }

    #[test]
    fn utf16() {
        let text = "id\tšāh";
        let le: Vec<u8> = UTF16LE_BOM
            .iter()
            .copied()
            .chain(text.encode_utf16().flat_map(|u| u.to_le_bytes()))
            .collect();
        let be: Vec<u8> = UTF16BE_BOM
            .iter()
            .copied()
            .chain(text.encode_utf16().flat_map(|u| u.to_be_bytes()))
            .collect();
        assert_eq!(decode(&le, false).unwrap(), text);
        assert_eq!(decode(&be, false).unwrap(), text);
    }

    #[test]
    fn invalid_utf8() {
        let bytes = b"ab\xffcd";
        assert!(matches!(decode(bytes, false), Err(Error::Encoding(_))));
        assert_eq!(decode(bytes, true).unwrap(), "ab\u{fffd}cd");
    }

    #[test]
    fn sniff() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter("a\tb,c\n1\t2\t3"), b'\t');
        assert_eq!(sniff_delimiter(""), b'\t');
    }
}
