// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text encoding detection for mod configuration files (UTF-8 ↔ CP1252/UTF-16).
//!
//! ```text
//! bytes --detect()--> Encoding --decode_text()--> DecodedText (UTF-8)
//!                                                      |
//!                  bytes <--encode_text(encoding)------+
//! ```
//!
//! Uses `encoding_rs`. Mods are written by hand in many editors, so files are
//! written back in the encoding (and BOM) they were read with.

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";

/// Encodings a configuration file may be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Plain UTF-8 without BOM
    #[default]
    Utf8,
    /// UTF-8 prefixed with `EF BB BF`
    Utf8Bom,
    /// UTF-16 Little Endian prefixed with `FF FE`
    Utf16Le,
    /// Active Code Page - Windows-1252 (bytes that are not valid UTF-8)
    Acp,
}

/// Decoded file content together with the encoding it was stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: Encoding,
}

/// Detects the encoding of raw file bytes.
///
/// BOMs win; otherwise valid UTF-8 is UTF-8 and anything else is treated as
/// Windows-1252.
#[must_use]
pub fn detect(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(UTF8_BOM) {
        Encoding::Utf8Bom
    } else if bytes.starts_with(UTF16_LE_BOM) {
        Encoding::Utf16Le
    } else if std::str::from_utf8(bytes).is_ok() {
        Encoding::Utf8
    } else {
        Encoding::Acp
    }
}

/// Converts bytes from the given encoding to UTF-8, dropping any BOM.
///
/// Invalid sequences are replaced with U+FFFD.
///
/// # Example
/// ```
/// use slotmod_rs::utility::encoding::{bytes_to_utf8, Encoding};
///
/// let cp1252_bytes = b"caf\xe9";
/// assert_eq!(bytes_to_utf8(Encoding::Acp, cp1252_bytes), "café");
/// ```
#[must_use]
pub fn bytes_to_utf8(encoding: Encoding, bytes: &[u8]) -> Cow<'_, str> {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes),
        Encoding::Utf8Bom => {
            String::from_utf8_lossy(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes))
        }
        Encoding::Utf16Le => {
            utf16_le_to_utf8(bytes.strip_prefix(UTF16_LE_BOM).unwrap_or(bytes))
        }
        Encoding::Acp => {
            let (result, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            result
        }
    }
}

/// Detects the encoding and decodes in one step.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    let encoding = detect(bytes);
    DecodedText {
        text: bytes_to_utf8(encoding, bytes).into_owned(),
        encoding,
    }
}

/// Encodes UTF-8 text back into the given encoding, restoring its BOM.
#[must_use]
pub fn encode_text(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => text.as_bytes().to_vec(),
        Encoding::Utf8Bom => {
            let mut out = UTF8_BOM.to_vec();
            out.extend_from_slice(text.as_bytes());
            out
        }
        Encoding::Utf16Le => {
            let mut out = UTF16_LE_BOM.to_vec();
            for unit in text.encode_utf16() {
                out.extend_from_slice(&unit.to_le_bytes());
            }
            out
        }
        Encoding::Acp => {
            let (bytes, _encoding, _had_errors) = WINDOWS_1252.encode(text);
            bytes.into_owned()
        }
    }
}

/// Converts UTF-16 LE bytes to UTF-8.
fn utf16_le_to_utf8(bytes: &[u8]) -> Cow<'static, str> {
    // Odd trailing byte is ignored
    let len = bytes.len() & !1;
    if len == 0 {
        return Cow::Borrowed("");
    }

    let units: Vec<u16> = bytes[..len]
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    Cow::Owned(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests;
