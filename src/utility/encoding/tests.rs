// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Encoding, bytes_to_utf8, decode_text, detect, encode_text};

#[test]
fn test_utf8_passthrough() {
    let input = "[TextureOverride세계]";
    let result = bytes_to_utf8(Encoding::Utf8, input.as_bytes());
    assert_eq!(result, input);
}

#[test]
fn test_windows_1252_conversion() {
    // "café" in Windows-1252: 0x63 0x61 0x66 0xe9
    let result = bytes_to_utf8(Encoding::Acp, b"caf\xe9");
    insta::assert_snapshot!(result, @"café");
}

#[test]
fn test_utf16_le_conversion() {
    let result = bytes_to_utf8(Encoding::Utf16Le, b"\xFF\xFEH\x00i\x00");
    insta::assert_snapshot!(result, @"Hi");
}

#[test]
fn test_detect() {
    assert_eq!(detect(b"[Constants]\n"), Encoding::Utf8);
    assert_eq!(detect(b"\xEF\xBB\xBF[Constants]"), Encoding::Utf8Bom);
    assert_eq!(detect(b"\xFF\xFE[\x00"), Encoding::Utf16Le);
    assert_eq!(detect(b"caf\xe9"), Encoding::Acp);
    assert_eq!(detect(b""), Encoding::Utf8);
}

#[test]
fn test_decode_strips_bom() {
    let decoded = decode_text(b"\xEF\xBB\xBF[Present]\n");
    assert_eq!(decoded.text, "[Present]\n");
    assert_eq!(decoded.encoding, Encoding::Utf8Bom);
}

#[test]
fn test_encode_restores_original_bytes() {
    let samples: [&[u8]; 4] = [
        b"[A]\nx = 1\n",
        b"\xEF\xBB\xBF[A]\nx = 1\n",
        b"\xFF\xFE[\x00A\x00]\x00",
        b"; caf\xe9\n",
    ];
    for bytes in samples {
        let decoded = decode_text(bytes);
        assert_eq!(encode_text(&decoded.text, decoded.encoding), bytes);
    }
}
