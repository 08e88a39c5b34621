// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the configuration dialect.
//!
//! Parses and re-serializes realistic mod configuration files, including
//! encoded input and a customized dialect.

use slotmod_rs::dialect::{
    Dialect, Document, Section, Value, parse, parse_with, serialize, serialize_with,
};
use slotmod_rs::utility::encoding::{Encoding, decode_text, encode_text};

const MOD_INI: &str = "\
; Astra body replacement
namespace = astra

[Constants]
global persist $active = 0
global $swap = 0

[KeySwap]
key = VK_F1
type = cycle
$swap = 0,1

[TextureOverrideBodyIB]
hash = ddd444
match_first_index = 0
ib = ResourceBodyIB
; outfit A
if $swap == 0
drawindexed = 3120, 0, 0
else
; outfit B
;drawindexed = 1800, 3120, 0
endif

[ResourceBodyIB]
type = Buffer
format = DXGI_FORMAT_R32_UINT
filename = AstraBodyA.ib
";

#[test]
fn dialect_realistic_file_roundtrip() {
    let doc = parse(MOD_INI);

    assert_eq!(doc.preamble, ["; Astra body replacement", "namespace = astra"]);
    let names: Vec<_> = doc.section_names().collect();
    assert_eq!(
        names,
        ["Constants", "KeySwap", "TextureOverrideBodyIB", "ResourceBodyIB"]
    );
    assert_eq!(
        doc.section("KeySwap").and_then(|s| s.text("$swap")),
        Some("0,1")
    );

    let draw = doc
        .section("TextureOverrideBodyIB")
        .and_then(|s| s.get("drawindexed"))
        .unwrap();
    assert_eq!(draw.texts(), ["3120, 0, 0"]);
    assert_eq!(draw.occurrences().len(), 2);
}

#[test]
fn dialect_decodes_bom_and_utf16() {
    let text = "[ResourceX]\r\nfilename = Körper.buf\r\n";

    for encoding in [Encoding::Utf8Bom, Encoding::Utf16Le] {
        let bytes = encode_text(text, encoding);
        let decoded = decode_text(&bytes);
        assert_eq!(decoded.encoding, encoding);

        let doc = parse(&decoded.text);
        assert_eq!(
            doc.section("ResourceX").and_then(|s| s.text("filename")),
            Some("Körper.buf")
        );
    }
}

#[test]
fn dialect_custom_primary_directive() {
    let text = "[S]\ndraw = 6, 0\ndraw = 6, 0\ndrawindexed = 6, 0, 0\ndrawindexed = 6, 0, 0\n";
    let dialect = Dialect {
        primary_directive: "draw".to_string(),
        ..Dialect::default()
    };

    insta::assert_snapshot!(serialize_with(&parse_with(text, &dialect), &dialect), @r"
    [S]
    draw = 6, 0
    drawindexed = 6, 0, 0
    drawindexed = 6, 0, 0
    ");

    insta::assert_snapshot!(serialize(&parse(text)), @r"
    [S]
    draw = 6, 0
    draw = 6, 0
    drawindexed = 6, 0, 0
    ");
}

#[test]
fn dialect_built_document_serializes() {
    let mut doc = Document::new();
    let mut section = Section::new();
    section.push("type", Value::Scalar("Buffer".to_string()));
    section.push("filename", Value::Scalar("AstraBodyPosition.buf".to_string()));
    doc.insert_section("ResourceAstraBodyPosition", section);

    let mut commands = Section::new();
    commands.push("run", Value::Scalar("CommandListA".to_string()));
    commands.push("run", Value::Scalar("CommandListB".to_string()));
    commands.push("clearrenderstate", Value::Bare);
    doc.insert_section("CommandListBody", commands);

    insta::assert_snapshot!(serialize(&doc), @r"
    [ResourceAstraBodyPosition]
    type = Buffer
    filename = AstraBodyPosition.buf

    [CommandListBody]
    run = CommandListA
    run = CommandListB
    clearrenderstate
    ");

    assert_eq!(serialize(&parse(&serialize(&doc))), serialize(&doc));
}
