// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use super::{SlotAssignment, SlotKey, SlotSpec, load_assignment_file, resolve};
use crate::schema::{AssetSchema, ComponentSchema, SlotKind, Variant};

fn body_schema() -> AssetSchema {
    let variant = |label: &str| Variant {
        label: label.to_string(),
        slots: BTreeMap::from([
            (SlotKind::IndexBuffer, None),
            (SlotKind::Texture("diffuse".to_string()), None),
        ]),
    };
    AssetSchema {
        asset_name: "Astra".to_string(),
        components: vec![
            ComponentSchema {
                name: "Body".to_string(),
                shared: SlotKind::STREAMS.iter().map(|k| (k.clone(), None)).collect(),
                variants: vec![variant("A"), variant("B")],
            },
            ComponentSchema {
                name: "Head".to_string(),
                shared: SlotKind::STREAMS.iter().map(|k| (k.clone(), None)).collect(),
                variants: vec![variant("")],
            },
        ],
    }
}

#[test]
fn test_assignment_blank_path_clears() {
    let mut assignment = SlotAssignment::new();
    let key = SlotKey::shared(0, SlotKind::Position);

    assert_eq!(assignment.assign(key.clone(), "vb0.assets"), None);
    assert_eq!(assignment.get(&key), Some("vb0.assets"));
    assert_eq!(
        assignment.assign(key.clone(), "  "),
        Some("vb0.assets".to_string())
    );
    assert!(assignment.is_empty());
}

#[test]
fn test_assignment_reset() {
    let mut assignment = SlotAssignment::new();
    assignment.assign(SlotKey::shared(0, SlotKind::Blend), "vb2.buf");
    assignment.assign(SlotKey::variant(0, SlotKind::IndexBuffer, "A"), "ib.buf");
    assert_eq!(assignment.len(), 2);

    assignment.reset();
    assert!(assignment.is_empty());
}

#[test]
fn test_resolve_shared_position() {
    let schema = body_schema();
    let mut assignment = SlotAssignment::new();
    assignment.assign(SlotKey::shared(0, SlotKind::Position), "vb0.assets");

    let resolved = resolve(&schema.components, &assignment, "Astra");

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].logical_id, "AstraBodyPosition");
    assert_eq!(resolved[0].source, "vb0.assets");
}

#[test]
fn test_resolve_variant_ids() {
    let schema = body_schema();
    let mut assignment = SlotAssignment::new();
    assignment.assign(SlotKey::variant(0, SlotKind::IndexBuffer, "B"), "ib1.assets");
    assignment.assign(
        SlotKey::variant(0, SlotKind::Texture("diffuse".to_string()), "A"),
        "d.dds",
    );
    assignment.assign(SlotKey::variant(1, SlotKind::IndexBuffer, ""), "head.ib");

    let ids: Vec<_> = resolve(&schema.components, &assignment, "Astra")
        .into_iter()
        .map(|slot| slot.logical_id)
        .collect();

    assert_eq!(ids, ["AstraBodyADiffuse", "AstraBodyB", "AstraHead"]);
}

#[test]
fn test_resolve_follows_schema_order_and_skips_unknown() {
    let schema = body_schema();
    let mut assignment = SlotAssignment::new();
    assignment.assign(SlotKey::shared(1, SlotKind::Blend), "h2.buf");
    assignment.assign(SlotKey::shared(0, SlotKind::Texcoord), "b1.buf");
    assignment.assign(SlotKey::shared(0, SlotKind::Position), "b0.buf");
    assignment.assign(SlotKey::variant(0, SlotKind::IndexBuffer, "Z"), "nope.ib");

    let ids: Vec<_> = resolve(&schema.components, &assignment, "X")
        .into_iter()
        .map(|slot| slot.logical_id)
        .collect();

    assert_eq!(ids, ["XBodyPosition", "XBodyTexcoord", "XHeadBlend"]);
}

#[test]
fn test_slot_spec_parse() {
    let spec: SlotSpec = "Body/A:ib=sub/ib0.assets".parse().unwrap();
    assert_eq!(spec.component, "Body");
    assert_eq!(spec.variant.as_deref(), Some("A"));
    assert_eq!(spec.kind, SlotKind::IndexBuffer);
    assert_eq!(spec.path, "sub/ib0.assets");
    assert_eq!(spec.to_string(), "Body/A:ib=sub/ib0.assets");

    assert!("Body=vb0.buf".parse::<SlotSpec>().is_err());
    assert!(":position=vb0.buf".parse::<SlotSpec>().is_err());
    assert!("Body:normal=vb0.buf".parse::<SlotSpec>().is_err());
}

#[test]
fn test_slot_spec_key() {
    let schema = body_schema();

    let shared: SlotSpec = "Body:position=vb0.assets".parse().unwrap();
    assert_eq!(
        shared.key(&schema).unwrap(),
        SlotKey::shared(0, SlotKind::Position)
    );

    let only_variant: SlotSpec = "1:ib=head.ib".parse().unwrap();
    assert_eq!(
        only_variant.key(&schema).unwrap(),
        SlotKey::variant(1, SlotKind::IndexBuffer, "")
    );

    let ambiguous: SlotSpec = "Body:ib=ib.assets".parse().unwrap();
    assert!(ambiguous.key(&schema).is_err());

    let shared_with_variant: SlotSpec = "Body/A:blend=vb2.buf".parse().unwrap();
    assert!(shared_with_variant.key(&schema).is_err());

    let unknown: SlotSpec = "Tail:position=x.buf".parse().unwrap();
    assert!(unknown.key(&schema).is_err());
}

#[test]
fn test_load_assignment_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("assign.json");
    std::fs::write(
        &path,
        r#"{"assignments": [
            {"component": "Body", "variant": "A", "slot": "ib", "file": "ib0.assets"},
            {"component": 0, "slot": "position", "file": "vb0.assets"}
        ]}"#,
    )
    .unwrap();

    let specs = load_assignment_file(&path).unwrap();
    let schema = body_schema();
    let mut assignment = SlotAssignment::new();
    for spec in &specs {
        spec.apply(&schema, &mut assignment).unwrap();
    }

    assert_eq!(
        assignment.get(&SlotKey::variant(0, SlotKind::IndexBuffer, "A")),
        Some("ib0.assets")
    );
    assert_eq!(
        assignment.get(&SlotKey::shared(0, SlotKind::Position)),
        Some("vb0.assets")
    );
}

#[test]
fn test_slot_spec_parse_texture_role() {
    let spec: SlotSpec = "Body/A:texture:diffuse=textures/body.dds".parse().unwrap();
    assert_eq!(spec.variant.as_deref(), Some("A"));
    assert_eq!(spec.kind, SlotKind::Texture("diffuse".to_string()));
    assert_eq!(spec.to_string(), "Body/A:texture:diffuse=textures/body.dds");
}
