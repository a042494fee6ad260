use waku_board_patch::env::FlagScope;
use waku_board_patch::hwid::HwidPair;
use waku_board_patch::operation::PatchEvent;
use waku_board_patch::ports::DetectedPort;

use super::{format_port_line, json, port_to_value};

#[test]
fn json_event_has_schema_and_event() {
    let ev = json::patch_event_to_json(PatchEvent::FlagsAppended {
        scope: FlagScope::Cxx,
        flags: vec!["-Wno-volatile".to_string(), "-fpermissive".to_string()],
        total: 2,
    });
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v.get("schema").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(
        v.get("event").and_then(|v| v.as_str()),
        Some("flags_appended")
    );
    assert_eq!(v.get("scope").and_then(|v| v.as_str()), Some("cxxflags"));
    assert_eq!(v.get("total").and_then(|v| v.as_u64()), Some(2));
}

#[test]
fn hwids_set_event_carries_manifest_literals() {
    let ev = json::patch_event_to_json(PatchEvent::HwidsSet {
        key: "build.hwids".to_string(),
        pairs: vec![HwidPair::from_ids(0x303A, 0x82E5)],
    });
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v.get("event").and_then(|v| v.as_str()), Some("hwids_set"));
    assert_eq!(v.get("hwids"), Some(&serde_json::json!([["0x303A", "0x82E5"]])));
}

#[test]
fn port_lines_and_values_mark_matches() {
    let p = DetectedPort {
        port_name: "COM6".to_string(),
        vid: 0x303A,
        pid: 0x82E5,
        serial_number: None,
        manufacturer: None,
        product: Some("WaKu Controller".to_string()),
    };

    let line = format_port_line(1, &p, true);
    assert!(line.contains("serial:COM6"));
    assert!(line.contains("303A:82E5"));
    assert!(line.contains(" *"));

    let v = port_to_value(1, &p, true);
    assert_eq!(v.get("matched"), Some(&serde_json::Value::Bool(true)));
    assert_eq!(v.get("index").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(
        v.get("port_id").and_then(|v| v.as_str()),
        Some("serial:COM6")
    );
}
