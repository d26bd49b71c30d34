use approx::assert_abs_diff_eq;
use hashbrown::HashMap;
use serde_json::json;
use vivaz_dynamic_core::{ManualHost, Schema, SchemaError, Value, Variable};
use vivaz_test_fixtures::exports;

fn imported(name: &str) -> Schema {
    let text = exports::text(name).expect("export fixture");
    let mut schema = Schema::new();
    schema.import(&text).expect("fixture should import");
    schema
}

#[test]
fn disc_fixture_resolves_recorded_values() {
    let mut schema = imported("disc");
    let expected: HashMap<String, Value> = exports::values("disc")
        .unwrap()
        .expect("disc records values");
    let mut host = ManualHost::new(0);
    for (path, want) in &expected {
        assert_eq!(
            schema.value(path, &mut host).unwrap().as_ref(),
            Some(want),
            "{path}"
        );
    }
}

#[test]
fn disc_fixture_exports_back_to_itself() {
    let text = exports::text("disc").unwrap();
    let schema = imported("disc");
    assert_eq!(schema.export("").unwrap(), text.trim_end());
}

#[test]
fn export_is_deterministic_for_insertion_order() {
    let build = || {
        let mut s = Schema::new();
        s.define(&json!({
            "b": 1,
            "a": { "mode": "rgb", "r": 16, "g": 32, "b": 48 },
            "nested": { "z": "last", "y": false },
            "spin": { "method": "cycle", "valueFrom": 0, "valueTo": 360 }
        }))
        .unwrap();
        s
    };
    let first = build().export("").unwrap();
    assert_eq!(first, build().export("").unwrap());
    let b = first.find("\tb\t").unwrap();
    let a = first.find("\ta\t").unwrap();
    assert!(b < a);
}

#[test]
fn reimported_static_attributes_evaluate_identically() {
    let mut original = Schema::new();
    original
        .define(&json!({
            "label": "it's a 'quote'",
            "weight": 0.125,
            "on": true,
            "fill": { "mode": "rgb", "r": 12, "g": 34, "b": 56, "a": 78 },
            "pos": { "type": "vector", "data": { "x": -1.5, "z": 4 } },
            "size": { "method": "fixed", "value": 9 },
            "stroke": { "cap": "square", "miter": 4 }
        }))
        .unwrap();
    let text = original.export("").unwrap();

    let mut copy = Schema::new();
    copy.import(&text).unwrap();
    assert_eq!(copy.export("").unwrap(), text);

    let mut host = ManualHost::new(1);
    for path in [
        "label",
        "weight",
        "on",
        "fill",
        "pos",
        "size",
        "stroke.cap",
        "stroke.miter",
    ] {
        assert_eq!(
            original.value(path, &mut host).unwrap(),
            copy.value(path, &mut host).unwrap(),
            "{path}"
        );
    }
}

#[test]
fn nested_nodes_survive_reimport() {
    let mut original = Schema::new();
    original
        .define(&json!({
            "offset": { "x": 1, "y": 2 },
            "brush": { "color": "#ff0000" },
            "at": [3, 4]
        }))
        .unwrap();
    let text = original.export("").unwrap();

    let mut copy = Schema::new();
    copy.import(&text).unwrap();
    assert_eq!(copy.export("").unwrap(), text);
    assert!(copy.node("offset").is_some());
    assert!(copy.node("brush").is_some());
    assert!(copy.node("at").is_none());

    let mut host = ManualHost::new(0);
    for path in ["offset.x", "offset.y", "brush.color", "at"] {
        let before = original.value(path, &mut host).unwrap();
        assert!(before.is_some(), "{path}");
        assert_eq!(before, copy.value(path, &mut host).unwrap(), "{path}");
    }
}

#[test]
fn exported_variables_reimport_as_variables() {
    let mut schema = imported("orbit");
    let mut host = ManualHost::new(0);
    host.set_time(250.0);
    let speed = schema
        .value("speed", &mut host)
        .unwrap()
        .and_then(|v| v.as_number())
        .unwrap();
    assert_abs_diff_eq!(speed, 90.0, epsilon = 1e-9);
    assert!(schema.value("tint", &mut host).unwrap().unwrap().is_color());
}

#[test]
fn variable_export_lists_its_configuration() {
    let mut var = Variable::new();
    var.map(&[
        Value::Text("span".into()),
        Value::Number(0.0),
        Value::Number(360.0),
        Value::Number(1000.0),
    ]);
    assert_eq!(
        var.export("").unwrap(),
        "{\n\tmethod\t:\t'span',\n\tvalueFrom\t:\t0,\n\tvalueTo\t:\t360,\n\tmodulator\t:\t1000,\n}"
    );
}

#[test]
fn malformed_text_is_rejected() {
    let mut schema = Schema::new();
    let err = schema.import("{ size : }").unwrap_err();
    assert!(matches!(err, SchemaError::Import(_)));
    assert!(schema.is_empty());
}
