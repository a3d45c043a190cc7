use jsonbourne::{jsonify, unjsonify, DumpOpts, JsonObj, JsonObjError, JsonValue};
use serde_json::json;

fn nested() -> JsonObj {
    JsonObj::from_value(json!({
        "a": {"b": {"c": 1}},
        "c": 2
    }))
    .expect("object")
}

#[test]
fn eject_round_trips_through_serde_value() {
    let source = json!({
        "key": "value",
        "list": [1, 2, 3, 4, 5],
        "dt": "1970-01-02T02:03:04.000005",
        "sub": {"b": 3, "key": "val", "a": 1}
    });
    let obj = JsonObj::from_value(source.clone()).expect("object");
    assert_eq!(obj.eject(), source);
    assert_eq!(obj, source);
}

#[test]
fn from_value_rejects_non_object_roots() {
    for bad in [json!([1, 2]), json!("str"), json!(7), json!(null), json!(true)] {
        assert!(matches!(
            JsonObj::from_value(bad),
            Err(JsonObjError::NotAnObject(_))
        ));
    }
}

#[test]
fn set_rejects_reserved_name_insert_accepts_it() {
    let mut obj = JsonObj::new();
    match obj.set("items", 1) {
        Err(JsonObjError::ReservedKey(key)) => assert_eq!(key, "items"),
        other => panic!("expected ReservedKey, got {other:?}"),
    }
    assert!(!obj.contains("items"));

    obj.insert("items", 1);
    assert_eq!(obj["items"].as_i64(), Some(1));
    // the method keeps winning for attribute-style (method) access
    let pairs: Vec<(&String, &JsonValue)> = obj.items().collect();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "items");
}

#[test]
fn dot_lookup_walks_nested_objects() {
    let obj = nested();
    assert_eq!(obj.dot_lookup("a.b.c").expect("found").as_i64(), Some(1));
    assert_eq!(obj.lookup("a.b.c").expect("found").as_i64(), Some(1));
    assert_eq!(obj.lookup("c").expect("found").as_i64(), Some(2));
}

#[test]
fn dot_lookup_errors_name_the_reached_prefix() {
    let obj = nested();
    let err = obj.dot_lookup("a.b.d").expect_err("missing");
    let msg = err.to_string();
    assert!(msg.contains("a.b.d"), "{msg}");
    assert!(msg.contains("a.b"), "{msg}");

    // descending into a scalar
    let err = obj.dot_lookup("a.b.c.d").expect_err("scalar");
    assert!(err.to_string().contains("a.b.c"), "{err}");

    // missing top-level key
    assert!(obj.dot_lookup("zzz.x").is_err());
}

#[test]
fn dot_keys_yields_leaf_paths_in_insertion_order() {
    let obj = nested();
    let paths: Vec<Vec<String>> = obj.dot_keys().collect();
    assert_eq!(
        paths,
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["c".to_string()],
        ]
    );
    // restartable
    assert_eq!(obj.dot_keys().count(), 2);
}

#[test]
fn dot_items_pairs_paths_with_values() {
    let obj = nested();
    let items: Vec<(Vec<String>, i64)> = obj
        .dot_items()
        .map(|(path, v)| (path, v.as_i64().expect("leaf int")))
        .collect();
    assert_eq!(
        items,
        vec![
            (vec!["a".to_string(), "b".to_string(), "c".to_string()], 1),
            (vec!["c".to_string()], 2),
        ]
    );
}

#[test]
fn dot_keys_skip_empty_sub_objects() {
    let obj = JsonObj::from_value(json!({"empty": {}, "x": 1})).expect("object");
    assert_eq!(obj.dot_keys_list(false), vec!["x"]);
}

#[test]
fn dot_keys_list_sorts_on_request() {
    let obj = JsonObj::from_value(json!({"b": 1, "a": {"z": 1, "a": 2}})).expect("object");
    assert_eq!(obj.dot_keys_list(false), vec!["b", "a.z", "a.a"]);
    assert_eq!(obj.dot_keys_list(true), vec!["a.a", "a.z", "b"]);
    let set = obj.dot_keys_set();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a.a", "a.z", "b"]);
}

#[test]
fn filter_none_drops_null_values() {
    let obj = JsonObj::from_value(json!({
        "falsey_dict": {},
        "falsey_list": [],
        "falsey_string": "",
        "is_false": false,
        "a": null,
        "b": 2,
        "c": {"d": "herm", "e": null, "falsey_dict": {}}
    }))
    .expect("object");

    let flat = obj.filter_none(false);
    assert_eq!(
        flat.eject(),
        json!({
            "falsey_dict": {},
            "falsey_list": [],
            "falsey_string": "",
            "is_false": false,
            "b": 2,
            "c": {"d": "herm", "e": null, "falsey_dict": {}}
        })
    );

    let deep = obj.filter_none(true);
    assert_eq!(
        deep.eject(),
        json!({
            "falsey_dict": {},
            "falsey_list": [],
            "falsey_string": "",
            "is_false": false,
            "b": 2,
            "c": {"d": "herm", "falsey_dict": {}}
        })
    );
}

#[test]
fn filter_false_drops_falsy_values() {
    let obj = JsonObj::from_value(json!({
        "falsey_dict": {},
        "falsey_list": [],
        "falsey_string": "",
        "is_false": false,
        "a": null,
        "b": 2,
        "c": {"d": "herm", "e": null, "falsey_dict": {}}
    }))
    .expect("object");

    let flat = obj.filter_false(false);
    assert_eq!(
        flat.eject(),
        json!({
            "b": 2,
            "c": {"d": "herm", "e": null, "falsey_dict": {}}
        })
    );

    let deep = obj.filter_false(true);
    assert_eq!(
        deep.eject(),
        json!({
            "b": 2,
            "c": {"d": "herm"}
        })
    );
}

#[test]
fn contains_partitions_on_first_dot() {
    let obj = JsonObj::from_value(json!({
        "uno": 1,
        "sub": {"a": 1, "b": 2, "c": [3, 4, 5], "d": "a_string"}
    }))
    .expect("object");

    assert!(obj.contains("uno"));
    assert!(!obj.contains("dos"));
    assert!(obj.contains("sub.a"));
    assert!(!obj.contains("sub.d.a"));
    assert!(!obj.contains("sub.c.0"));
}

#[test]
fn json_string_round_trip_preserves_order() {
    let raw = r#"{"z": 1, "a": {"m": [1, 2], "b": null}}"#;
    let obj = JsonObj::from_json(raw).expect("parse");
    let compact = obj.to_json_compact().expect("dump");
    assert_eq!(compact, r#"{"z":1,"a":{"m":[1,2],"b":null}}"#);
    assert_eq!(JsonObj::from_json(&compact).expect("reparse"), obj);
}

#[test]
fn to_json_honors_dump_opts() {
    let obj = JsonObj::from_value(json!({"b": 1, "a": 2})).expect("object");
    let sorted = obj
        .to_json(&DumpOpts::new().sort_keys(true))
        .expect("dump");
    assert_eq!(sorted, r#"{"a":2,"b":1}"#);

    let pretty = obj.to_json(&DumpOpts::new().pretty(true)).expect("dump");
    assert!(pretty.contains('\n'));
    assert!(pretty.contains("  \"b\": 1"));

    let bytes = obj.to_json_bytes(&DumpOpts::new()).expect("dump");
    assert_eq!(bytes, obj.to_json_compact().expect("dump").into_bytes());
}

#[test]
fn jsonify_then_obj_mutation_is_visible_through_dot_keys() {
    let mut v = jsonify(json!({"root": {"leaf": 1}}));
    let obj = v.as_object_mut().expect("object");
    let root = obj
        .get_mut("root")
        .and_then(JsonValue::as_object_mut)
        .expect("nested object");
    root.insert("other", true);
    assert_eq!(
        obj.dot_keys_list(false),
        vec!["root.leaf", "root.other"]
    );
    assert_eq!(unjsonify(v), json!({"root": {"leaf": 1, "other": true}}));
}
