//! JSON request handling through the public CLI surface

use std::fs;

use querymap::builder::{omit_empty, where_from_json, BuilderError, Compiler, Value};
use querymap::cli::{handle_request, load_config, read_request_from, write_response_to, Command};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_select_request_round_trip() {
    let request = read_request_from(
        &br#"{"table":"users","where":{"deleted_at":null,"name like":"a%","_or":[{"age <":18},{"age >":65}],"_orderby":"id"},"fields":["id"]}"#[..],
    )
    .unwrap();

    let stmt = handle_request(Command::Select, &Compiler::default(), request).unwrap();
    assert_eq!(
        stmt.text,
        "select id from users where (((age<?) or (age>?)) and name like ? and deleted_at is null) order by id"
    );
    assert_eq!(
        stmt.values,
        vec![Value::UInt(18), Value::UInt(65), Value::from("a%")]
    );

    let mut out = Vec::new();
    write_response_to(&mut out, serde_json::to_value(&stmt).unwrap()).unwrap();
    let response: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(response["status"], "ok");
    assert_eq!(response["data"]["values"], json!([18, 65, "a%"]));
}

#[test]
fn test_interval_and_fill_from_json() {
    let request = json!({
        "table": "meters",
        "where": {
            "_interval": {"value": 30, "unit": "second"},
            "_fill": "VALUE",
            "_fillvalue": -1.25
        },
        "fields": ["max(current)"]
    });
    let stmt = handle_request(Command::Select, &Compiler::default(), request).unwrap();
    assert_eq!(
        stmt.text,
        "select max(current) from meters interval(30s) fill (VALUE,-1.250000)"
    );
    assert!(stmt.values.is_empty());
}

#[test]
fn test_config_file_changes_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("querymap.json");
    fs::write(&path, r#"{"between_policy":"reject","max_or_depth":1}"#).unwrap();
    let compiler = Compiler::new(load_config(Some(path.as_path())).unwrap());

    let err = handle_request(
        Command::Select,
        &compiler,
        json!({"table": "t", "where": {"age between": [1, 2, 3]}}),
    )
    .unwrap_err();
    assert_eq!(err.code_str(), "QM_BETWEEN_ARITY");

    let err = handle_request(
        Command::Select,
        &compiler,
        json!({"table": "t", "where": {"_or": [{"_or": [{"a": 1}]}]}}),
    )
    .unwrap_err();
    assert_eq!(err.code_str(), "QM_OR_TOO_DEEP");

    let lenient = handle_request(
        Command::Select,
        &Compiler::default(),
        json!({"table": "t", "where": {"age between": [1, 2, 3], "b": 1}}),
    )
    .unwrap();
    assert_eq!(lenient.text, "select * from t where (b=?)");
}

#[test]
fn test_omit_empty_on_json_filters() {
    let mut where_map =
        where_from_json(&json!({"name": "", "city": "sf", "age": 0, "tags": []})).unwrap();
    omit_empty(&mut where_map, &["name", "age", "tags"]);

    let stmt = Compiler::default().select::<&str>("t", &where_map, &[]).unwrap();
    assert_eq!(stmt.text, "select * from t where (city=?)");
}

#[test]
fn test_or_null_members_are_skipped() {
    let stmt = handle_request(
        Command::Select,
        &Compiler::default(),
        json!({"table": "t", "where": {"_or": [null, {"a": 1}, {"b": 2}], "c": 3}}),
    )
    .unwrap();
    assert_eq!(stmt.text, "select * from t where (((a=?) or (b=?)) and c=?)");
    assert_eq!(stmt.values, vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]);
}

#[test]
fn test_error_kinds_surface_codes() {
    let compiler = Compiler::default();
    let cases = [
        (json!({"table": "t", "where": {"_limit": "10"}}), "QM_LIMIT_VALUE_TYPE"),
        (json!({"table": "t", "where": {"_fill": "VALUE"}}), "QM_FILL_MISSING_VALUE"),
        (json!({"table": "t", "where": {"_or": {"a": 1}}}), "QM_OR_VALUE_TYPE"),
        (json!({"table": "t", "where": {"_or": 1}}), "QM_OR_VALUE_TYPE"),
        (json!({"table": "t", "where": {"_or": [1]}}), "QM_OR_VALUE_TYPE"),
        (json!({"table": "t", "where": {"_or": [{"a": 1}, [2]]}}), "QM_OR_VALUE_TYPE"),
        (json!({"table": "t", "where": {"a in": []}}), "QM_EMPTY_LIST_CONDITION"),
        (json!({"table": "t", "where": {"_interval": "0m"}}), "QM_INTERVAL_VALUE"),
        (json!({"where": {}}), "QM_INVALID_REQUEST"),
    ];
    for (request, code) in cases {
        let err = handle_request(Command::Select, &compiler, request).unwrap_err();
        assert_eq!(err.code_str(), code);
    }

    let err = where_from_json(&json!({"_fill": "sometimes"})).unwrap_err();
    assert_eq!(err, BuilderError::UnknownFill { value: "sometimes".to_string() });
}
