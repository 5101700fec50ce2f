use serde_json::json;
use vld_chain::prelude::*;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn array_type_check() {
    let a = vld_chain::array().required();
    assert!(a.validate(&v(json!([])), "").is_valid());
    let report = a.validate(&v(json!({"0": 1})), "list");
    assert_eq!(report.errors_count, 1);
    assert_eq!(report.errors.as_list().unwrap()[0].kind(), ErrorKind::Type);
    assert!(vld_chain::array().validate(&v(json!("nope")), "").is_valid());
}

#[test]
fn array_min_length() {
    let a = vld_chain::array().minlength(1);
    let report = a.validate(&v(json!([])), "");
    assert_eq!(report.errors_count, 1);
    assert_eq!(report.errors.as_list().unwrap()[0].kind(), ErrorKind::Range);
    assert!(a.validate(&v(json!([1])), "").is_valid());
}

#[test]
fn array_max_length() {
    let a = vld_chain::array().maxlength(2);
    assert!(a.validate(&v(json!([1, 2])), "").is_valid());
    assert_eq!(a.validate(&v(json!([1, 2, 3])), "").errors_count, 1);
}

#[test]
fn array_length_violation_skips_elements() {
    let a = vld_chain::array_of(vld_chain::number()).minlength(3);
    let report = a.validate(&v(json!(["x"])), "root");
    assert_eq!(report.errors_count, 1);
    let err = &report.errors.as_list().unwrap()[0];
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(err.path(), "root");
}

#[test]
fn array_element_type_error_at_index() {
    let a = vld_chain::array_of(vld_chain::number());
    let report = a.validate(&v(json!([1, "x"])), "root");
    assert_eq!(report.errors_count, 1);
    let err = &report.errors.as_list().unwrap()[0];
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(err.path(), "root[1]");
}

#[test]
fn array_stops_at_first_bad_element() {
    let a = vld_chain::array_of(vld_chain::string().minlength(2).pattern("^[a-z]+$"));
    let report = a.validate(&v(json!(["ok", "X", "also bad", 7])), "names");
    // Only the element at index 1 is reported, with both of its failures.
    assert_eq!(report.errors_count, 2);
    assert!(report.errors.iter().all(|e| e.path() == "names[1]"));
}

#[test]
fn array_of_objects_reports_nested_paths() {
    let a = vld_chain::array_of(
        vld_chain::object().field("id", vld_chain::number().integer().required()),
    );
    let report = a.validate(&v(json!([{"id": 1}, {"id": 1.5}, {}])), "items");
    assert_eq!(report.errors_count, 1);
    let errors = report.errors.as_list().unwrap();
    assert_eq!(errors[0].path(), "items[1].id");
    assert_eq!(errors[0].kind(), ErrorKind::Argument);
}

#[test]
fn nested_arrays() {
    let a = vld_chain::array_of(vld_chain::array_of(vld_chain::boolean()));
    assert_eq!(a.type_name(), "array<array<boolean>>");
    let report = a.validate(&v(json!([[true], [false, 0]])), "m");
    assert_eq!(report.errors.as_list().unwrap()[0].path(), "m[1][1]");
}

#[test]
fn array_distinct() {
    let a = vld_chain::array().distinct();
    assert!(a.validate(&v(json!([1, 2, 3])), "").is_valid());
    let report = a.validate(&v(json!([1, 2, 1])), "");
    assert_eq!(report.errors_count, 1);
    let err = &report.errors.as_list().unwrap()[0];
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert!(err.message().contains("[0]"));
    assert!(err.message().contains("[2]"));
}

#[test]
fn array_distinct_compares_structurally() {
    let a = vld_chain::array().distinct();
    assert!(!a.validate(&v(json!([{"a": 1}, {"a": 1}])), "").is_valid());
    assert!(a.validate(&v(json!([{"a": 1}, {"a": 2}])), "").is_valid());
}

#[test]
fn array_chain_runs_before_length() {
    let a = vld_chain::array()
        .distinct()
        .predicate(|v| v.as_array().map_or(false, |items| items.len() % 2 == 0))
        .minlength(4);
    let report = a.validate(&v(json!([1, 1, 2])), "");
    let kinds: Vec<_> = report.errors.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        [ErrorKind::Argument, ErrorKind::Predicate, ErrorKind::Range]
    );
}

#[test]
fn array_not() {
    let a = vld_chain::array().not([Value::array(Vec::<Value>::new())]);
    assert!(!a.validate(&v(json!([])), "").is_valid());
    assert!(a.validate(&v(json!([0])), "").is_valid());
}

#[test]
#[should_panic(expected = "`minlength` can only be set once")]
fn array_minlength_twice_panics() {
    let _ = vld_chain::array().minlength(1).minlength(1);
}

#[test]
#[should_panic(expected = "`of` can only be set once")]
fn array_element_twice_panics() {
    let _ = vld_chain::array_of(vld_chain::string()).of(vld_chain::number());
}
