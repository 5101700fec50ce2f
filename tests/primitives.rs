use serde_json::json;
use vld_chain::prelude::*;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn kinds(report: &ErrorFeedback) -> Vec<ErrorKind> {
    report.errors.iter().map(|e| e.kind()).collect()
}

// === String ===

#[test]
fn string_basic() {
    let s = vld_chain::string();
    assert!(s.validate(&v(json!("hello")), "").is_valid());
    assert!(s.validate(&v(json!(42)), "").is_valid());
    assert!(s.validate(&Value::Undefined, "").is_valid());
}

#[test]
fn string_required_reports_type() {
    let s = vld_chain::string().required();
    let report = s.validate(&v(json!(42)), "title");
    assert_eq!(report.errors_count, 1);
    let err = &report.errors.as_list().unwrap()[0];
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(err.path(), "title");
    assert!(err.message().contains("string"));
}

#[test]
fn string_min_max() {
    let s = vld_chain::string().minlength(3).maxlength(5);
    assert_eq!(kinds(&s.validate(&v(json!("ab")), "")), [ErrorKind::Range]);
    assert!(s.validate(&v(json!("abc")), "").is_valid());
    assert!(s.validate(&v(json!("abcde")), "").is_valid());
    assert_eq!(kinds(&s.validate(&v(json!("abcdef")), "")), [ErrorKind::Range]);
}

#[test]
fn string_reports_every_violation() {
    let s = vld_chain::string().minlength(5).pattern("^[0-9]+$");
    let report = s.validate(&v(json!("ab")), "code");
    assert_eq!(kinds(&report), [ErrorKind::Range, ErrorKind::Argument]);
    assert!(report.errors.iter().all(|e| e.path() == "code"));
}

#[test]
fn string_pattern_is_unanchored() {
    let s = vld_chain::string().pattern("[0-9]");
    assert!(s.validate(&v(json!("abc1")), "").is_valid());
    assert!(!s.validate(&v(json!("abc")), "").is_valid());
}

#[test]
#[should_panic(expected = "`pattern` can only be set once")]
fn string_pattern_twice_panics() {
    let _ = vld_chain::string().pattern("a").pattern("b");
}

#[test]
#[should_panic(expected = "`maxlength` can only be set once")]
fn string_maxlength_twice_panics() {
    let _ = vld_chain::string().maxlength(1).maxlength(2);
}

#[test]
fn string_not_and_predicate() {
    let s = vld_chain::string()
        .not(["admin", "root"])
        .predicate(|v| v.as_str().map_or(false, |s| s.is_ascii()));
    assert!(s.validate(&v(json!("alice")), "").is_valid());
    assert_eq!(kinds(&s.validate(&v(json!("root")), "")), [ErrorKind::Argument]);
    assert_eq!(kinds(&s.validate(&v(json!("jürgen")), "")), [ErrorKind::Predicate]);
}

// === Number ===

#[test]
fn number_basic() {
    let n = vld_chain::number().required();
    assert!(n.validate(&v(json!(3.5)), "").is_valid());
    assert_eq!(kinds(&n.validate(&v(json!("3")), "")), [ErrorKind::Type]);
    assert_eq!(kinds(&n.validate(&Value::Null, "")), [ErrorKind::Type]);
}

#[test]
fn number_nan_and_infinity() {
    let strict = vld_chain::number().required();
    assert!(!strict.validate_type(&Value::Number(f64::NAN)));
    assert!(!strict.validate_type(&Value::Number(f64::INFINITY)));

    let nan = vld_chain::number().allow_nan();
    assert!(nan.validate_type(&Value::Number(f64::NAN)));
    assert!(!nan.validate_type(&Value::Number(f64::NEG_INFINITY)));

    let inf = vld_chain::number().allow_infinity();
    assert!(inf.validate_type(&Value::Number(f64::INFINITY)));
    assert!(!inf.validate_type(&Value::Number(f64::NAN)));
}

#[test]
fn number_min_max() {
    let n = vld_chain::number().min(0.0).max(10.0);
    assert!(n.validate(&v(json!(0)), "").is_valid());
    assert!(n.validate(&v(json!(10)), "").is_valid());
    assert_eq!(kinds(&n.validate(&v(json!(-1)), "")), [ErrorKind::Range]);
    assert_eq!(kinds(&n.validate(&v(json!(11)), "")), [ErrorKind::Range]);
}

#[test]
fn number_bound_reset_uses_latest_value() {
    let n = vld_chain::number().min(5.0).integer().min(1.0);
    assert!(n.validate(&v(json!(2)), "").is_valid());
    assert_eq!(kinds(&n.validate(&v(json!(0)), "")), [ErrorKind::Range]);
}

#[test]
fn number_integer() {
    let n = vld_chain::number().integer();
    assert!(n.validate(&v(json!(4)), "").is_valid());
    assert!(n.validate(&v(json!(-4.0)), "").is_valid());
    assert_eq!(kinds(&n.validate(&v(json!(4.2)), "")), [ErrorKind::Argument]);
}

#[test]
fn number_infinity_is_not_an_integer() {
    let n = vld_chain::number().allow_infinity().integer();
    assert_eq!(
        kinds(&n.validate(&Value::Number(f64::INFINITY), "")),
        [ErrorKind::Argument]
    );
}

#[test]
fn number_not_with_precision() {
    let exact = vld_chain::number().not([0.1]);
    assert!(exact.validate(&v(json!(0.1 + 1e-9)), "").is_valid());

    let loose = vld_chain::number().precision(1e-6).not([0.1]);
    assert_eq!(
        kinds(&loose.validate(&v(json!(0.1 + 1e-9)), "")),
        [ErrorKind::Argument]
    );
    assert!(loose.validate(&v(json!(0.2)), "").is_valid());
}

#[test]
fn number_precision_set_after_not_still_applies() {
    let n = vld_chain::number().not([1.0]).precision(0.5);
    assert!(!n.validate(&v(json!(1.25)), "").is_valid());
}

// === Boolean ===

#[test]
fn boolean_is_strict() {
    let b = vld_chain::boolean().required();
    assert!(b.validate(&v(json!(true)), "").is_valid());
    assert!(b.validate(&v(json!(false)), "").is_valid());
    assert_eq!(kinds(&b.validate(&v(json!(1)), "flag")), [ErrorKind::Type]);
    assert_eq!(kinds(&b.validate(&v(json!("true")), "flag")), [ErrorKind::Type]);
}

#[test]
fn boolean_not() {
    let b = vld_chain::boolean().not([false]);
    assert!(b.validate(&v(json!(true)), "").is_valid());
    assert_eq!(kinds(&b.validate(&v(json!(false)), "")), [ErrorKind::Argument]);
}

// === Enumeration ===

#[test]
fn enumeration_from_values() {
    let e = vld_chain::enumeration([Value::from("red"), Value::from(1), Value::Null]);
    assert!(e.validate(&v(json!("red")), "").is_valid());
    assert!(e.validate(&v(json!(1)), "").is_valid());
    assert!(e.validate(&Value::Null, "").is_valid());
    let report = e.validate(&v(json!("blue")), "colour");
    assert_eq!(kinds(&report), [ErrorKind::Argument]);
    assert_eq!(report.errors.as_list().unwrap()[0].path(), "colour");
}

#[test]
fn enumeration_from_object_uses_values() {
    let colours = match v(json!({"RED": "r", "GREEN": "g"})) {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let e = vld_chain::enumeration_of(colours);
    assert!(e.validate(&v(json!("r")), "").is_valid());
    assert!(!e.validate(&v(json!("RED")), "").is_valid());
}

#[test]
fn enumeration_of_entries_keeps_declaration_order() {
    let e = vld_chain::enumeration_of([("SMALL", 1), ("LARGE", 3), ("MEDIUM", 2)]);
    assert_eq!(e.values(), [Value::from(1), Value::from(3), Value::from(2)]);
    let report = e.validate(&v(json!(4)), "size");
    assert_eq!(
        report.errors.as_list().unwrap()[0].message(),
        "Expected one of 1, 3, 2, received 4"
    );
}

#[test]
fn enumeration_accepts_any_shape_but_checks_membership() {
    let e = vld_chain::enumeration(["a"]);
    assert!(e.validate_type(&Value::Undefined));
    assert_eq!(kinds(&e.validate(&Value::Undefined, "")), [ErrorKind::Argument]);
}
