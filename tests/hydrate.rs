//! End-to-end hydrate behaviour through the public API.

use representation_core::definition::{FieldSpec, FieldSpecInput, StepDefinition};
use representation_core::pipeline::{FieldVerdict, HydrateOutcome, PipelineEngine};
use representation_core::{CapabilityError, ConfigurationError};
use serde_json::{json, Map, Value};

fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("record must be an object"),
    }
}

fn spec(value: Value) -> FieldSpec {
    FieldSpec::bind(&FieldSpecInput::from_value(&value)).unwrap()
}

fn failures(verdict: FieldVerdict) -> Vec<(String, bool)> {
    match verdict {
        FieldVerdict::Valid => panic!("expected an invalid verdict"),
        FieldVerdict::Invalid(results) => results
            .into_iter()
            .map(|r| (r.definition.method, r.is_valid))
            .collect(),
    }
}

#[test]
fn unknown_fields_are_never_hydrated() {
    let mut engine = PipelineEngine::new([(
        "name",
        FieldSpecInput::new()
            .validator(StepDefinition::new("isLength").with_options(json!({"min": 0, "max": 10}))),
    )])
    .unwrap();

    assert_eq!(engine.hydrate(&record(json!({"foo": true}))).unwrap(), HydrateOutcome::Valid);
    assert!(engine.fields().is_empty());
}

#[test]
fn construction_reports_field_and_reason() {
    let err: ConfigurationError = PipelineEngine::new([
        ("ok", FieldSpecInput::new().validator(StepDefinition::new("isInt"))),
        ("broken", FieldSpecInput::from_value(&json!({"validators": [{}]}))),
    ])
    .unwrap_err();

    assert_eq!(err.field, "broken");
    assert_eq!(err.message(), "Validator must be an object with a method property.");
}

#[test]
fn validation_methods_with_options() {
    let two_digits = spec(json!({
        "validators": [{"method": "isDecimal", "options": {"decimal_digits": 2}}]
    }));
    assert_eq!(two_digits.validate(&json!("1.01")), Ok(FieldVerdict::Valid));

    let one_digit = spec(json!({
        "validators": [{"method": "isDecimal", "options": {"decimal_digits": 1}}]
    }));
    let verdict = one_digit.validate(&json!("1.01")).unwrap();
    let FieldVerdict::Invalid(results) = verdict else {
        panic!("expected failure");
    };
    assert_eq!(
        serde_json::to_value(&results).unwrap(),
        json!([{
            "definition": {"method": "isDecimal", "options": {"decimal_digits": 1}},
            "value": "1.01",
            "isValid": false
        }])
    );
}

#[test]
fn multiple_validators_all_run() {
    let val = json!("12345");

    let both_pass = spec(json!({"validators": [
        {"method": "isInt"},
        {"method": "isLength", "options": {"min": 5, "max": 5}}
    ]}));
    assert_eq!(both_pass.validate(&val), Ok(FieldVerdict::Valid));

    let second_fails = spec(json!({"validators": [
        {"method": "isInt"},
        {"method": "isLength", "options": {"min": 6, "max": 6}}
    ]}));
    assert_eq!(
        failures(second_fails.validate(&val).unwrap()),
        vec![("isInt".to_string(), true), ("isLength".to_string(), false)]
    );

    let first_fails = spec(json!({"validators": [
        {"method": "isBoolean"},
        {"method": "isLength", "options": {"min": 5, "max": 5}}
    ]}));
    assert_eq!(
        failures(first_fails.validate(&val).unwrap()),
        vec![("isBoolean".to_string(), false), ("isLength".to_string(), true)]
    );

    let both_fail = spec(json!({"validators": [
        {"method": "isBoolean"},
        {"method": "isLength", "options": {"min": 6, "max": 6}}
    ]}));
    assert_eq!(
        failures(both_fail.validate(&val).unwrap()),
        vec![("isBoolean".to_string(), false), ("isLength".to_string(), false)]
    );
}

#[test]
fn sanitization_methods() {
    assert_eq!(
        spec(json!({"sanitizers": [{"method": "toBoolean"}]})).sanitize(json!("1")),
        Ok(json!(true))
    );
    assert_eq!(
        spec(json!({"sanitizers": [{"method": "toBoolean", "options": true}]}))
            .sanitize(json!("truthy value")),
        Ok(json!(false))
    );
}

#[test]
fn sanitizer_order_matters() {
    let val = json!("1    ");

    let strict_only = spec(json!({"sanitizers": [{"method": "toBoolean", "options": true}]}));
    assert_eq!(strict_only.sanitize(val.clone()), Ok(json!(false)));

    let trim_only = spec(json!({"sanitizers": [{"method": "rtrim"}]}));
    assert_eq!(trim_only.sanitize(val.clone()), Ok(json!("1")));

    let trim_then_bool = spec(json!({"sanitizers": [
        {"method": "rtrim"},
        {"method": "toBoolean", "options": true}
    ]}));
    assert_eq!(trim_then_bool.sanitize(val.clone()), Ok(json!(true)));

    let bool_then_trim = spec(json!({"sanitizers": [
        {"method": "toBoolean", "options": true},
        {"method": "rtrim"}
    ]}));
    assert_eq!(
        bool_then_trim.sanitize(val),
        Err(CapabilityError::ExpectedString {
            method: "rtrim",
            received: "a boolean"
        })
    );
}

#[test]
fn returned_definitions_are_isolated_from_caller_input() {
    let mut options = json!({"min": 6, "max": 6});
    let mut input = FieldSpecInput::new()
        .validator(StepDefinition::new("isLength").with_options(options.clone()));
    let mut engine = PipelineEngine::new([("code", input.clone())]).unwrap();

    let outcome = engine.hydrate(&record(json!({"code": "12345"}))).unwrap();
    let mut errors = outcome.into_errors().unwrap();

    options["min"] = json!(0);
    input.validators = Some(json!([{"method": "isLength", "options": options}]));
    assert_eq!(errors["code"][0].definition.options, Some(json!({"min": 6, "max": 6})));

    // Editing a returned failure does not reach the engine's definitions.
    errors.get_mut("code").unwrap()[0].definition.options = Some(json!({"min": 0}));
    let again = engine.hydrate(&record(json!({"code": "12345"}))).unwrap();
    assert!(!again.is_valid());
    assert_eq!(
        engine.definition("code").unwrap().validators()[0].definition().options,
        Some(json!({"min": 6, "max": 6}))
    );
    assert_ne!(FieldSpecInput::new(), input);
}

#[test]
fn predicate_used_as_sanitizer_yields_boolean() {
    let mut engine = PipelineEngine::from_json_map(&record(json!({
        "agreed": {
            "sanitizers": [{"method": "equals", "options": "yes"}],
            "validators": []
        }
    })))
    .unwrap();
    assert!(engine.hydrate(&record(json!({"agreed": "yes"}))).unwrap().is_valid());
    assert_eq!(engine.field("agreed"), Some(&json!(true)));
}
