#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;
use specmatch_core::compare::{compare, equal, render_summary, resource_equal, Selector};
use specmatch_core::errors::ExErrorKind;
use specmatch_core::scope;
use specmatch_core::snapshot::{flatten, Snapshot};

fn snap(value: serde_json::Value) -> Snapshot {
    flatten(&value).unwrap()
}

// S3: a label present on one side only makes the selection unequal
#[test]
fn test_s3_label_on_one_side() {
    let a = snap(json!({"metadata": {"labels": {"app": "web", "tier": "front"}}}));
    let b = snap(json!({"metadata": {"labels": {"app": "web"}}}));
    let selector = Selector::new(["^metadata\\.labels"]).unwrap();

    assert!(!equal(&a, &b, &selector));
    let report = compare(&a, &b, &selector);
    assert_eq!(report.only_in_a, vec!["metadata.labels.tier".to_string()]);
    assert!(report.only_in_b.is_empty());
}

// S4: empty caller patterns fall back to an explicit default
#[test]
fn test_s4_default_scope_ignores_other_fields() {
    let a = snap(json!({"spec": {"replicas": 3}, "status": {"ready": 3}, "metadata": {"uid": "1"}}));
    let b = snap(json!({"spec": {"replicas": 3}, "status": {"ready": 0}, "metadata": {"uid": "2"}}));
    let none: [&str; 0] = [];
    let selector = Selector::with_default(&none, &["^spec\\."]).unwrap();
    assert!(equal(&a, &b, &selector));
}

#[test]
fn test_patterns_match_case_insensitively() {
    let a = snap(json!({"template": {"spec": {"containers": [{"image": "app:1", "name": "a"}]}}}));
    let b = snap(json!({"template": {"spec": {"containers": [{"image": "app:1", "name": "b"}]}}}));
    let selector = Selector::new(["^Template\\.Spec\\.Containers\\..*\\.Image$"]).unwrap();
    assert!(equal(&a, &b, &selector));
    assert!(!equal(&a, &b, &Selector::new(["containers"]).unwrap()));
}

#[test]
fn test_kind_mismatch_is_unequal_even_with_same_text() {
    let a = snap(json!({"spec": {"port": 80}}));
    let b = snap(json!({"spec": {"port": "80"}}));
    let selector = Selector::new(["^spec\\.port$"]).unwrap();
    assert!(!equal(&a, &b, &selector));
    assert_eq!(compare(&a, &b, &selector).kind_mismatches.len(), 1);
}

#[test]
fn test_signed_and_unsigned_json_numbers_differ_in_kind() {
    let a = snap(json!({"offset": -1}));
    let b = snap(json!({"offset": 1}));
    let report = compare(&a, &b, &Selector::new(["offset"]).unwrap());
    assert_eq!(report.kind_mismatches.len(), 1);
}

#[test]
fn test_secret_scope_ignores_metadata() {
    let desired = json!({"metadata": {"name": "db"}, "type": "Opaque", "data": {"password": "aGk="}});
    let live = json!({
        "metadata": {"name": "db", "resourceVersion": "812"},
        "type": "Opaque",
        "data": {"password": "aGk="}
    });
    assert!(resource_equal(&desired, &live, scope::SECRET).unwrap());

    let rotated = json!({"type": "Opaque", "data": {"password": "Ynll"}});
    assert!(!resource_equal(&desired, &rotated, scope::SECRET).unwrap());
}

#[test]
fn test_invalid_pattern_is_an_error_not_false() {
    let err = resource_equal(&json!({"a": 1}), &json!({"a": 1}), &["^a(", "^b"]).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidPattern);
    assert_eq!(err.pattern(), Some("^a("));
}

#[test]
fn test_report_renders_markdown() {
    let a = snap(json!({"spec": {"replicas": 3, "paused": false}}));
    let b = snap(json!({"spec": {"replicas": 5, "paused": false}}));
    let report = compare(&a, &b, &Selector::new(["^spec\\."]).unwrap());

    assert_eq!(report.value_mismatches.len(), 1);
    let summary = render_summary(&report);
    assert!(summary.contains("### Value Mismatches"));
    assert!(summary.contains("| `spec.replicas` | uint64 | 3 | 5 |"));
}

#[test]
fn test_nan_leaves_are_reflexive() {
    #[derive(serde::Serialize)]
    struct Gauge {
        ratio: f64,
    }
    let gauge = Gauge { ratio: f64::NAN };
    assert!(resource_equal(&gauge, &gauge, &["ratio"]).unwrap());
}

#[test]
fn test_label_spelling_outside_selection_does_not_fail() {
    let record = json!({
        "metadata": {
            "labels": {"App": "a", "app": "b"},
            "annotations": {"a.b": "x", "a": {"b": "y"}}
        },
        "spec": {"replicas": 3}
    });
    let live = json!({"metadata": {"labels": {"app": "b"}}, "spec": {"replicas": 3}});

    assert!(resource_equal(&record, &record, &["^spec\\."]).unwrap());
    assert!(resource_equal(&record, &live, &["^spec\\."]).unwrap());
    assert!(!resource_equal(&record, &live, &["^metadata\\.labels\\."]).unwrap());
}
