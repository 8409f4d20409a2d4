//! Contract Test: POST /calc

use crate::support::ingress::{create_test_app, post_json, send};
use serde_json::json;

#[tokio::test]
async fn calc_addition() {
    let app = create_test_app();
    let body = post_json(&app, "/calc", &json!({"operation": "add", "a": 13, "b": 21})).await;

    assert_eq!(body["result"].as_f64(), Some(34.0));
    assert_eq!(body["operation"], "add");
    assert_eq!(body["a"].as_f64(), Some(13.0));
    assert_eq!(body["b"].as_f64(), Some(21.0));
    assert_eq!(body["service"], "Calculator");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn calc_each_operation_is_exact() {
    let app = create_test_app();
    let a = 7.25;
    let b = -3.5;
    let cases = [
        ("add", a + b),
        ("subtract", a - b),
        ("multiply", a * b),
        ("divide", a / b),
    ];

    for (operation, expected) in cases {
        let body = post_json(&app, "/calc", &json!({"operation": operation, "a": a, "b": b})).await;
        assert_eq!(body["result"].as_f64(), Some(expected), "{operation}");
        assert_eq!(body["operation"], operation);
    }
}

#[tokio::test]
async fn calc_divide_by_zero_is_payload_error() {
    let app = create_test_app();
    for a in [7, 0, -42] {
        let body = post_json(&app, "/calc", &json!({"operation": "divide", "a": a, "b": 0})).await;
        assert_eq!(body, json!({"error": "Division by zero"}));
        assert!(body.get("result").is_none());
    }
}

#[tokio::test]
async fn calc_unknown_operation() {
    let app = create_test_app();
    let body = post_json(&app, "/calc", &json!({"operation": "bogus", "a": 1, "b": 1})).await;

    assert_eq!(body, json!({"error": "Unknown operation: bogus"}));
}

#[tokio::test]
async fn calc_unparseable_operand_is_validation_error() {
    let app = create_test_app();
    let body = post_json(&app, "/calc", &json!({"operation": "add", "a": "seven", "b": 1})).await;

    assert_eq!(body["error"], "Invalid operand 'a': \"seven\"");
    assert_eq!(body["service"], "Calculator");
}

#[tokio::test]
async fn calc_get_returns_usage_hint() {
    let app = create_test_app();
    let body = send(&app, "GET", "/calc", None).await;

    assert_eq!(body["service"], "Calculator");
    assert_eq!(
        body["message"],
        "Send a POST request with 'operation' (add/subtract/multiply/divide), 'a', and 'b'"
    );
}

#[tokio::test]
async fn calculator_path_is_not_calc() {
    let app = create_test_app();
    let body = post_json(
        &app,
        "/calculator",
        &json!({"operation": "add", "a": 1, "b": 2}),
    )
    .await;

    assert!(body["available_endpoints"].is_object());
    assert!(body.get("result").is_none());
}
