//! Contract Test: discovery document for unmatched paths

use crate::support::ingress::{create_test_app, send};

#[tokio::test]
async fn root_lists_available_endpoints() {
    let app = create_test_app();
    let body = send(&app, "GET", "/", None).await;

    assert_eq!(body["message"], "Ray Serve Application");
    let endpoints = body["available_endpoints"].as_object().unwrap();
    assert!(endpoints.contains_key("/llm"));
}

#[tokio::test]
async fn unmatched_path_has_exactly_three_endpoints() {
    let app = create_test_app();

    for method in ["GET", "POST", "DELETE"] {
        let body = send(&app, method, "/nope", None).await;
        let mut keys: Vec<_> = body["available_endpoints"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["/calc", "/echo", "/llm"], "{method}");
        assert!(body.get("service").is_none());
    }
}

#[tokio::test]
async fn endpoint_descriptions_are_strings() {
    let app = create_test_app();
    let body = send(&app, "GET", "/missing/deeper", None).await;

    for (path, description) in body["available_endpoints"].as_object().unwrap() {
        assert!(
            description.as_str().is_some_and(|d| !d.is_empty()),
            "{path} should have a description"
        );
    }
}
