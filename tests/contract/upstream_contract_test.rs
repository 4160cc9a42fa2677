// Contract tests for upstream status codes
//
// These go through the raw client helpers so the status itself is the thing
// under test, not the harness's error mapping.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use reqwest::StatusCode;
use serde_json::json;
use shipcheck::upstream::ApiClient;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn client(upstream: &TestUpstream) -> ApiClient {
    ApiClient::new(&upstream.api_config()).unwrap()
}

#[tokio::test]
async fn test_request_without_token_is_unauthorized() {
    let upstream = TestUpstream::start().await;
    upstream
        .mount_status(
            "GET",
            "/v2/location/cities",
            401,
            json!({ "errors": [{ "code": "v2_token_expired", "message": "Token is invalid" }] }),
        )
        .await;

    let api = client(&upstream);
    let response = api
        .get_raw(&api.endpoints().cities(), None, &[("size", "1")])
        .await
        .unwrap();

    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_has_errors(&response);
    assert!(!response.is_ok());
}

#[tokio::test]
async fn test_authorized_request_succeeds() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    Mock::given(method("GET"))
        .and(path("/v2/location/cities"))
        .and(header("Authorization", "Bearer contract-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(TestDataFactory::cities_body()))
        .expect(1)
        .mount(&upstream.server)
        .await;

    let context = upstream.memory_context();
    // token endpoint hit once so the shape of the grant is exercised too
    context.tokens.get_token().await.unwrap();

    let api = context.tokens.client();
    let response = api
        .get_raw(&api.endpoints().cities(), Some("Bearer contract-token"), &[("size", "3")])
        .await
        .unwrap();

    assert_status(&response, StatusCode::OK);
    assert_eq!(response.body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_order_without_packages_is_rejected() {
    let upstream = TestUpstream::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_partial_json(json!({ "packages": [] })))
        .respond_with(ResponseTemplate::new(400).set_body_json(TestDataFactory::error_body(
            "v2_field_is_empty",
            "Field [packages] is empty",
        )))
        .expect(1)
        .mount(&upstream.server)
        .await;

    let api = client(&upstream);
    let response = api
        .post_raw(
            &api.endpoints().orders(),
            Some("Bearer contract-token"),
            &json!({ "tariff_code": 136, "packages": [] }),
        )
        .await
        .unwrap();

    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_has_errors(&response);
    assert_eq!(
        response.body.pointer("/requests/0/state").and_then(|s| s.as_str()),
        Some("INVALID")
    );
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let upstream = TestUpstream::start().await;
    upstream
        .mount_status(
            "GET",
            "/v2/orders/00000000-0000-0000-0000-000000000000",
            404,
            TestDataFactory::error_body("v2_entity_not_found", "Entity is not found"),
        )
        .await;

    let api = client(&upstream);
    let response = api
        .get_raw(
            &api.endpoints().order("00000000-0000-0000-0000-000000000000"),
            Some("Bearer contract-token"),
            &[] as &[(&str, &str)],
        )
        .await
        .unwrap();

    assert_status(&response, StatusCode::NOT_FOUND);
    assert_has_errors(&response);
}

#[tokio::test]
async fn test_empty_error_body_is_null() {
    let upstream = TestUpstream::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/calculator/tarifflist"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream.server)
        .await;

    let api = client(&upstream);
    let response = api
        .post_raw(&api.endpoints().tariff_list(), None, &json!({}))
        .await
        .unwrap();

    assert_status(&response, StatusCode::BAD_GATEWAY);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_checked_call_maps_rejection_to_upstream_error() {
    let upstream = TestUpstream::start().await;
    upstream
        .mount_status(
            "POST",
            "/v2/calculator/tariff",
            400,
            json!({ "errors": [{ "code": "v2_invalid_value", "message": "tariff_code" }] }),
        )
        .await;

    let api = client(&upstream);
    let error = api
        .post_json::<_, serde_json::Value>(&api.endpoints().tariff(), None, &json!({}))
        .await
        .unwrap_err();

    assert_upstream_status(&error, StatusCode::BAD_REQUEST);
    assert!(error.to_string().contains("/v2/calculator/tariff"));
}
