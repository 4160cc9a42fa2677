#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use helpers::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shipcheck::core::{AppError, MemoryStore, Repository};
use shipcheck::locations::{Location, Route};
use shipcheck::orders::{Order, OrderRequest, OrderState, RequestState};
use shipcheck::tariffs::{PackageFactory, WeightRange};
use shipcheck::Repositories;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const ORDER_UUID: &str = "72753031-3c87-4a8a-b7b2-6a1f0c2d9e11";

fn order_request() -> OrderRequest {
    let route = Route {
        from: Location::for_city(PSKOV_CODE),
        to: Location::for_city(MOSCOW_CODE),
    };
    let packages = PackageFactory::packages(&mut StdRng::seed_from_u64(3), &WeightRange::default());

    OrderRequest::new(
        136,
        route,
        packages,
        PackageFactory::recipient(),
        PackageFactory::sender(),
    )
}

#[tokio::test]
async fn test_register_order_stores_uuid_and_state() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_partial_json(serde_json::json!({ "type": 1, "tariff_code": 136 })))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(TestDataFactory::order_body(ORDER_UUID, "ACCEPTED", None)),
        )
        .expect(1)
        .mount(&upstream.server)
        .await;

    let orders: Arc<MemoryStore<Order>> = Arc::new(MemoryStore::new());
    let mut repos = Repositories::in_memory();
    repos.orders = orders.clone();
    let context = upstream.context_with(repos);

    let order = context.orders.register_order(&order_request()).await.unwrap();

    assert_eq!(order.uuid, ORDER_UUID);
    assert_eq!(order.state, OrderState::Accepted);
    assert!(orders.exists(&ORDER_UUID.to_string()).await.unwrap());
}

#[tokio::test]
async fn test_order_uuid_reuses_stored_order() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(0).await;
    upstream
        .mount_post(
            "/v2/orders",
            TestDataFactory::order_body("never", "ACCEPTED", None),
            0,
        )
        .await;

    let mut repos = Repositories::in_memory();
    repos.orders = Arc::new(MemoryStore::with_rows(vec![Order::new(
        ORDER_UUID,
        OrderState::Accepted,
    )]));
    let context = upstream.context_with(repos);

    let uuid = context
        .orders
        .order_uuid(|| async { Err(AppError::internal("stored order must be reused")) })
        .await
        .unwrap();

    assert_eq!(uuid, ORDER_UUID);
}

#[tokio::test]
async fn test_order_uuid_registers_when_store_is_empty() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    upstream
        .mount_post(
            "/v2/orders",
            TestDataFactory::order_body(ORDER_UUID, "ACCEPTED", None),
            1,
        )
        .await;

    let context = upstream.memory_context();
    let uuid = context
        .orders
        .order_uuid(|| async { Ok(order_request()) })
        .await
        .unwrap();

    assert_eq!(uuid, ORDER_UUID);
}

#[tokio::test]
async fn test_state_and_tracking_number_lookups() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    upstream
        .mount_get(
            &format!("/v2/orders/{}", ORDER_UUID),
            TestDataFactory::order_body(ORDER_UUID, "SUCCESSFUL", Some("1106321651")),
            2,
        )
        .await;
    upstream
        .mount_get_with_query(
            "/v2/orders",
            "cdek_number",
            "1106321651",
            TestDataFactory::order_body(ORDER_UUID, "SUCCESSFUL", Some("1106321651")),
            1,
        )
        .await;

    let context = upstream.memory_context();

    assert_eq!(
        context.orders.order_state(ORDER_UUID).await.unwrap(),
        RequestState::Successful
    );
    let number = context.orders.tracking_number(ORDER_UUID).await.unwrap();
    assert_eq!(number, "1106321651");

    let found = context.orders.find_by_tracking_number(&number).await.unwrap();
    assert_eq!(found.entity.uuid, ORDER_UUID);
}

#[tokio::test]
async fn test_missing_tracking_number_is_not_found() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    upstream
        .mount_get(
            &format!("/v2/orders/{}", ORDER_UUID),
            TestDataFactory::order_body(ORDER_UUID, "ACCEPTED", None),
            1,
        )
        .await;

    let context = upstream.memory_context();
    let result = context.orders.tracking_number(ORDER_UUID).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_wait_for_state_returns_once_reached() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    let order_path = format!("/v2/orders/{}", ORDER_UUID);

    // first two lookups still waiting, then processed
    Mock::given(method("GET"))
        .and(path(order_path.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(TestDataFactory::order_body(ORDER_UUID, "WAITING", None)),
        )
        .up_to_n_times(2)
        .expect(2)
        .mount(&upstream.server)
        .await;
    upstream
        .mount_get(
            &order_path,
            TestDataFactory::order_body(ORDER_UUID, "SUCCESSFUL", Some("1106321651")),
            1,
        )
        .await;

    let context = upstream.memory_context();
    let info = context
        .orders
        .wait_for_state(ORDER_UUID, RequestState::Successful, &fast_poll_policy(5))
        .await
        .unwrap();

    assert_eq!(info.tracking_number(), Some("1106321651"));
}

#[tokio::test]
async fn test_wait_for_state_times_out_after_max_attempts() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    upstream
        .mount_get(
            &format!("/v2/orders/{}", ORDER_UUID),
            TestDataFactory::order_body(ORDER_UUID, "WAITING", None),
            3,
        )
        .await;

    let context = upstream.memory_context();
    let result = context
        .orders
        .wait_for_state(ORDER_UUID, RequestState::Successful, &fast_poll_policy(3))
        .await;

    assert!(matches!(result, Err(AppError::Timeout(_))));
}

#[tokio::test]
async fn test_rejected_registration_is_stored_invalid() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    upstream
        .mount_post(
            "/v2/orders",
            TestDataFactory::order_body(ORDER_UUID, "INVALID", None),
            1,
        )
        .await;

    let context = upstream.memory_context();
    let order = context.orders.register_order(&order_request()).await.unwrap();

    assert_eq!(order.state, OrderState::Invalid);
}

#[tokio::test]
async fn test_lookup_by_unknown_number_is_filtered_by_query() {
    let upstream = TestUpstream::start().await;
    upstream.mount_token(1).await;
    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .and(query_param("cdek_number", "0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(TestDataFactory::error_body(
            "v2_entity_not_found",
            "Entity is not found",
        )))
        .expect(1)
        .mount(&upstream.server)
        .await;

    let context = upstream.memory_context();
    let error = context.orders.find_by_tracking_number("0").await.unwrap_err();

    assert_upstream_status(&error, reqwest::StatusCode::NOT_FOUND);
}
