#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use shipcheck::auth::{MySqlTokenRepository, TokenRepository};
use shipcheck::core::Repository;
use shipcheck::locations::models::DeliveryPointPayload;
use shipcheck::locations::{
    CityRepository, DeliveryPoint, DeliveryPointRepository, ListingMarker,
    ListingMarkerRepository, MySqlCityRepository, MySqlDeliveryPointRepository,
    MySqlListingMarkerRepository, MySqlPostalCodeRepository, PostalCode, PostalCodeRepository,
};
use shipcheck::orders::{MySqlOrderRepository, Order, OrderRepository, OrderState};
use shipcheck::tariffs::models::AllTariffsPayload;
use shipcheck::tariffs::{
    DeliveryMode, DeliveryModeRepository, MySqlDeliveryModeRepository,
    MySqlTariffQuoteRepository, MySqlTariffRepository, TariffQuote, TariffQuoteRepository,
    TariffRepository,
};

async fn seed_cities(db: &TestDatabase) -> MySqlCityRepository {
    let cities = MySqlCityRepository::new(db.pool.clone());
    cities
        .write_many(vec![
            TestDataFactory::city(PSKOV_CODE, PSKOV),
            TestDataFactory::city(MOSCOW_CODE, "Москва"),
        ])
        .await
        .unwrap();
    cities
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_city_round_trip_is_attribute_identical() {
    let db = setup_test_db().await;
    let cities = MySqlCityRepository::new(db.pool.clone());
    let pskov = TestDataFactory::city(PSKOV_CODE, PSKOV);

    cities.write_many(vec![pskov.clone()]).await.unwrap();

    let stored = cities.find_by_code(PSKOV_CODE).await.unwrap().unwrap();
    assert_eq!(stored, pskov);

    let by_name = cities.find_by_name("Пск").await.unwrap().unwrap();
    assert_eq!(by_name.city_uuid, pskov.city_uuid);
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_writing_same_cities_twice_creates_no_duplicates() {
    let db = setup_test_db().await;
    let cities = seed_cities(&db).await;
    let all = cities.all().await.unwrap();

    let again = cities.write_many(all.clone()).await.unwrap();

    assert_eq!(again, all);
    assert_eq!(cities.all().await.unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_postal_codes_and_points_join_cities() {
    let db = setup_test_db().await;
    seed_cities(&db).await;

    let postal_codes = MySqlPostalCodeRepository::new(db.pool.clone());
    postal_codes
        .write_many(vec![
            PostalCode {
                postal_code: "180000".to_string(),
                city_code: PSKOV_CODE,
            },
            PostalCode {
                postal_code: "180004".to_string(),
                city_code: PSKOV_CODE,
            },
        ])
        .await
        .unwrap();
    assert_eq!(
        postal_codes.find_by_city_code(PSKOV_CODE).await.unwrap().len(),
        2
    );

    let points = MySqlDeliveryPointRepository::new(db.pool.clone());
    let payloads: Vec<DeliveryPointPayload> =
        serde_json::from_value(TestDataFactory::delivery_points_body(PSKOV_POSTAL_CODE)).unwrap();
    let written: Vec<DeliveryPoint> = payloads
        .into_iter()
        .map(|payload| DeliveryPoint::from_payload(payload, PSKOV_CODE))
        .collect();
    points.write_many(written.clone()).await.unwrap();
    points.write_many(written.clone()).await.unwrap();

    let by_city = points.find_by_city_code(PSKOV_CODE).await.unwrap();
    assert_eq!(by_city.len(), 2);

    let by_postal_code = points.find_by_postal_code(PSKOV_POSTAL_CODE).await.unwrap();
    let first = by_postal_code.iter().find(|p| p.code == "PSK1").unwrap();
    let original = written.iter().find(|p| p.code == "PSK1").unwrap();
    assert_eq!(first.location, original.location);
    assert_eq!(first.location().unwrap().code, Some(PSKOV_CODE));
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_point_for_unknown_city_violates_foreign_key() {
    let db = setup_test_db().await;
    let points = MySqlDeliveryPointRepository::new(db.pool.clone());
    let payloads: Vec<DeliveryPointPayload> =
        serde_json::from_value(TestDataFactory::delivery_points_body(PSKOV_POSTAL_CODE)).unwrap();
    let point = DeliveryPoint::from_payload(payloads[0].clone(), 999_999);

    let result = points.create(point).await;
    assert!(matches!(result, Err(shipcheck::core::AppError::Database(_))));
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_listing_markers_are_scoped() {
    let db = setup_test_db().await;
    let listings = MySqlListingMarkerRepository::new(db.pool.clone());

    assert!(!listings.is_complete(&ListingMarker::cities_scope()).await.unwrap());

    listings
        .write_many(vec![ListingMarker::city_points(PSKOV_CODE)])
        .await
        .unwrap();
    listings
        .write_many(vec![ListingMarker::city_points(PSKOV_CODE)])
        .await
        .unwrap();

    let pskov_scope = ListingMarker::city_points_scope(PSKOV_CODE);
    assert!(listings.is_complete(&pskov_scope).await.unwrap());
    assert!(!listings
        .is_complete(&ListingMarker::city_points_scope(MOSCOW_CODE))
        .await
        .unwrap());
    assert_eq!(listings.all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_latest_token_is_newest_by_expiry() {
    let db = setup_test_db().await;
    let tokens = MySqlTokenRepository::new(db.pool.clone());

    let old = TestDataFactory::stored_token(-600);
    let fresh = TestDataFactory::stored_token(600);
    tokens.write_many(vec![fresh.clone(), old]).await.unwrap();

    let latest = tokens.latest().await.unwrap().unwrap();
    assert_eq!(latest, fresh);
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_catalogue_rows_link_by_generated_id() {
    let db = setup_test_db().await;
    let tariffs = MySqlTariffRepository::new(db.pool.clone());
    let modes = MySqlDeliveryModeRepository::new(db.pool.clone());

    let catalogue: AllTariffsPayload =
        serde_json::from_value(TestDataFactory::all_tariffs_body()).unwrap();
    let payload = &catalogue.tariff_codes[0];

    let tariff = tariffs.write_many(vec![payload.to_tariff()]).await.unwrap()[0].clone();
    let tariff_id = tariff.id.unwrap();
    let again = tariffs.write_many(vec![payload.to_tariff()]).await.unwrap()[0].clone();
    assert_eq!(again.id, Some(tariff_id));

    let rows: Vec<DeliveryMode> = payload
        .delivery_modes
        .iter()
        .cloned()
        .map(|mode| DeliveryMode::from_payload(mode, tariff_id))
        .collect();
    modes.write_many(rows).await.unwrap();

    let linked = modes.find_by_tariff_id(tariff_id).await.unwrap();
    assert_eq!(linked.len(), 2);
    assert_eq!(
        tariffs.find_by_row_id(tariff_id).await.unwrap().unwrap().tariff_name,
        payload.tariff_name
    );
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_quotes_are_found_by_route() {
    let db = setup_test_db().await;
    seed_cities(&db).await;
    let quotes = MySqlTariffQuoteRepository::new(db.pool.clone());

    let quote = TariffQuote {
        tariff_code: 136,
        from_city_code: PSKOV_CODE,
        to_city_code: MOSCOW_CODE,
        tariff_name: Some("Посылка склад-склад".to_string()),
        tariff_description: None,
        delivery_mode: Some(4),
        delivery_sum: Some(420.0),
        period_min: Some(2),
        period_max: Some(3),
        calendar_min: None,
        calendar_max: None,
        delivery_date_range: Some(serde_json::json!({ "min": "2026-10-19" })),
    };
    quotes.write_many(vec![quote.clone()]).await.unwrap();

    assert_eq!(
        quotes.find_by_route(PSKOV_CODE, MOSCOW_CODE).await.unwrap(),
        vec![quote]
    );
    assert!(quotes
        .find_by_route(MOSCOW_CODE, PSKOV_CODE)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_order_state_round_trip() {
    let db = setup_test_db().await;
    let orders = MySqlOrderRepository::new(db.pool.clone());

    let order = Order::new(uuid::Uuid::new_v4().to_string(), OrderState::Invalid);
    orders.write_many(vec![order.clone()]).await.unwrap();

    let first = orders.first().await.unwrap().unwrap();
    assert_eq!(first, order);
}
