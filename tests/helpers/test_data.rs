// Test data factory
//
// Upstream response bodies and entities shaped like the real API.
// Uses UUIDs where identities must not collide between tests.

use chrono::{Duration, SubsecRound, Utc};
use serde_json::{json, Value};
use shipcheck::auth::AuthToken;
use shipcheck::locations::City;
use uuid::Uuid;

pub const PSKOV: &str = "Псков";
pub const PSKOV_CODE: u32 = 270;
pub const PSKOV_POSTAL_CODE: &str = "180000";
pub const MOSCOW_CODE: u32 = 44;

pub struct TestDataFactory;

impl TestDataFactory {
    pub fn token_body(expires_in: i64) -> Value {
        json!({
            "access_token": format!("access-{}", Uuid::new_v4().simple()),
            "token_type": "bearer",
            "expires_in": expires_in,
            "scope": "order:all payment:all",
            "jti": Uuid::new_v4().to_string()
        })
    }

    /// Stored token expiring `offset_secs` from now
    pub fn stored_token(offset_secs: i64) -> AuthToken {
        AuthToken {
            jti: Uuid::new_v4().to_string(),
            access_token: "stored-access-token".to_string(),
            token_type: Some("bearer".to_string()),
            expired_at: (Utc::now() + Duration::seconds(offset_secs)).trunc_subsecs(0),
            scope: None,
        }
    }

    /// Stable per city code, as the upstream returns the same uuid from the
    /// list and the suggest endpoints
    pub fn city_uuid(code: u32) -> String {
        format!("00000000-0000-4000-8000-{:012}", code)
    }

    pub fn city_json(code: u32, name: &str) -> Value {
        json!({
            "city_uuid": Self::city_uuid(code),
            "code": code,
            "city": name,
            "country_code": "RU",
            "country": "Россия",
            "region": format!("{} область", name),
            "region_code": 60,
            "longitude": 28.33,
            "latitude": 57.81,
            "time_zone": "Europe/Moscow",
            "payment_limit": -1.0
        })
    }

    pub fn cities_body() -> Value {
        json!([
            Self::city_json(PSKOV_CODE, PSKOV),
            Self::city_json(MOSCOW_CODE, "Москва"),
            Self::city_json(137, "Санкт-Петербург")
        ])
    }

    pub fn city(code: u32, name: &str) -> City {
        serde_json::from_value::<shipcheck::locations::models::CityPayload>(Self::city_json(
            code, name,
        ))
        .map(City::from)
        .unwrap_or_else(|e| panic!("invalid city fixture: {}", e))
    }

    pub fn suggest_body(code: u32, name: &str) -> Value {
        json!([{
            "city_uuid": Self::city_uuid(code),
            "code": code,
            "full_name": format!("{}, Псковская обл., Россия", name),
            "country_code": "RU"
        }])
    }

    pub fn postal_codes_body(code: u32, postal_codes: &[&str]) -> Value {
        json!({
            "code": code,
            "postal_codes": postal_codes
        })
    }

    pub fn delivery_point_json(
        code: &str,
        postal_code: &str,
        weight_min: Option<f64>,
        weight_max: Option<f64>,
    ) -> Value {
        json!({
            "code": code,
            "uuid": Uuid::new_v4().to_string(),
            "name": format!("Пункт {}", code),
            "type": "PVZ",
            "owner_code": "cdek",
            "work_time": "Пн-Пт 10:00-20:00",
            "is_handout": true,
            "is_reception": true,
            "have_cashless": true,
            "allowed_cod": true,
            "weight_min": weight_min,
            "weight_max": weight_max,
            "phones": [{ "number": "+78112000000" }],
            "location": {
                "country_code": "RU",
                "region": "Псковская область",
                "city_code": PSKOV_CODE,
                "city": PSKOV,
                "postal_code": postal_code,
                "longitude": 28.33,
                "latitude": 57.81,
                "address": format!("ул. Советская, {}", code.len())
            }
        })
    }

    pub fn delivery_points_body(postal_code: &str) -> Value {
        json!([
            Self::delivery_point_json("PSK1", postal_code, Some(0.1), Some(5.0)),
            Self::delivery_point_json("PSK22", postal_code, Some(0.5), Some(3.0))
        ])
    }

    pub fn tariff_list_body() -> Value {
        json!({
            "tariff_codes": [
                {
                    "tariff_code": 136,
                    "tariff_name": "Посылка склад-склад",
                    "delivery_mode": 4,
                    "delivery_sum": 420.0,
                    "period_min": 2,
                    "period_max": 3
                },
                {
                    "tariff_code": 137,
                    "tariff_name": "Посылка склад-дверь",
                    "delivery_mode": 3,
                    "delivery_sum": 610.0,
                    "period_min": 2,
                    "period_max": 4,
                    "delivery_date_range": { "min": "2026-10-19", "max": "2026-10-21" }
                }
            ]
        })
    }

    pub fn all_tariffs_body() -> Value {
        json!({
            "tariff_codes": [
                {
                    "tariff_name": "Посылка",
                    "weight_min": 0.0,
                    "weight_max": 30.0,
                    "length_max": 150.0,
                    "delivery_modes": [
                        { "delivery_mode": "4", "delivery_mode_name": "склад-склад", "tariff_code": "136" },
                        { "delivery_mode": "3", "delivery_mode_name": "склад-дверь", "tariff_code": "137" }
                    ]
                },
                {
                    "tariff_name": "Экспресс",
                    "weight_min": 0.0,
                    "weight_max": 5.0,
                    "delivery_modes": [
                        { "delivery_mode": "1", "delivery_mode_name": "дверь-дверь", "tariff_code": "480" }
                    ]
                }
            ]
        })
    }

    pub fn tariff_calculation_body() -> Value {
        json!({
            "delivery_sum": 420.0,
            "period_min": 2,
            "period_max": 3,
            "weight_calc": 1500,
            "total_sum": 504.0,
            "currency": "RUB",
            "services": []
        })
    }

    pub fn order_body(uuid: &str, state: &str, cdek_number: Option<&str>) -> Value {
        json!({
            "entity": {
                "uuid": uuid,
                "cdek_number": cdek_number
            },
            "requests": [{
                "request_uuid": Uuid::new_v4().to_string(),
                "type": "CREATE",
                "state": state,
                "date_time": "2026-10-17T10:00:00+0000",
                "errors": []
            }]
        })
    }

    pub fn error_body(code: &str, message: &str) -> Value {
        json!({
            "requests": [{
                "type": "CREATE",
                "state": "INVALID",
                "errors": [{ "code": code, "message": message }]
            }]
        })
    }
}
