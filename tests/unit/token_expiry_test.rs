use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;
use shipcheck::auth::{AuthToken, TokenPayload};
use shipcheck::core::AppError;

fn payload(expires_in: i64) -> TokenPayload {
    serde_json::from_value(json!({
        "access_token": "eyJhbGciOiJSUzI1NiJ9",
        "token_type": "bearer",
        "expires_in": expires_in,
        "scope": "order:all",
        "jti": "5f1c7d3e-2b4a-4e8e-9b0a-3c6d1e2f4a5b"
    }))
    .unwrap()
}

#[test]
fn test_token_expiring_now_is_expired() {
    let received_at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
    let token = AuthToken::from_payload(payload(0), received_at).unwrap();

    assert!(token.is_expired_at(received_at));
}

#[test]
fn test_subsecond_receipt_time_is_truncated() {
    let received_at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap()
        + Duration::milliseconds(750);
    let token = AuthToken::from_payload(payload(60), received_at).unwrap();

    assert_eq!(
        token.expired_at,
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 1, 0).unwrap()
    );
}

#[test]
fn test_empty_access_token_is_rejected() {
    let payload: TokenPayload = serde_json::from_value(json!({
        "access_token": "",
        "expires_in": 3600
    }))
    .unwrap();

    assert!(matches!(
        AuthToken::from_payload(payload, Utc::now()),
        Err(AppError::AuthUnavailable(_))
    ));
}

proptest! {
    #[test]
    fn prop_expiry_boundary(expires_in in 0i64..86_400, elapsed in 0i64..172_800) {
        let received_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let token = AuthToken::from_payload(payload(expires_in), received_at).unwrap();
        let now = received_at + Duration::seconds(elapsed);

        prop_assert_eq!(token.is_expired_at(now), elapsed >= expires_in);
    }
}
