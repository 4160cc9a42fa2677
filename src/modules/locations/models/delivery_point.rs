use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::core::{AppError, Entity, Result};

/// Cached pickup/drop-off point
///
/// `city_code` is assigned by the writer from the city the points were
/// requested for, never taken from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DeliveryPoint {
    pub code: String,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub city_code: u32,
    pub postal_code: Option<String>,
    pub point_type: Option<String>,
    pub owner_code: Option<String>,
    pub address_comment: Option<String>,
    pub nearest_station: Option<String>,
    pub nearest_metro_station: Option<String>,
    pub work_time: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    pub site: Option<String>,
    pub take_only: Option<bool>,
    pub is_handout: Option<bool>,
    pub is_reception: Option<bool>,
    pub is_dressing_room: Option<bool>,
    pub is_marketplace: Option<bool>,
    pub is_ltl: Option<bool>,
    pub have_cashless: Option<bool>,
    pub have_cash: Option<bool>,
    pub have_fast_payment_system: Option<bool>,
    pub allowed_cod: Option<bool>,
    pub fulfillment: Option<bool>,
    /// Kilograms
    pub weight_min: Option<f64>,
    /// Kilograms
    pub weight_max: Option<f64>,
    pub distance: Option<u32>,
    pub phones: Option<Value>,
    pub office_image_list: Option<Value>,
    pub work_time_list: Option<Value>,
    pub work_time_exception_list: Option<Value>,
    pub dimensions: Option<Value>,
    pub errors: Option<Value>,
    pub warnings: Option<Value>,
    pub location: Option<Value>,
}

impl Entity for DeliveryPoint {
    type Id = String;
    const KIND: &'static str = "delivery_point";

    fn id(&self) -> String {
        self.code.clone()
    }
}

impl DeliveryPoint {
    /// Convert a wire payload, tagging it with the owning city
    pub fn from_payload(payload: DeliveryPointPayload, city_code: u32) -> Self {
        let postal_code = payload
            .location
            .as_ref()
            .and_then(|location| location.get("postal_code"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            code: payload.code,
            uuid: payload.uuid,
            name: payload.name,
            city_code,
            postal_code,
            point_type: payload.point_type,
            owner_code: payload.owner_code,
            address_comment: payload.address_comment,
            nearest_station: payload.nearest_station,
            nearest_metro_station: payload.nearest_metro_station,
            work_time: payload.work_time,
            email: payload.email,
            note: payload.note,
            site: payload.site,
            take_only: payload.take_only,
            is_handout: payload.is_handout,
            is_reception: payload.is_reception,
            is_dressing_room: payload.is_dressing_room,
            is_marketplace: payload.is_marketplace,
            is_ltl: payload.is_ltl,
            have_cashless: payload.have_cashless,
            have_cash: payload.have_cash,
            have_fast_payment_system: payload.have_fast_payment_system,
            allowed_cod: payload.allowed_cod,
            fulfillment: payload.fulfillment,
            weight_min: payload.weight_min,
            weight_max: payload.weight_max,
            distance: payload.distance,
            phones: payload.phones,
            office_image_list: payload.office_image_list,
            work_time_list: payload.work_time_list,
            work_time_exception_list: payload.work_time_exception_list,
            dimensions: payload.dimensions,
            errors: payload.errors,
            warnings: payload.warnings,
            location: payload.location,
        }
    }

    /// Typed view of the stored location blob
    pub fn location(&self) -> Result<Location> {
        let location = self.location.clone().ok_or_else(|| {
            AppError::malformed(format!("delivery point {} has no location", self.code))
        })?;

        serde_json::from_value(location).map_err(|e| {
            AppError::malformed(format!("delivery point {} location: {}", self.code, e))
        })
    }
}

/// Element of the `v2/deliverypoints` response
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryPointPayload {
    pub code: String,
    pub uuid: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub point_type: Option<String>,
    pub owner_code: Option<String>,
    pub address_comment: Option<String>,
    pub nearest_station: Option<String>,
    pub nearest_metro_station: Option<String>,
    pub work_time: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
    pub site: Option<String>,
    pub take_only: Option<bool>,
    pub is_handout: Option<bool>,
    pub is_reception: Option<bool>,
    pub is_dressing_room: Option<bool>,
    pub is_marketplace: Option<bool>,
    pub is_ltl: Option<bool>,
    pub have_cashless: Option<bool>,
    pub have_cash: Option<bool>,
    pub have_fast_payment_system: Option<bool>,
    pub allowed_cod: Option<bool>,
    pub fulfillment: Option<bool>,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub distance: Option<u32>,
    pub phones: Option<Value>,
    pub office_image_list: Option<Value>,
    pub work_time_list: Option<Value>,
    pub work_time_exception_list: Option<Value>,
    pub dimensions: Option<Value>,
    pub errors: Option<Value>,
    pub warnings: Option<Value>,
    pub location: Option<Value>,
}

/// Address of a route endpoint, as returned inside delivery points and as
/// accepted by the calculator and order endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(alias = "city_code", skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
}

impl Location {
    /// Location identified by city code only
    pub fn for_city(code: u32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }
}
