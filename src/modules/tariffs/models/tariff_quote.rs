use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::core::Entity;

/// Tariff offered for a concrete city pair, from `v2/calculator/tarifflist`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TariffQuote {
    pub tariff_code: u32,
    pub from_city_code: u32,
    pub to_city_code: u32,
    pub tariff_name: Option<String>,
    pub tariff_description: Option<String>,
    pub delivery_mode: Option<i32>,
    pub delivery_sum: Option<f64>,
    pub period_min: Option<i32>,
    pub period_max: Option<i32>,
    pub calendar_min: Option<i32>,
    pub calendar_max: Option<i32>,
    pub delivery_date_range: Option<Value>,
}

impl Entity for TariffQuote {
    type Id = (u32, u32, u32);
    const KIND: &'static str = "tariff_quote";

    fn id(&self) -> (u32, u32, u32) {
        (self.tariff_code, self.from_city_code, self.to_city_code)
    }
}

impl TariffQuote {
    /// Tag a wire quote with the route it was calculated for
    pub fn from_payload(payload: TariffQuotePayload, from_city_code: u32, to_city_code: u32) -> Self {
        Self {
            tariff_code: payload.tariff_code,
            from_city_code,
            to_city_code,
            tariff_name: payload.tariff_name,
            tariff_description: payload.tariff_description,
            delivery_mode: payload.delivery_mode,
            delivery_sum: payload.delivery_sum,
            period_min: payload.period_min,
            period_max: payload.period_max,
            calendar_min: payload.calendar_min,
            calendar_max: payload.calendar_max,
            delivery_date_range: payload.delivery_date_range,
        }
    }
}

/// Response of `v2/calculator/tarifflist`
#[derive(Debug, Clone, Deserialize)]
pub struct TariffListPayload {
    #[serde(default)]
    pub tariff_codes: Vec<TariffQuotePayload>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TariffQuotePayload {
    pub tariff_code: u32,
    pub tariff_name: Option<String>,
    pub tariff_description: Option<String>,
    pub delivery_mode: Option<i32>,
    pub delivery_sum: Option<f64>,
    pub period_min: Option<i32>,
    pub period_max: Option<i32>,
    pub calendar_min: Option<i32>,
    pub calendar_max: Option<i32>,
    pub delivery_date_range: Option<Value>,
}

/// Response of `v2/calculator/tariff`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TariffCalculation {
    pub delivery_sum: f64,
    pub period_min: Option<i32>,
    pub period_max: Option<i32>,
    pub calendar_min: Option<i32>,
    pub calendar_max: Option<i32>,
    pub weight_calc: Option<u32>,
    pub total_sum: Option<f64>,
    pub currency: Option<String>,
    #[serde(default)]
    pub services: Vec<Value>,
}

/// Extra service requested in `v2/calculator/tariffAndService`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalService {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl AdditionalService {
    pub fn new(code: impl Into<String>, parameter: Option<String>) -> Self {
        Self {
            code: code.into(),
            parameter,
        }
    }
}
