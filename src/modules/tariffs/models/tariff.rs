use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::core::Entity;

/// Tariff catalogue entry from `v2/calculator/alltariffs`
///
/// `id` is generated by the store; the tariff name is the identity used for
/// skip-on-exists writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tariff {
    pub id: Option<u64>,
    pub tariff_name: String,
    pub tariff_description: Option<String>,
    /// Kilograms
    pub weight_min: Option<f64>,
    /// Kilograms
    pub weight_max: Option<f64>,
    /// Centimetres
    pub length_max: Option<f64>,
    pub width_max: Option<f64>,
    pub height_max: Option<f64>,
}

impl Entity for Tariff {
    type Id = String;
    const KIND: &'static str = "tariff";

    fn id(&self) -> String {
        self.tariff_name.clone()
    }

    fn with_generated(mut self, row_id: u64) -> Self {
        self.id = Some(row_id);
        self
    }
}

/// Delivery mode offered by a tariff; `tariff_code` is unique across modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DeliveryMode {
    pub id: Option<u64>,
    pub tariff_id: u64,
    pub delivery_mode: i32,
    pub delivery_mode_name: Option<String>,
    pub tariff_code: u32,
}

impl Entity for DeliveryMode {
    type Id = u32;
    const KIND: &'static str = "delivery_mode";

    fn id(&self) -> u32 {
        self.tariff_code
    }

    fn with_generated(mut self, row_id: u64) -> Self {
        self.id = Some(row_id);
        self
    }
}

impl DeliveryMode {
    pub fn from_payload(payload: DeliveryModePayload, tariff_id: u64) -> Self {
        Self {
            id: None,
            tariff_id,
            delivery_mode: payload.delivery_mode as i32,
            delivery_mode_name: payload.delivery_mode_name,
            tariff_code: payload.tariff_code,
        }
    }
}

/// Response of `v2/calculator/alltariffs`
#[derive(Debug, Clone, Deserialize)]
pub struct AllTariffsPayload {
    pub tariff_codes: Vec<TariffPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TariffPayload {
    pub tariff_name: String,
    pub tariff_description: Option<String>,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub length_max: Option<f64>,
    pub width_max: Option<f64>,
    pub height_max: Option<f64>,
    #[serde(default)]
    pub delivery_modes: Vec<DeliveryModePayload>,
}

impl TariffPayload {
    /// Catalogue row without its modes
    pub fn to_tariff(&self) -> Tariff {
        Tariff {
            id: None,
            tariff_name: self.tariff_name.clone(),
            tariff_description: self.tariff_description.clone(),
            weight_min: self.weight_min,
            weight_max: self.weight_max,
            length_max: self.length_max,
            width_max: self.width_max,
            height_max: self.height_max,
        }
    }
}

/// The catalogue sends codes either as numbers or as numeric strings
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryModePayload {
    #[serde(deserialize_with = "lenient_u32")]
    pub delivery_mode: u32,
    pub delivery_mode_name: Option<String>,
    #[serde(deserialize_with = "lenient_u32")]
    pub tariff_code: u32,
}

fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
