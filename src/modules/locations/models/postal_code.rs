use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Entity;

/// Cached postal code, joined to its city by code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostalCode {
    pub postal_code: String,
    pub city_code: u32,
}

impl Entity for PostalCode {
    type Id = String;
    const KIND: &'static str = "postal_code";

    fn id(&self) -> String {
        self.postal_code.clone()
    }
}

/// Response of `v2/location/postalcodes`
#[derive(Debug, Clone, Deserialize)]
pub struct PostalCodesPayload {
    pub code: u32,
    #[serde(default)]
    pub postal_codes: Vec<String>,
}

impl PostalCodesPayload {
    pub fn into_rows(self) -> Vec<PostalCode> {
        let city_code = self.code;
        self.postal_codes
            .into_iter()
            .map(|postal_code| PostalCode {
                postal_code,
                city_code,
            })
            .collect()
    }
}
