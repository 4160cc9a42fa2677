use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Entity;

const CITIES_SCOPE: &str = "cities";

/// Record that a complete upstream listing has been stored
///
/// Name suggestions and postal-code lookups write into the same tables as the
/// full listings, so a non-empty table does not mean the listing is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ListingMarker {
    /// `cities` or `delivery_points:<city code>`
    pub scope: String,
    pub created_at: DateTime<Utc>,
}

impl ListingMarker {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            created_at: Utc::now().trunc_subsecs(0),
        }
    }

    /// Marker for the full city list
    pub fn cities() -> Self {
        Self::new(Self::cities_scope())
    }

    /// Marker for every delivery point of one city
    pub fn city_points(city_code: u32) -> Self {
        Self::new(Self::city_points_scope(city_code))
    }

    pub fn cities_scope() -> String {
        CITIES_SCOPE.to_string()
    }

    pub fn city_points_scope(city_code: u32) -> String {
        format!("delivery_points:{}", city_code)
    }
}

impl Entity for ListingMarker {
    type Id = String;
    const KIND: &'static str = "listing_marker";

    fn id(&self) -> String {
        self.scope.clone()
    }
}
