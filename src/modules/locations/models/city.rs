use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Entity;

/// Cached city record
///
/// `code` is the upstream numeric city code and the join key for delivery
/// points, postal codes and tariff quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct City {
    pub city_uuid: String,
    pub code: u32,
    pub city: Option<String>,
    pub full_name: Option<String>,
    pub country_code: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<u32>,
    pub sub_region: Option<String>,
    pub fias_guid: Option<String>,
    pub fias_region_guid: Option<String>,
    pub kladr_code: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub time_zone: Option<String>,
    pub payment_limit: Option<f64>,
}

impl Entity for City {
    type Id = String;
    const KIND: &'static str = "city";

    fn id(&self) -> String {
        self.city_uuid.clone()
    }
}

/// Element of the `v2/location/cities` response
#[derive(Debug, Clone, Deserialize)]
pub struct CityPayload {
    pub city_uuid: String,
    pub code: u32,
    pub city: Option<String>,
    pub country_code: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub region_code: Option<u32>,
    pub sub_region: Option<String>,
    pub fias_guid: Option<String>,
    pub fias_region_guid: Option<String>,
    pub kladr_code: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub time_zone: Option<String>,
    pub payment_limit: Option<f64>,
}

impl From<CityPayload> for City {
    fn from(payload: CityPayload) -> Self {
        Self {
            city_uuid: payload.city_uuid,
            code: payload.code,
            city: payload.city,
            full_name: None,
            country_code: payload.country_code,
            country: payload.country,
            region: payload.region,
            region_code: payload.region_code,
            sub_region: payload.sub_region,
            fias_guid: payload.fias_guid,
            fias_region_guid: payload.fias_region_guid,
            kladr_code: payload.kladr_code,
            longitude: payload.longitude,
            latitude: payload.latitude,
            time_zone: payload.time_zone,
            payment_limit: payload.payment_limit,
        }
    }
}

/// Element of the `v2/location/suggest/cities` response
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestedCityPayload {
    pub city_uuid: String,
    pub code: u32,
    pub full_name: String,
    pub country_code: Option<String>,
}

impl From<SuggestedCityPayload> for City {
    fn from(payload: SuggestedCityPayload) -> Self {
        // "Псков, Псковская обл., Россия" -> "Псков"
        let city = payload
            .full_name
            .split(',')
            .next()
            .map(|name| name.trim().to_string());

        Self {
            city_uuid: payload.city_uuid,
            code: payload.code,
            city,
            full_name: Some(payload.full_name),
            country_code: payload.country_code,
            country: None,
            region: None,
            region_code: None,
            sub_region: None,
            fias_guid: None,
            fias_region_guid: None,
            kladr_code: None,
            longitude: None,
            latitude: None,
            time_zone: None,
            payment_limit: None,
        }
    }
}

/// Element of the `v2/location/regions` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region: Option<String>,
    pub region_code: Option<u32>,
    pub country_code: Option<String>,
    pub country: Option<String>,
}

/// Filter for selecting a city from the resolved set; every given criterion
/// must hold
#[derive(Debug, Clone, PartialEq)]
pub enum CityCriteria {
    Uuid(String),
    Code(u32),
    Name(String),
    Region(String),
    RegionCode(u32),
    CountryCode(String),
    TimeZone(String),
}

impl CityCriteria {
    pub fn matches(&self, city: &City) -> bool {
        match self {
            CityCriteria::Uuid(uuid) => city.city_uuid == *uuid,
            CityCriteria::Code(code) => city.code == *code,
            CityCriteria::Name(name) => city.city.as_deref() == Some(name.as_str()),
            CityCriteria::Region(region) => city.region.as_deref() == Some(region.as_str()),
            CityCriteria::RegionCode(code) => city.region_code == Some(*code),
            CityCriteria::CountryCode(code) => city.country_code.as_deref() == Some(code.as_str()),
            CityCriteria::TimeZone(zone) => city.time_zone.as_deref() == Some(zone.as_str()),
        }
    }
}
