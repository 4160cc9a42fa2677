use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::super::models::{
    City, CityCriteria, CityPayload, DeliveryPoint, DeliveryPointPayload, ListingMarker, Location,
    PostalCodesPayload, Region, SuggestedCityPayload,
};
use super::super::repositories::{
    CityRepository, DeliveryPointRepository, ListingMarkerRepository, PostalCodeRepository,
};
use crate::core::{AppError, Repository, Result};
use crate::modules::auth::TokenManager;

/// Origin and destination of a shipment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(rename = "from_location")]
    pub from: Location,
    #[serde(rename = "to_location")]
    pub to: Location,
}

/// Resolves cities, postal codes and delivery points cache-first
///
/// Every lookup consults its repository first; on a miss it calls the
/// upstream API with the token manager's header and writes the result back.
/// Full listings (all cities, all points of a city) are served from the store
/// only once a listing marker says they were stored in full.
pub struct LocationManager {
    tokens: Arc<TokenManager>,
    cities: Arc<dyn CityRepository>,
    postal_codes: Arc<dyn PostalCodeRepository>,
    points: Arc<dyn DeliveryPointRepository>,
    listings: Arc<dyn ListingMarkerRepository>,
    resolved_cities: OnceCell<Vec<City>>,
}

impl LocationManager {
    pub fn new(
        tokens: Arc<TokenManager>,
        cities: Arc<dyn CityRepository>,
        postal_codes: Arc<dyn PostalCodeRepository>,
        points: Arc<dyn DeliveryPointRepository>,
        listings: Arc<dyn ListingMarkerRepository>,
    ) -> Self {
        Self {
            tokens,
            cities,
            postal_codes,
            points,
            listings,
            resolved_cities: OnceCell::new(),
        }
    }

    /// Full city list, resolved once per manager
    ///
    /// An empty list is not memoized; the next call asks again.
    pub async fn get_cities(&self) -> Result<&[City]> {
        if let Some(cities) = self.resolved_cities.get() {
            return Ok(cities.as_slice());
        }

        let cities = self.load_cities().await?;
        if cities.is_empty() {
            return Ok(&[]);
        }

        let cities = self
            .resolved_cities
            .get_or_init(|| async move { cities })
            .await;

        Ok(cities.as_slice())
    }

    /// First resolved city matching every criterion, or a random city when
    /// no criteria are given
    pub async fn find_city(&self, criteria: &[CityCriteria]) -> Result<Option<City>> {
        let cities = self.get_cities().await?;

        if criteria.is_empty() {
            let city = cities
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or_else(|| AppError::not_found("no cities resolved"))?;
            return Ok(Some(city));
        }

        Ok(cities
            .iter()
            .find(|city| criteria.iter().all(|criterion| criterion.matches(city)))
            .cloned())
    }

    /// Delivery points of a city, fetched by city code until the city's
    /// listing has been stored in full
    ///
    /// Points stored by a postal-code lookup alone do not count as a hit.
    pub async fn get_delivery_points(&self, city: &City) -> Result<Vec<DeliveryPoint>> {
        let scope = ListingMarker::city_points_scope(city.code);
        if self.listings.is_complete(&scope).await? {
            let stored = self.points.find_by_city_code(city.code).await?;
            debug!(city_code = city.code, count = stored.len(), "Delivery point cache hit");
            return Ok(stored);
        }

        info!(city_code = city.code, "Delivery point cache miss, fetching from upstream");
        let url = self.tokens.client().endpoints().delivery_points();
        let payloads: Vec<DeliveryPointPayload> =
            self.fetch(&url, &[("city_code", city.code)]).await?;

        let points = self.write_points(payloads, city.code).await?;
        self.listings
            .write_many(vec![ListingMarker::city_points(city.code)])
            .await?;

        Ok(points)
    }

    /// Code of the first city whose name contains `name`, suggested by the
    /// upstream on a miss
    pub async fn city_code(&self, name: &str) -> Result<u32> {
        if let Some(city) = self.cities.find_by_name(name).await? {
            debug!(name = %name, code = city.code, "City cache hit");
            return Ok(city.code);
        }

        info!(name = %name, "City cache miss, asking upstream for suggestions");
        let url = self.tokens.client().endpoints().suggest_cities();
        let suggested: Vec<SuggestedCityPayload> = self.fetch(&url, &[("name", name)]).await?;

        let code = suggested
            .first()
            .map(|city| city.code)
            .ok_or_else(|| AppError::not_found(format!("no city suggested for {}", name)))?;

        self.cities
            .write_many(suggested.into_iter().map(City::from).collect())
            .await?;

        Ok(code)
    }

    /// Postal codes of a city
    pub async fn postal_codes(&self, city_code: u32) -> Result<Vec<String>> {
        let stored = self.postal_codes.find_by_city_code(city_code).await?;
        if !stored.is_empty() {
            debug!(city_code = city_code, count = stored.len(), "Postal code cache hit");
            return Ok(stored.into_iter().map(|row| row.postal_code).collect());
        }

        info!(city_code = city_code, "Postal code cache miss, fetching from upstream");
        let url = self.tokens.client().endpoints().postal_codes();
        let mut payload: PostalCodesPayload = self.fetch(&url, &[("code", city_code)]).await?;
        payload.code = city_code;

        let rows = self.postal_codes.write_many(payload.into_rows()).await?;
        Ok(rows.into_iter().map(|row| row.postal_code).collect())
    }

    /// One postal code of a city, chosen uniformly
    pub async fn random_postal_code(&self, city_code: u32) -> Result<String> {
        let postal_codes = self.postal_codes(city_code).await?;

        postal_codes
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("no postal codes for city {}", city_code)))
    }

    /// Delivery points serving a postal code of the given city
    pub async fn delivery_points_by_postal_code(
        &self,
        city_code: u32,
        postal_code: &str,
    ) -> Result<Vec<DeliveryPoint>> {
        let stored = self.points.find_by_postal_code(postal_code).await?;
        if !stored.is_empty() {
            debug!(postal_code = %postal_code, count = stored.len(), "Delivery point cache hit");
            return Ok(stored);
        }

        info!(postal_code = %postal_code, "Delivery point cache miss, fetching from upstream");
        let url = self.tokens.client().endpoints().delivery_points();
        let payloads: Vec<DeliveryPointPayload> =
            self.fetch(&url, &[("postal_code", postal_code)]).await?;

        self.write_points(payloads, city_code).await
    }

    /// City name -> code -> postal code -> delivery points, returning the
    /// locations of the first and last point
    pub async fn route_for_city(&self, name: &str) -> Result<Route> {
        let city_code = self.city_code(name).await?;
        let postal_code = self.random_postal_code(city_code).await?;
        let points = self
            .delivery_points_by_postal_code(city_code, &postal_code)
            .await?;

        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AppError::not_found(format!(
                    "no delivery points for postal code {}",
                    postal_code
                )))
            }
        };

        Ok(Route {
            from: first.location()?,
            to: last.location()?,
        })
    }

    /// Region list, not cached
    pub async fn regions(&self) -> Result<Vec<Region>> {
        let url = self.tokens.client().endpoints().regions();
        self.fetch(&url, &[] as &[(&str, &str)]).await
    }

    async fn load_cities(&self) -> Result<Vec<City>> {
        if self.listings.is_complete(&ListingMarker::cities_scope()).await? {
            let cached = self.cities.all().await?;
            info!(count = cached.len(), "City cache hit");
            return Ok(cached);
        }

        info!("City cache miss, fetching full city list from upstream");
        let url = self.tokens.client().endpoints().cities();
        let payloads: Vec<CityPayload> = self.fetch(&url, &[] as &[(&str, &str)]).await?;

        let cities = self
            .cities
            .write_many(payloads.into_iter().map(City::from).collect())
            .await?;

        // an empty listing stays unmarked so a later call asks again
        if !cities.is_empty() {
            self.listings.write_many(vec![ListingMarker::cities()]).await?;
        }

        Ok(cities)
    }

    async fn write_points(
        &self,
        payloads: Vec<DeliveryPointPayload>,
        city_code: u32,
    ) -> Result<Vec<DeliveryPoint>> {
        let points = payloads
            .into_iter()
            .map(|payload| DeliveryPoint::from_payload(payload, city_code))
            .collect();

        self.points.write_many(points).await
    }

    async fn fetch<Q, T>(&self, url: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let header = self.tokens.auth_header().await?;
        self.tokens.client().get_json(url, Some(&header), query).await
    }
}
