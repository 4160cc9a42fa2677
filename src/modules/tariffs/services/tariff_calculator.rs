use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, warn};

use super::super::models::{
    AdditionalService, AllTariffsPayload, DeliveryMode, Package, TariffCalculation,
    TariffListPayload, TariffQuote,
};
use super::super::repositories::{
    DeliveryModeRepository, TariffQuoteRepository, TariffRepository,
};
use crate::core::{AppError, Repository, Result};
use crate::modules::auth::TokenManager;
use crate::modules::locations::{City, Location, Route};

/// Body shared by the calculator endpoints
#[derive(Debug, Serialize)]
struct CalculatorRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tariff_code: Option<u32>,
    #[serde(flatten)]
    route: &'a Route,
    packages: &'a [Package],
    #[serde(skip_serializing_if = "no_services")]
    services: &'a [AdditionalService],
}

fn no_services(services: &&[AdditionalService]) -> bool {
    services.is_empty()
}

/// Tariff catalogue and per-route quotes, cache-first
pub struct TariffCalculator {
    tokens: Arc<TokenManager>,
    tariffs: Arc<dyn TariffRepository>,
    modes: Arc<dyn DeliveryModeRepository>,
    quotes: Arc<dyn TariffQuoteRepository>,
    resolved_modes: OnceCell<Vec<DeliveryMode>>,
    resolved_quotes: Mutex<HashMap<(u32, u32), Vec<TariffQuote>>>,
}

impl TariffCalculator {
    pub fn new(
        tokens: Arc<TokenManager>,
        tariffs: Arc<dyn TariffRepository>,
        modes: Arc<dyn DeliveryModeRepository>,
        quotes: Arc<dyn TariffQuoteRepository>,
    ) -> Self {
        Self {
            tokens,
            tariffs,
            modes,
            quotes,
            resolved_modes: OnceCell::new(),
            resolved_quotes: Mutex::new(HashMap::new()),
        }
    }

    /// Tariffs available between two cities
    pub async fn get_tariffs(
        &self,
        from: &City,
        to: &City,
        packages: &[Package],
    ) -> Result<Vec<TariffQuote>> {
        let key = (from.code, to.code);
        if let Some(quotes) = self.resolved_quotes.lock().await.get(&key) {
            return Ok(quotes.clone());
        }

        let stored = self.quotes.find_by_route(from.code, to.code).await?;
        let quotes = if !stored.is_empty() {
            debug!(from = from.code, to = to.code, count = stored.len(), "Tariff list cache hit");
            stored
        } else {
            self.fetch_quotes(from.code, to.code, packages).await?
        };

        self.resolved_quotes
            .lock()
            .await
            .insert(key, quotes.clone());

        Ok(quotes)
    }

    /// Every delivery mode of the catalogue, resolved once per calculator
    ///
    /// An empty catalogue is not memoized; the next call asks again.
    pub async fn get_delivery_modes(&self) -> Result<&[DeliveryMode]> {
        if let Some(modes) = self.resolved_modes.get() {
            return Ok(modes.as_slice());
        }

        let modes = self.load_delivery_modes().await?;
        if modes.is_empty() {
            return Ok(&[]);
        }

        let modes = self
            .resolved_modes
            .get_or_init(|| async move { modes })
            .await;

        Ok(modes.as_slice())
    }

    /// Tariff code of a random catalogue delivery mode
    pub async fn random_tariff_code(&self) -> Result<u32> {
        let modes = self.get_delivery_modes().await?;

        modes
            .choose(&mut rand::thread_rng())
            .map(|mode| mode.tariff_code)
            .ok_or_else(|| AppError::not_found("no delivery modes resolved"))
    }

    /// Tariff code of a random quote for the route
    pub async fn random_route_tariff_code(
        &self,
        from: &City,
        to: &City,
        packages: &[Package],
    ) -> Result<u32> {
        let quotes = self.get_tariffs(from, to, packages).await?;

        quotes
            .choose(&mut rand::thread_rng())
            .map(|quote| quote.tariff_code)
            .ok_or_else(|| {
                AppError::not_found(format!("no tariffs from {} to {}", from.code, to.code))
            })
    }

    /// Cost and terms of one tariff, not cached
    pub async fn calculate_tariff(
        &self,
        tariff_code: u32,
        route: &Route,
        packages: &[Package],
    ) -> Result<TariffCalculation> {
        let url = self.tokens.client().endpoints().tariff();
        let request = CalculatorRequest {
            tariff_code: Some(tariff_code),
            route,
            packages,
            services: &[],
        };

        self.post(&url, &request).await
    }

    /// Every tariff for the route with additional services priced in
    pub async fn calculate_tariff_and_service(
        &self,
        route: &Route,
        packages: &[Package],
        services: &[AdditionalService],
    ) -> Result<Value> {
        let url = self.tokens.client().endpoints().tariff_and_service();
        let request = CalculatorRequest {
            tariff_code: None,
            route,
            packages,
            services,
        };

        self.post(&url, &request).await
    }

    /// International package restrictions for a tariff and route
    pub async fn package_restrictions(
        &self,
        tariff_code: u32,
        route: &Route,
        packages: &[Package],
    ) -> Result<Value> {
        let url = self.tokens.client().endpoints().restrictions();
        let request = CalculatorRequest {
            tariff_code: Some(tariff_code),
            route,
            packages,
            services: &[],
        };

        self.post(&url, &request).await
    }

    async fn fetch_quotes(
        &self,
        from_code: u32,
        to_code: u32,
        packages: &[Package],
    ) -> Result<Vec<TariffQuote>> {
        info!(from = from_code, to = to_code, "Tariff list cache miss, fetching from upstream");
        let url = self.tokens.client().endpoints().tariff_list();
        let route = Route {
            from: Location::for_city(from_code),
            to: Location::for_city(to_code),
        };
        let request = CalculatorRequest {
            tariff_code: None,
            route: &route,
            packages,
            services: &[],
        };

        let payload: TariffListPayload = self.post(&url, &request).await?;
        if !payload.errors.is_empty() {
            warn!(
                from = from_code,
                to = to_code,
                errors = ?payload.errors,
                "Tariff list returned errors"
            );
        }

        let quotes = payload
            .tariff_codes
            .into_iter()
            .map(|quote| TariffQuote::from_payload(quote, from_code, to_code))
            .collect();

        self.quotes.write_many(quotes).await
    }

    async fn load_delivery_modes(&self) -> Result<Vec<DeliveryMode>> {
        let cached = self.modes.all().await?;
        if !cached.is_empty() {
            info!(count = cached.len(), "Delivery mode cache hit");
            return Ok(cached);
        }

        info!("Delivery mode cache miss, fetching tariff catalogue from upstream");
        let url = self.tokens.client().endpoints().all_tariffs();
        let header = self.tokens.auth_header().await?;
        let catalogue: AllTariffsPayload = self
            .tokens
            .client()
            .get_json(&url, Some(&header), &[] as &[(&str, &str)])
            .await?;

        let mut modes = Vec::new();
        for payload in catalogue.tariff_codes {
            let tariff = self
                .tariffs
                .write_many(vec![payload.to_tariff()])
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| AppError::internal("tariff write returned no row"))?;

            let tariff_id = tariff.id.ok_or_else(|| {
                AppError::internal(format!("tariff {} has no row id", tariff.tariff_name))
            })?;

            let tariff_modes = payload
                .delivery_modes
                .into_iter()
                .map(|mode| DeliveryMode::from_payload(mode, tariff_id))
                .collect();

            modes.extend(self.modes.write_many(tariff_modes).await?);
        }

        info!(count = modes.len(), "Tariff catalogue stored");
        Ok(modes)
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let header = self.tokens.auth_header().await?;
        self.tokens.client().post_json(url, Some(&header), body).await
    }
}
