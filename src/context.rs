use std::sync::Arc;

use sqlx::MySqlPool;

use crate::config::{ApiConfig, Config};
use crate::core::{MemoryStore, Result};
use crate::modules::auth::{MySqlTokenRepository, TokenManager, TokenRepository};
use crate::modules::locations::{
    CityRepository, DeliveryPointRepository, ListingMarkerRepository, LocationManager,
    MySqlCityRepository, MySqlDeliveryPointRepository, MySqlListingMarkerRepository,
    MySqlPostalCodeRepository, PostalCodeRepository,
};
use crate::modules::orders::{MySqlOrderRepository, OrderManager, OrderRepository, PollPolicy};
use crate::modules::tariffs::{
    DeliveryModeRepository, MySqlDeliveryModeRepository, MySqlTariffQuoteRepository,
    MySqlTariffRepository, TariffCalculator, TariffQuoteRepository, TariffRepository,
};
use crate::modules::upstream::ApiClient;

/// Repository set backing the managers
#[derive(Clone)]
pub struct Repositories {
    pub tokens: Arc<dyn TokenRepository>,
    pub cities: Arc<dyn CityRepository>,
    pub postal_codes: Arc<dyn PostalCodeRepository>,
    pub delivery_points: Arc<dyn DeliveryPointRepository>,
    pub listings: Arc<dyn ListingMarkerRepository>,
    pub tariffs: Arc<dyn TariffRepository>,
    pub delivery_modes: Arc<dyn DeliveryModeRepository>,
    pub tariff_quotes: Arc<dyn TariffQuoteRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn mysql(pool: &MySqlPool) -> Self {
        Self {
            tokens: Arc::new(MySqlTokenRepository::new(pool.clone())),
            cities: Arc::new(MySqlCityRepository::new(pool.clone())),
            postal_codes: Arc::new(MySqlPostalCodeRepository::new(pool.clone())),
            delivery_points: Arc::new(MySqlDeliveryPointRepository::new(pool.clone())),
            listings: Arc::new(MySqlListingMarkerRepository::new(pool.clone())),
            tariffs: Arc::new(MySqlTariffRepository::new(pool.clone())),
            delivery_modes: Arc::new(MySqlDeliveryModeRepository::new(pool.clone())),
            tariff_quotes: Arc::new(MySqlTariffQuoteRepository::new(pool.clone())),
            orders: Arc::new(MySqlOrderRepository::new(pool.clone())),
        }
    }

    /// Empty in-process stores
    pub fn in_memory() -> Self {
        Self {
            tokens: Arc::new(MemoryStore::new()),
            cities: Arc::new(MemoryStore::new()),
            postal_codes: Arc::new(MemoryStore::new()),
            delivery_points: Arc::new(MemoryStore::new()),
            listings: Arc::new(MemoryStore::new()),
            tariffs: Arc::new(MemoryStore::new()),
            delivery_modes: Arc::new(MemoryStore::new()),
            tariff_quotes: Arc::new(MemoryStore::new()),
            orders: Arc::new(MemoryStore::new()),
        }
    }
}

/// Managers shared by every scenario of a run
///
/// Built once; each manager memoizes its own lookups for the lifetime of the
/// context.
pub struct SuiteContext {
    pub tokens: Arc<TokenManager>,
    pub locations: Arc<LocationManager>,
    pub tariffs: Arc<TariffCalculator>,
    pub orders: Arc<OrderManager>,
    pub poll_policy: PollPolicy,
}

impl SuiteContext {
    /// Context backed by MySQL, after migrations have been applied
    pub async fn connect(config: &Config) -> Result<(Self, MySqlPool)> {
        let pool = config.database.create_pool().await?;
        crate::config::DatabaseConfig::run_migrations(&pool).await?;

        let context = Self::build(&config.api, Repositories::mysql(&pool), config.poll_policy())?;
        Ok((context, pool))
    }

    pub fn build(api: &ApiConfig, repos: Repositories, poll_policy: PollPolicy) -> Result<Self> {
        let client = ApiClient::new(api)?;
        let tokens = Arc::new(TokenManager::new(client, api, repos.tokens));

        Ok(Self {
            locations: Arc::new(LocationManager::new(
                tokens.clone(),
                repos.cities,
                repos.postal_codes,
                repos.delivery_points,
                repos.listings,
            )),
            tariffs: Arc::new(TariffCalculator::new(
                tokens.clone(),
                repos.tariffs,
                repos.delivery_modes,
                repos.tariff_quotes,
            )),
            orders: Arc::new(OrderManager::new(tokens.clone(), repos.orders)),
            tokens,
            poll_policy,
        })
    }
}
