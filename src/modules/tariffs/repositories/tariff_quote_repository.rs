use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::TariffQuote;
use crate::core::{MemoryStore, Repository, Result};

/// Per-route tariff cache
#[async_trait]
pub trait TariffQuoteRepository: Repository<TariffQuote> {
    /// Quotes calculated for one city pair
    async fn find_by_route(&self, from_city_code: u32, to_city_code: u32)
        -> Result<Vec<TariffQuote>>;
}

const QUOTE_COLUMNS: &str = r#"
    tariff_code, from_city_code, to_city_code, tariff_name, tariff_description,
    delivery_mode, delivery_sum, period_min, period_max, calendar_min, calendar_max,
    delivery_date_range
"#;

pub struct MySqlTariffQuoteRepository {
    pool: MySqlPool,
}

impl MySqlTariffQuoteRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<TariffQuote> for MySqlTariffQuoteRepository {
    async fn create(&self, quote: TariffQuote) -> Result<TariffQuote> {
        sqlx::query(
            r#"
            INSERT INTO tariff_quotes (
                tariff_code, from_city_code, to_city_code, tariff_name, tariff_description,
                delivery_mode, delivery_sum, period_min, period_max, calendar_min, calendar_max,
                delivery_date_range
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quote.tariff_code)
        .bind(quote.from_city_code)
        .bind(quote.to_city_code)
        .bind(&quote.tariff_name)
        .bind(&quote.tariff_description)
        .bind(quote.delivery_mode)
        .bind(quote.delivery_sum)
        .bind(quote.period_min)
        .bind(quote.period_max)
        .bind(quote.calendar_min)
        .bind(quote.calendar_max)
        .bind(&quote.delivery_date_range)
        .execute(&self.pool)
        .await?;

        Ok(quote)
    }

    async fn find_by_id(&self, id: &(u32, u32, u32)) -> Result<Option<TariffQuote>> {
        let (tariff_code, from_city_code, to_city_code) = *id;
        let quote = sqlx::query_as::<_, TariffQuote>(&format!(
            "SELECT {} FROM tariff_quotes \
             WHERE tariff_code = ? AND from_city_code = ? AND to_city_code = ?",
            QUOTE_COLUMNS
        ))
        .bind(tariff_code)
        .bind(from_city_code)
        .bind(to_city_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    async fn all(&self) -> Result<Vec<TariffQuote>> {
        let quotes = sqlx::query_as::<_, TariffQuote>(&format!(
            "SELECT {} FROM tariff_quotes ORDER BY from_city_code, to_city_code, tariff_code",
            QUOTE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }
}

#[async_trait]
impl TariffQuoteRepository for MySqlTariffQuoteRepository {
    async fn find_by_route(
        &self,
        from_city_code: u32,
        to_city_code: u32,
    ) -> Result<Vec<TariffQuote>> {
        let quotes = sqlx::query_as::<_, TariffQuote>(&format!(
            "SELECT {} FROM tariff_quotes \
             WHERE from_city_code = ? AND to_city_code = ? ORDER BY tariff_code",
            QUOTE_COLUMNS
        ))
        .bind(from_city_code)
        .bind(to_city_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }
}

#[async_trait]
impl TariffQuoteRepository for MemoryStore<TariffQuote> {
    async fn find_by_route(
        &self,
        from_city_code: u32,
        to_city_code: u32,
    ) -> Result<Vec<TariffQuote>> {
        Ok(self
            .filter(|quote| {
                quote.from_city_code == from_city_code && quote.to_city_code == to_city_code
            })
            .await)
    }
}
