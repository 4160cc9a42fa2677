use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::City;
use crate::core::{MemoryStore, Repository, Result};

/// City cache lookups
#[async_trait]
pub trait CityRepository: Repository<City> {
    /// Find a city by its unique numeric code
    async fn find_by_code(&self, code: u32) -> Result<Option<City>>;

    /// First city whose name or full name contains `name`
    async fn find_by_name(&self, name: &str) -> Result<Option<City>>;
}

const CITY_COLUMNS: &str = r#"
    city_uuid, code, city, full_name, country_code, country, region, region_code,
    sub_region, fias_guid, fias_region_guid, kladr_code, longitude, latitude,
    time_zone, payment_limit
"#;

/// MySQL-backed city cache
pub struct MySqlCityRepository {
    pool: MySqlPool,
}

impl MySqlCityRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<City> for MySqlCityRepository {
    async fn create(&self, city: City) -> Result<City> {
        sqlx::query(
            r#"
            INSERT INTO cities (
                city_uuid, code, city, full_name, country_code, country, region, region_code,
                sub_region, fias_guid, fias_region_guid, kladr_code, longitude, latitude,
                time_zone, payment_limit
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&city.city_uuid)
        .bind(city.code)
        .bind(&city.city)
        .bind(&city.full_name)
        .bind(&city.country_code)
        .bind(&city.country)
        .bind(&city.region)
        .bind(city.region_code)
        .bind(&city.sub_region)
        .bind(&city.fias_guid)
        .bind(&city.fias_region_guid)
        .bind(&city.kladr_code)
        .bind(city.longitude)
        .bind(city.latitude)
        .bind(&city.time_zone)
        .bind(city.payment_limit)
        .execute(&self.pool)
        .await?;

        Ok(city)
    }

    async fn find_by_id(&self, city_uuid: &String) -> Result<Option<City>> {
        let city = sqlx::query_as::<_, City>(&format!(
            "SELECT {} FROM cities WHERE city_uuid = ?",
            CITY_COLUMNS
        ))
        .bind(city_uuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(city)
    }

    async fn exists(&self, city_uuid: &String) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cities WHERE city_uuid = ?")
            .bind(city_uuid)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn all(&self) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(&format!(
            "SELECT {} FROM cities ORDER BY code",
            CITY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(cities)
    }
}

#[async_trait]
impl CityRepository for MySqlCityRepository {
    async fn find_by_code(&self, code: u32) -> Result<Option<City>> {
        let city = sqlx::query_as::<_, City>(&format!(
            "SELECT {} FROM cities WHERE code = ?",
            CITY_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(city)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<City>> {
        let pattern = format!("%{}%", name);
        let city = sqlx::query_as::<_, City>(&format!(
            "SELECT {} FROM cities WHERE city LIKE ? OR full_name LIKE ? ORDER BY code LIMIT 1",
            CITY_COLUMNS
        ))
        .bind(&pattern)
        .bind(&pattern)
        .fetch_optional(&self.pool)
        .await?;

        Ok(city)
    }
}

#[async_trait]
impl CityRepository for MemoryStore<City> {
    async fn find_by_code(&self, code: u32) -> Result<Option<City>> {
        Ok(self.filter(|city| city.code == code).await.into_iter().next())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<City>> {
        let name = name.to_string();
        let matches = self
            .filter(move |city| {
                city.city.as_deref().is_some_and(|n| n.contains(&name))
                    || city.full_name.as_deref().is_some_and(|n| n.contains(&name))
            })
            .await;

        Ok(matches.into_iter().next())
    }
}
