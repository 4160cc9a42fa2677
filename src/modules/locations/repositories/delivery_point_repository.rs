use async_trait::async_trait;
use sqlx::MySqlPool;

use super::super::models::DeliveryPoint;
use crate::core::{MemoryStore, Repository, Result};

/// Delivery point cache lookups
#[async_trait]
pub trait DeliveryPointRepository: Repository<DeliveryPoint> {
    async fn find_by_city_code(&self, city_code: u32) -> Result<Vec<DeliveryPoint>>;

    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Vec<DeliveryPoint>>;
}

const POINT_COLUMNS: &str = r#"
    code, uuid, name, city_code, postal_code, point_type, owner_code, address_comment,
    nearest_station, nearest_metro_station, work_time, email, note, site, take_only,
    is_handout, is_reception, is_dressing_room, is_marketplace, is_ltl, have_cashless,
    have_cash, have_fast_payment_system, allowed_cod, fulfillment, weight_min, weight_max,
    distance, phones, office_image_list, work_time_list, work_time_exception_list,
    dimensions, errors, warnings, location
"#;

/// MySQL-backed delivery point cache
pub struct MySqlDeliveryPointRepository {
    pool: MySqlPool,
}

impl MySqlDeliveryPointRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<DeliveryPoint> for MySqlDeliveryPointRepository {
    async fn create(&self, point: DeliveryPoint) -> Result<DeliveryPoint> {
        sqlx::query(&format!(
            "INSERT INTO delivery_points ({}) VALUES ({})",
            POINT_COLUMNS,
            vec!["?"; 36].join(", ")
        ))
        .bind(&point.code)
        .bind(&point.uuid)
        .bind(&point.name)
        .bind(point.city_code)
        .bind(&point.postal_code)
        .bind(&point.point_type)
        .bind(&point.owner_code)
        .bind(&point.address_comment)
        .bind(&point.nearest_station)
        .bind(&point.nearest_metro_station)
        .bind(&point.work_time)
        .bind(&point.email)
        .bind(&point.note)
        .bind(&point.site)
        .bind(point.take_only)
        .bind(point.is_handout)
        .bind(point.is_reception)
        .bind(point.is_dressing_room)
        .bind(point.is_marketplace)
        .bind(point.is_ltl)
        .bind(point.have_cashless)
        .bind(point.have_cash)
        .bind(point.have_fast_payment_system)
        .bind(point.allowed_cod)
        .bind(point.fulfillment)
        .bind(point.weight_min)
        .bind(point.weight_max)
        .bind(point.distance)
        .bind(&point.phones)
        .bind(&point.office_image_list)
        .bind(&point.work_time_list)
        .bind(&point.work_time_exception_list)
        .bind(&point.dimensions)
        .bind(&point.errors)
        .bind(&point.warnings)
        .bind(&point.location)
        .execute(&self.pool)
        .await?;

        Ok(point)
    }

    async fn find_by_id(&self, code: &String) -> Result<Option<DeliveryPoint>> {
        let point = sqlx::query_as::<_, DeliveryPoint>(&format!(
            "SELECT {} FROM delivery_points WHERE code = ?",
            POINT_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(point)
    }

    async fn exists(&self, code: &String) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM delivery_points WHERE code = ?")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn all(&self) -> Result<Vec<DeliveryPoint>> {
        let points = sqlx::query_as::<_, DeliveryPoint>(&format!(
            "SELECT {} FROM delivery_points ORDER BY code",
            POINT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}

#[async_trait]
impl DeliveryPointRepository for MySqlDeliveryPointRepository {
    async fn find_by_city_code(&self, city_code: u32) -> Result<Vec<DeliveryPoint>> {
        let points = sqlx::query_as::<_, DeliveryPoint>(&format!(
            "SELECT {} FROM delivery_points WHERE city_code = ? ORDER BY code",
            POINT_COLUMNS
        ))
        .bind(city_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Vec<DeliveryPoint>> {
        let points = sqlx::query_as::<_, DeliveryPoint>(&format!(
            "SELECT {} FROM delivery_points WHERE postal_code = ? ORDER BY code",
            POINT_COLUMNS
        ))
        .bind(postal_code)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}

#[async_trait]
impl DeliveryPointRepository for MemoryStore<DeliveryPoint> {
    async fn find_by_city_code(&self, city_code: u32) -> Result<Vec<DeliveryPoint>> {
        Ok(self.filter(|point| point.city_code == city_code).await)
    }

    async fn find_by_postal_code(&self, postal_code: &str) -> Result<Vec<DeliveryPoint>> {
        let postal_code = postal_code.to_string();
        Ok(self
            .filter(move |point| point.postal_code.as_deref() == Some(postal_code.as_str()))
            .await)
    }
}
