use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::services::availability_service::VehicleCatalog;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Catálogo filtrado por tipo y locale. El orden es estable para un
    /// snapshot dado: por nombre y luego por id.
    pub async fn find_all(
        &self,
        vehicle_type: Option<&str>,
        locale: Option<&str>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR vehicle_type = $1)
              AND ($2::text IS NULL OR locale = $2)
            ORDER BY name, id
            "#,
        )
        .bind(vehicle_type)
        .bind(locale)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }
}

#[async_trait]
impl VehicleCatalog for VehicleRepository {
    async fn vehicles_filtered(
        &self,
        vehicle_type: Option<&str>,
        locale: Option<&str>,
    ) -> Result<Vec<Vehicle>, AppError> {
        self.find_all(vehicle_type, locale).await
    }
}
