use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::models::availability::AvailabilityWindow;
use crate::services::availability_service::WindowStore;
use crate::utils::errors::AppError;

/// Resultado de la sonda de capacidades sobre el almacén de ventanas,
/// ejecutada una sola vez al arrancar el proceso. Sustituye a la escalera
/// de "intentar la query con la columna, capturar, reintentar sin ella".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStoreCapability {
    /// Tabla presente con la columna vehicle_type
    Full,
    /// Tabla presente pero sin el hint desnormalizado de tipo
    NoTypeHint,
    /// Tabla no aprovisionada: el resolver queda fijado en modo degradado
    Missing,
}

/// Sondear el schema una vez al arranque para elegir el code path
pub async fn probe_capability(pool: &PgPool) -> Result<WindowStoreCapability, AppError> {
    let (table_exists,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.tables
            WHERE table_name = 'availability_windows'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(WindowStoreCapability::Missing);
    }

    let (column_exists,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.columns
            WHERE table_name = 'availability_windows'
              AND column_name = 'vehicle_type'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(if column_exists {
        WindowStoreCapability::Full
    } else {
        WindowStoreCapability::NoTypeHint
    })
}

// Listas de columnas según capacidad; con NoTypeHint el hint se materializa
// como NULL para que el mapeo a AvailabilityWindow sea el mismo.
const SELECT_FULL: &str = "SELECT id, vehicle_id, start_date, end_date, is_available, \
     vehicle_type, created_at FROM availability_windows";
const SELECT_NO_HINT: &str = "SELECT id, vehicle_id, start_date, end_date, is_available, \
     NULL::text AS vehicle_type, created_at FROM availability_windows";

pub struct AvailabilityRepository {
    pool: PgPool,
    capability: WindowStoreCapability,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool, capability: WindowStoreCapability) -> Self {
        Self { pool, capability }
    }

    fn select_list(&self) -> &'static str {
        match self.capability {
            WindowStoreCapability::NoTypeHint => SELECT_NO_HINT,
            _ => SELECT_FULL,
        }
    }

    /// Ventanas que solapan el rango [start, end). Camino de lectura del
    /// resolver: los fallos se mapean a DependencyUnavailable para que el
    /// llamador pueda degradar en vez de propagar.
    pub async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        vehicle_type: Option<&str>,
    ) -> Result<Vec<AvailabilityWindow>, AppError> {
        if self.capability == WindowStoreCapability::Missing {
            return Err(AppError::DependencyUnavailable(
                "availability window store is not provisioned".to_string(),
            ));
        }

        let result = match (self.capability, vehicle_type) {
            (WindowStoreCapability::Full, Some(vtype)) => {
                let query = format!(
                    "{} WHERE start_date < $2 AND end_date > $1 \
                     AND (vehicle_type IS NULL OR vehicle_type = $3)",
                    SELECT_FULL
                );
                sqlx::query_as::<_, AvailabilityWindow>(&query)
                    .bind(start)
                    .bind(end)
                    .bind(vtype)
                    .fetch_all(&self.pool)
                    .await
            }
            _ => {
                let query = format!(
                    "{} WHERE start_date < $2 AND end_date > $1",
                    self.select_list()
                );
                sqlx::query_as::<_, AvailabilityWindow>(&query)
                    .bind(start)
                    .bind(end)
                    .fetch_all(&self.pool)
                    .await
            }
        };

        result.map_err(|e| {
            AppError::DependencyUnavailable(format!("availability store unreachable: {}", e))
        })
    }

    /// Lectura de staff: falla de forma visible, sin fallback
    pub async fn find_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<AvailabilityWindow>, AppError> {
        self.ensure_provisioned()?;

        let query = format!(
            "{} WHERE vehicle_id = $1 ORDER BY start_date, id",
            self.select_list()
        );
        let windows = sqlx::query_as::<_, AvailabilityWindow>(&query)
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(windows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AvailabilityWindow>, AppError> {
        self.ensure_provisioned()?;

        let query = format!("{} WHERE id = $1", self.select_list());
        let window = sqlx::query_as::<_, AvailabilityWindow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(window)
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        is_available: bool,
        vehicle_type: Option<String>,
    ) -> Result<AvailabilityWindow, AppError> {
        self.ensure_provisioned()?;

        let id = Uuid::new_v4();
        let window = match self.capability {
            WindowStoreCapability::NoTypeHint => {
                if vehicle_type.is_some() {
                    warn!(
                        "⚠️ El almacén de ventanas no tiene columna vehicle_type, \
                         se descarta el hint"
                    );
                }
                sqlx::query_as::<_, AvailabilityWindow>(
                    r#"
                    INSERT INTO availability_windows
                        (id, vehicle_id, start_date, end_date, is_available, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    RETURNING id, vehicle_id, start_date, end_date, is_available,
                              NULL::text AS vehicle_type, created_at
                    "#,
                )
                .bind(id)
                .bind(vehicle_id)
                .bind(start)
                .bind(end)
                .bind(is_available)
                .bind(Utc::now())
                .fetch_one(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, AvailabilityWindow>(
                    r#"
                    INSERT INTO availability_windows
                        (id, vehicle_id, start_date, end_date, is_available, vehicle_type, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING id, vehicle_id, start_date, end_date, is_available,
                              vehicle_type, created_at
                    "#,
                )
                .bind(id)
                .bind(vehicle_id)
                .bind(start)
                .bind(end)
                .bind(is_available)
                .bind(vehicle_type)
                .bind(Utc::now())
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(window)
    }

    pub async fn update(
        &self,
        id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        is_available: Option<bool>,
        vehicle_type: Option<String>,
    ) -> Result<AvailabilityWindow, AppError> {
        // Obtener ventana actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Availability window not found".to_string()))?;

        let window = match self.capability {
            WindowStoreCapability::NoTypeHint => {
                sqlx::query_as::<_, AvailabilityWindow>(
                    r#"
                    UPDATE availability_windows
                    SET start_date = $2, end_date = $3, is_available = $4
                    WHERE id = $1
                    RETURNING id, vehicle_id, start_date, end_date, is_available,
                              NULL::text AS vehicle_type, created_at
                    "#,
                )
                .bind(id)
                .bind(start.unwrap_or(current.start_date))
                .bind(end.unwrap_or(current.end_date))
                .bind(is_available.unwrap_or(current.is_available))
                .fetch_one(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, AvailabilityWindow>(
                    r#"
                    UPDATE availability_windows
                    SET start_date = $2, end_date = $3, is_available = $4, vehicle_type = $5
                    WHERE id = $1
                    RETURNING id, vehicle_id, start_date, end_date, is_available,
                              vehicle_type, created_at
                    "#,
                )
                .bind(id)
                .bind(start.unwrap_or(current.start_date))
                .bind(end.unwrap_or(current.end_date))
                .bind(is_available.unwrap_or(current.is_available))
                .bind(vehicle_type.or(current.vehicle_type))
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(window)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.ensure_provisioned()?;

        let result = sqlx::query("DELETE FROM availability_windows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Availability window not found".to_string(),
            ));
        }

        Ok(())
    }

    /// Las escrituras no tienen fallback seguro: sin tabla, error visible
    fn ensure_provisioned(&self) -> Result<(), AppError> {
        if self.capability == WindowStoreCapability::Missing {
            return Err(AppError::DependencyUnavailable(
                "availability window store is not provisioned".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl WindowStore for AvailabilityRepository {
    async fn windows_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        vehicle_type: Option<&str>,
    ) -> Result<Vec<AvailabilityWindow>, AppError> {
        self.find_overlapping(start, end, vehicle_type).await
    }
}
