use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::services::booking_service::BookingLedger;
use crate::utils::errors::AppError;

/// Registro durable de reservas. Mutación pura de datos: las
/// notificaciones son responsabilidad del coordinador, nunca de este repo.
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingLedger for BookingRepository {
    async fn create(&self, new: NewBooking) -> Result<Booking, AppError> {
        let id = Uuid::new_v4();

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (id, vehicle_id, vehicle_type_requested, pickup_location, return_location,
                 pickup_date, return_date, customer_name, customer_email, customer_phone,
                 status, rejection_reason, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', NULL, $11)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.vehicle_id)
        .bind(new.vehicle_type_requested)
        .bind(new.pickup_location)
        .bind(new.return_location)
        .bind(new.pickup_date)
        .bind(new.return_date)
        .bind(new.customer_name)
        .bind(new.customer_email)
        .bind(new.customer_phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    /// Match exacto y case-sensitive sobre el email almacenado
    async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE customer_email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Cambia solo el estado. Una razón nueva sobreescribe la anterior;
    /// sin razón, la previa se conserva (las reversiones de operador no
    /// borran historia).
    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        reason: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, rejection_reason = COALESCE($3, rejection_reason)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }
}
