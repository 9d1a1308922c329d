use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::common::ApiResponse;
use crate::models::booking::{BookingStatus, NewBooking};
use crate::repositories::booking_repository::BookingRepository;
use crate::services::booking_service::{BookingLedger, BookingService};
use crate::services::notification_service::Notifier;
use crate::utils::errors::{bad_request_error, validation_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct BookingController {
    ledger: Arc<dyn BookingLedger>,
    service: BookingService,
}

impl BookingController {
    pub fn new(pool: PgPool, notifier: Arc<dyn Notifier>) -> Self {
        let ledger: Arc<dyn BookingLedger> = Arc::new(BookingRepository::new(pool));
        Self {
            service: BookingService::new(ledger.clone(), notifier),
            ledger,
        }
    }

    /// Registrar una petición de reserva. Toda la validación ocurre antes
    /// de tocar el ledger. Decisión explícita: no se comprueba aquí si hay
    /// ventanas bloqueantes para el rango pedido; el resolver es
    /// consultivo y el triaje real lo hace el staff al aceptar o rechazar.
    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        let pickup_date = validate_datetime(&request.pickup_date)
            .map_err(|_| bad_request_error("pickup_date must be an ISO-8601 timestamp"))?;
        let return_date = validate_datetime(&request.return_date)
            .map_err(|_| bad_request_error("return_date must be an ISO-8601 timestamp"))?;

        if return_date <= pickup_date {
            return Err(validation_error(
                "return_date",
                "return_date must be strictly after pickup_date",
            ));
        }

        let booking = self
            .ledger
            .create(NewBooking {
                vehicle_id: request.vehicle_id,
                vehicle_type_requested: request.vehicle_type_requested,
                pickup_location: request.pickup_location,
                return_location: request.return_location,
                pickup_date,
                return_date,
                customer_name: request.customer_name,
                customer_email: request.customer_email,
                customer_phone: request.customer_phone,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Reserva registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self
            .ledger
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(ApiResponse::success(booking.into()))
    }

    pub async fn list_all(&self) -> Result<ApiResponse<Vec<BookingResponse>>, AppError> {
        let bookings = self.ledger.find_all().await?;
        Ok(ApiResponse::success(
            bookings.into_iter().map(Into::into).collect(),
        ))
    }

    pub async fn list_by_email(
        &self,
        email: &str,
    ) -> Result<ApiResponse<Vec<BookingResponse>>, AppError> {
        let bookings = self.ledger.find_by_email(email).await?;
        Ok(ApiResponse::success(
            bookings.into_iter().map(Into::into).collect(),
        ))
    }

    /// Transición de estado pedida por un operador. La política de
    /// "rechazar requiere razón" se aplica aquí, en el borde de la API.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let Some(status_raw) = request.status.as_deref() else {
            return Err(bad_request_error("status is required"));
        };

        let status = BookingStatus::parse(status_raw).ok_or_else(|| {
            validation_error("status", "status must be one of: pending, accepted, rejected")
        })?;

        if status == BookingStatus::Rejected
            && request
                .rejection_reason
                .as_deref()
                .map_or(true, |r| r.trim().is_empty())
        {
            return Err(validation_error(
                "rejection_reason",
                "rejection_reason is required when rejecting a booking",
            ));
        }

        let booking = self
            .service
            .transition(id, status, request.rejection_reason.as_deref())
            .await?;

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Estado de la reserva actualizado".to_string(),
        ))
    }
}
