use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::availability_dto::{
    AvailabilityQuery, AvailabilitySearchResponse, AvailabilityWindowResponse,
    CreateAvailabilityWindowRequest, UpdateAvailabilityWindowRequest,
};
use crate::dto::common::ApiResponse;
use crate::repositories::availability_repository::{AvailabilityRepository, WindowStoreCapability};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::AvailabilityService;
use crate::utils::errors::{bad_request_error, validation_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct AvailabilityController {
    vehicles: Arc<VehicleRepository>,
    windows: Arc<AvailabilityRepository>,
    service: AvailabilityService,
}

impl AvailabilityController {
    pub fn new(pool: PgPool, capability: WindowStoreCapability) -> Self {
        let vehicles = Arc::new(VehicleRepository::new(pool.clone()));
        let windows = Arc::new(AvailabilityRepository::new(pool, capability));
        let service = AvailabilityService::new(vehicles.clone(), windows.clone());
        Self {
            vehicles,
            windows,
            service,
        }
    }

    /// Búsqueda pública de vehículos reservables para un rango. En modo
    /// degradado sigue siendo un 200, con message explicativo: el caller
    /// distingue "confirmados" de "catálogo sin contrastar" por
    /// availability_checked, nunca por el status HTTP.
    pub async fn search(
        &self,
        query: AvailabilityQuery,
    ) -> Result<ApiResponse<AvailabilitySearchResponse>, AppError> {
        let start_raw = query
            .start_date
            .as_deref()
            .ok_or_else(|| bad_request_error("startDate is required"))?;
        let end_raw = query
            .end_date
            .as_deref()
            .ok_or_else(|| bad_request_error("endDate is required"))?;

        let start = validate_datetime(start_raw)
            .map_err(|_| bad_request_error("startDate must be an ISO-8601 timestamp"))?;
        let end = validate_datetime(end_raw)
            .map_err(|_| bad_request_error("endDate must be an ISO-8601 timestamp"))?;

        let search = self
            .service
            .find_available(start, end, query.vehicle_type.as_deref(), query.locale.as_deref())
            .await?;

        let response = AvailabilitySearchResponse {
            vehicles: search.vehicles.into_iter().map(Into::into).collect(),
            availability_checked: !search.degraded,
        };

        if search.degraded {
            Ok(ApiResponse::success_with_message(
                response,
                "La disponibilidad no pudo verificarse; se muestra el catálogo sin contrastar"
                    .to_string(),
            ))
        } else {
            Ok(ApiResponse::success(response))
        }
    }

    pub async fn windows_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<Vec<AvailabilityWindowResponse>>, AppError> {
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let windows = self.windows.find_by_vehicle(vehicle_id).await?;
        Ok(ApiResponse::success(
            windows.into_iter().map(Into::into).collect(),
        ))
    }

    pub async fn create_window(
        &self,
        request: CreateAvailabilityWindowRequest,
    ) -> Result<ApiResponse<AvailabilityWindowResponse>, AppError> {
        let start = validate_datetime(&request.start_date)
            .map_err(|_| bad_request_error("start_date must be an ISO-8601 timestamp"))?;
        let end = validate_datetime(&request.end_date)
            .map_err(|_| bad_request_error("end_date must be an ISO-8601 timestamp"))?;

        if start >= end {
            return Err(validation_error(
                "start_date",
                "start_date must be strictly before end_date",
            ));
        }

        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let window = self
            .windows
            .create(
                request.vehicle_id,
                start,
                end,
                request.is_available,
                request.vehicle_type,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            window.into(),
            "Ventana de disponibilidad creada exitosamente".to_string(),
        ))
    }

    pub async fn update_window(
        &self,
        id: Uuid,
        request: UpdateAvailabilityWindowRequest,
    ) -> Result<ApiResponse<AvailabilityWindowResponse>, AppError> {
        let start = request
            .start_date
            .as_deref()
            .map(validate_datetime)
            .transpose()
            .map_err(|_| bad_request_error("start_date must be an ISO-8601 timestamp"))?;
        let end = request
            .end_date
            .as_deref()
            .map(validate_datetime)
            .transpose()
            .map_err(|_| bad_request_error("end_date must be an ISO-8601 timestamp"))?;

        let current = self
            .windows
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Availability window not found".to_string()))?;

        // Validar el intervalo efectivo resultante antes de escribir
        let effective_start = start.unwrap_or(current.start_date);
        let effective_end = end.unwrap_or(current.end_date);
        if effective_start >= effective_end {
            return Err(validation_error(
                "start_date",
                "start_date must be strictly before end_date",
            ));
        }

        let window = self
            .windows
            .update(id, start, end, request.is_available, request.vehicle_type)
            .await?;

        Ok(ApiResponse::success_with_message(
            window.into(),
            "Ventana de disponibilidad actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete_window(&self, id: Uuid) -> Result<(), AppError> {
        self.windows.delete(id).await
    }
}
