use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::availability_controller::AvailabilityController;
use crate::dto::availability_dto::{
    AvailabilityQuery, AvailabilitySearchResponse, AvailabilityWindowResponse,
    CreateAvailabilityWindowRequest, UpdateAvailabilityWindowRequest,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::StaffUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_availability_router() -> Router<AppState> {
    Router::new()
        .route("/available", get(search_available))
        .route("/:id/availability", get(vehicle_windows))
        .route("/availability", post(create_window))
        .route("/availability/:id", patch(update_window))
        .route("/availability/:id", delete(delete_window))
}

async fn search_available(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilitySearchResponse>>, AppError> {
    let controller = AvailabilityController::new(state.pool.clone(), state.window_capability);
    let response = controller.search(query).await?;
    Ok(Json(response))
}

async fn vehicle_windows(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<AvailabilityWindowResponse>>>, AppError> {
    let controller = AvailabilityController::new(state.pool.clone(), state.window_capability);
    let response = controller.windows_for_vehicle(id).await?;
    Ok(Json(response))
}

async fn create_window(
    _staff: StaffUser,
    State(state): State<AppState>,
    Json(request): Json<CreateAvailabilityWindowRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AvailabilityWindowResponse>>), AppError> {
    let controller = AvailabilityController::new(state.pool.clone(), state.window_capability);
    let response = controller.create_window(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_window(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAvailabilityWindowRequest>,
) -> Result<Json<ApiResponse<AvailabilityWindowResponse>>, AppError> {
    let controller = AvailabilityController::new(state.pool.clone(), state.window_capability);
    let response = controller.update_window(id, request).await?;
    Ok(Json(response))
}

async fn delete_window(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AvailabilityController::new(state.pool.clone(), state.window_capability);
    controller.delete_window(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Ventana de disponibilidad eliminada exitosamente"
    })))
}
