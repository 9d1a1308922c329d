use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingResponse, CreateBookingRequest, CustomerBookingsQuery, UpdateBookingStatusRequest,
};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::StaffUser;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route("/customer", get(list_customer_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/status", patch(update_booking_status))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), AppError> {
    let controller = BookingController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_bookings(
    _staff: StaffUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.list_all().await?;
    Ok(Json(response))
}

async fn list_customer_bookings(
    State(state): State<AppState>,
    Query(query): Query<CustomerBookingsQuery>,
) -> Result<Json<ApiResponse<Vec<BookingResponse>>>, AppError> {
    let Some(email) = query.email.as_deref() else {
        return Err(bad_request_error("email query parameter is required"));
    };
    let controller = BookingController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.list_by_email(email).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    _staff: StaffUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone(), state.notifier.clone());
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}
