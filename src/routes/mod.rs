pub mod availability_routes;
pub mod booking_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_endpoint))
        .nest("/bookings", booking_routes::create_booking_router())
        .nest("/vehicles", availability_routes::create_availability_router())
        .layer(cors_middleware())
        .with_state(state)
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicle-rental",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
