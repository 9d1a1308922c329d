use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::availability::AvailabilityWindow;

// Query de búsqueda de vehículos disponibles. Los nombres de parámetro
// siguen el contrato público (?startDate=&endDate=&type=&locale=).
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub locale: Option<String>,
}

// Resultado del resolver. availability_checked = false señala el modo
// degradado: catálogo sin contrastar contra las ventanas.
#[derive(Debug, Serialize)]
pub struct AvailabilitySearchResponse {
    pub vehicles: Vec<VehicleResponse>,
    pub availability_checked: bool,
}

// Request para crear una ventana de disponibilidad
#[derive(Debug, Deserialize)]
pub struct CreateAvailabilityWindowRequest {
    pub vehicle_id: Uuid,
    pub start_date: String,
    pub end_date: String,
    pub is_available: bool,
    pub vehicle_type: Option<String>,
}

// Request para actualizar una ventana existente
#[derive(Debug, Deserialize)]
pub struct UpdateAvailabilityWindowRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_available: Option<bool>,
    pub vehicle_type: Option<String>,
}

// Response de ventana de disponibilidad
#[derive(Debug, Serialize)]
pub struct AvailabilityWindowResponse {
    pub id: String,
    pub vehicle_id: String,
    pub start_date: String,
    pub end_date: String,
    pub is_available: bool,
    pub vehicle_type: Option<String>,
    pub created_at: String,
}

impl From<AvailabilityWindow> for AvailabilityWindowResponse {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            id: window.id.to_string(),
            vehicle_id: window.vehicle_id.to_string(),
            start_date: window.start_date.to_rfc3339(),
            end_date: window.end_date.to_rfc3339(),
            is_available: window.is_available,
            vehicle_type: window.vehicle_type,
            created_at: window.created_at.to_rfc3339(),
        }
    }
}
