use serde::Serialize;

use crate::models::vehicle::Vehicle;

// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: String,
    pub name: String,
    pub vehicle_type: String,
    pub seats: i32,
    pub description: Option<String>,
    pub locale: Option<String>,
    pub created_at: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            name: vehicle.name,
            vehicle_type: vehicle.vehicle_type,
            seats: vehicle.seats,
            description: vehicle.description,
            locale: vehicle.locale,
            created_at: vehicle.created_at.to_rfc3339(),
        }
    }
}
