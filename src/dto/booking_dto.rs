use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::Booking;

// Request para crear una reserva. Las fechas llegan como string ISO-8601
// y se parsean en el controller para que un formato inválido sea un 400.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<Uuid>,

    #[validate(length(min = 1, max = 50))]
    pub vehicle_type_requested: String,

    #[validate(length(min = 1, max = 200))]
    pub pickup_location: String,

    #[validate(length(min = 1, max = 200))]
    pub return_location: String,

    pub pickup_date: String,
    pub return_date: String,

    #[validate(length(min = 1, max = 100))]
    pub customer_name: Option<String>,

    #[validate(email)]
    pub customer_email: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub customer_phone: Option<String>,
}

// Request para transicionar el estado de una reserva
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: Option<String>,
    pub rejection_reason: Option<String>,
}

// Query para listar reservas de un cliente
#[derive(Debug, Deserialize)]
pub struct CustomerBookingsQuery {
    pub email: Option<String>,
}

// Response de reserva
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub vehicle_id: Option<String>,
    pub vehicle_type_requested: String,
    pub pickup_location: String,
    pub return_location: String,
    pub pickup_date: String,
    pub return_date: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            vehicle_id: booking.vehicle_id.map(|id| id.to_string()),
            vehicle_type_requested: booking.vehicle_type_requested,
            pickup_location: booking.pickup_location,
            return_location: booking.return_location,
            pickup_date: booking.pickup_date.to_rfc3339(),
            return_date: booking.return_date.to_rfc3339(),
            customer_name: booking.customer_name,
            customer_email: booking.customer_email,
            customer_phone: booking.customer_phone,
            status: booking.status,
            rejection_reason: booking.rejection_reason,
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}
