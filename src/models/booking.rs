//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking y la máquina de estados de la
//! reserva. Una reserva se crea una sola vez desde la petición del cliente
//! y después solo muta vía transiciones de estado; el ciclo de vida nunca
//! la borra físicamente (las rechazadas se conservan para el cliente).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estados de la reserva. No hay estado terminal: cualquier estado es
/// alcanzable desde cualquier otro por acción explícita de un operador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BookingStatus {
    /// Forma canónica en minúsculas, usada en la base y en el wire
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "accepted" => Some(BookingStatus::Accepted),
            "rejected" => Some(BookingStatus::Rejected),
            _ => None,
        }
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    // Una petición puede llegar antes de asignar vehículo concreto
    pub vehicle_id: Option<Uuid>,
    pub vehicle_type_requested: String,
    pub pickup_location: String,
    pub return_location: String,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub status: String,
    // Solo tiene significado cuando status = rejected
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos ya validados para insertar una reserva nueva
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub vehicle_id: Option<Uuid>,
    pub vehicle_type_requested: String,
    pub pickup_location: String,
    pub return_location: String,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Rejected,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_desconocido() {
        assert_eq!(BookingStatus::parse("cancelled"), None);
        assert_eq!(BookingStatus::parse("PENDING"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }
}
