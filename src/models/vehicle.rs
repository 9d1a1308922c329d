//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del catálogo. El catálogo es
//! propiedad de otro servicio; desde este core es de solo lectura.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub vehicle_type: String,
    pub seats: i32,
    pub description: Option<String>,
    pub locale: Option<String>,
    pub created_at: DateTime<Utc>,
}
