//! Modelo de AvailabilityWindow
//!
//! Ventanas de tiempo por vehículo marcadas como disponibles o no
//! disponibles. Los intervalos son semiabiertos: [start_date, end_date).
//! Pueden existir varias ventanas por vehículo y pueden solaparse; la
//! disponibilidad efectiva se deriva en el resolver, nunca se almacena.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// AvailabilityWindow - mapea exactamente a la tabla availability_windows
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvailabilityWindow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_available: bool,
    // Hint desnormalizado para acelerar las búsquedas por tipo
    pub vehicle_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityWindow {
    /// Test de solape entre dos intervalos semiabiertos [a,b) y [c,d):
    /// a < d AND c < b
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_date < end && start < self.end_date
    }

    /// Una ventana sin hint de tipo aplica a cualquier tipo de vehículo
    pub fn matches_type(&self, vehicle_type: Option<&str>) -> bool {
        match (&self.vehicle_type, vehicle_type) {
            (Some(hint), Some(filter)) => hint == filter,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fecha(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn ventana(start: DateTime<Utc>, end: DateTime<Utc>) -> AvailabilityWindow {
        AvailabilityWindow {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            is_available: false,
            vehicle_type: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_overlaps_solape_parcial() {
        let w = ventana(fecha(2024, 1, 10), fecha(2024, 1, 20));
        assert!(w.overlaps(fecha(2024, 1, 15), fecha(2024, 1, 16)));
        assert!(w.overlaps(fecha(2024, 1, 5), fecha(2024, 1, 11)));
        assert!(w.overlaps(fecha(2024, 1, 19), fecha(2024, 1, 25)));
    }

    #[test]
    fn test_overlaps_sin_solape() {
        let w = ventana(fecha(2024, 1, 10), fecha(2024, 1, 20));
        assert!(!w.overlaps(fecha(2024, 2, 1), fecha(2024, 2, 5)));
        assert!(!w.overlaps(fecha(2024, 1, 1), fecha(2024, 1, 9)));
    }

    #[test]
    fn test_overlaps_extremos_semiabiertos() {
        // [10,20) no solapa con [20,25) ni con [5,10)
        let w = ventana(fecha(2024, 1, 10), fecha(2024, 1, 20));
        assert!(!w.overlaps(fecha(2024, 1, 20), fecha(2024, 1, 25)));
        assert!(!w.overlaps(fecha(2024, 1, 5), fecha(2024, 1, 10)));
    }

    #[test]
    fn test_matches_type_sin_hint_acepta_todo() {
        let mut w = ventana(fecha(2024, 1, 10), fecha(2024, 1, 20));
        assert!(w.matches_type(None));
        assert!(w.matches_type(Some("van")));

        w.vehicle_type = Some("van".to_string());
        assert!(w.matches_type(Some("van")));
        assert!(!w.matches_type(Some("sedan")));
        assert!(w.matches_type(None));
    }
}
