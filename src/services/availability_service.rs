//! Resolver de disponibilidad
//!
//! Dado un rango de fechas semiabierto [start, end) y filtros opcionales,
//! calcula qué vehículos del catálogo pueden reservarse. La disponibilidad
//! es derivada: un vehículo sin ventanas que solapen el rango está
//! disponible por defecto; cualquier ventana is_available=false que solape
//! lo bloquea, sin importar el resto de ventanas.
//!
//! Si el almacén de ventanas no responde, el resolver degrada a devolver
//! el catálogo filtrado marcado como "sin verificar" en lugar de fallar:
//! el llamador siempre puede distinguir ambos casos.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::models::availability::AvailabilityWindow;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{validation_error, AppError};

/// Catálogo de vehículos (solo lectura desde este core)
#[async_trait]
pub trait VehicleCatalog: Send + Sync {
    async fn vehicles_filtered(
        &self,
        vehicle_type: Option<&str>,
        locale: Option<&str>,
    ) -> Result<Vec<Vehicle>, AppError>;
}

/// Almacén de ventanas de disponibilidad (camino de lectura del resolver)
#[async_trait]
pub trait WindowStore: Send + Sync {
    async fn windows_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        vehicle_type: Option<&str>,
    ) -> Result<Vec<AvailabilityWindow>, AppError>;
}

/// Resultado de la búsqueda. degraded = true significa que las ventanas no
/// pudieron consultarse y la lista es el catálogo sin contrastar.
#[derive(Debug)]
pub struct AvailabilitySearch {
    pub vehicles: Vec<Vehicle>,
    pub degraded: bool,
}

pub struct AvailabilityService {
    catalog: Arc<dyn VehicleCatalog>,
    windows: Arc<dyn WindowStore>,
}

impl AvailabilityService {
    pub fn new(catalog: Arc<dyn VehicleCatalog>, windows: Arc<dyn WindowStore>) -> Self {
        Self { catalog, windows }
    }

    pub async fn find_available(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        vehicle_type: Option<&str>,
        locale: Option<&str>,
    ) -> Result<AvailabilitySearch, AppError> {
        if start >= end {
            return Err(validation_error(
                "startDate",
                "startDate must be strictly before endDate",
            ));
        }

        let vehicles = self.catalog.vehicles_filtered(vehicle_type, locale).await?;

        let windows = match self
            .windows
            .windows_overlapping(start, end, vehicle_type)
            .await
        {
            Ok(windows) => windows,
            Err(AppError::DependencyUnavailable(msg)) => {
                warn!("⚠️ Almacén de disponibilidad inaccesible, modo degradado: {}", msg);
                return Ok(AvailabilitySearch {
                    vehicles,
                    degraded: true,
                });
            }
            Err(e) => return Err(e),
        };

        Ok(AvailabilitySearch {
            vehicles: resolve_bookable(vehicles, &windows, start, end, vehicle_type),
            degraded: false,
        })
    }
}

/// Núcleo puro del resolver. Un vehículo queda excluido si y solo si
/// alguna ventana is_available=false que pase el filtro de tipo solapa el
/// rango consultado; las ventanas que no solapan son irrelevantes.
pub fn resolve_bookable(
    vehicles: Vec<Vehicle>,
    windows: &[AvailabilityWindow],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    vehicle_type: Option<&str>,
) -> Vec<Vehicle> {
    let blocked: HashSet<Uuid> = windows
        .iter()
        .filter(|w| !w.is_available && w.overlaps(start, end) && w.matches_type(vehicle_type))
        .map(|w| w.vehicle_id)
        .collect();

    vehicles
        .into_iter()
        .filter(|v| !blocked.contains(&v.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fecha(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn vehiculo(name: &str, vehicle_type: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            vehicle_type: vehicle_type.to_string(),
            seats: 5,
            description: None,
            locale: None,
            created_at: Utc::now(),
        }
    }

    fn ventana(
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        is_available: bool,
    ) -> AvailabilityWindow {
        AvailabilityWindow {
            id: Uuid::new_v4(),
            vehicle_id,
            start_date: start,
            end_date: end,
            is_available,
            vehicle_type: None,
            created_at: Utc::now(),
        }
    }

    struct CatalogoFijo(Vec<Vehicle>);

    #[async_trait]
    impl VehicleCatalog for CatalogoFijo {
        async fn vehicles_filtered(
            &self,
            vehicle_type: Option<&str>,
            locale: Option<&str>,
        ) -> Result<Vec<Vehicle>, AppError> {
            Ok(self
                .0
                .iter()
                .filter(|v| vehicle_type.map_or(true, |t| v.vehicle_type == t))
                .filter(|v| locale.map_or(true, |l| v.locale.as_deref() == Some(l)))
                .cloned()
                .collect())
        }
    }

    struct VentanasFijas(Vec<AvailabilityWindow>);

    #[async_trait]
    impl WindowStore for VentanasFijas {
        async fn windows_overlapping(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            vehicle_type: Option<&str>,
        ) -> Result<Vec<AvailabilityWindow>, AppError> {
            Ok(self
                .0
                .iter()
                .filter(|w| w.overlaps(start, end) && w.matches_type(vehicle_type))
                .cloned()
                .collect())
        }
    }

    struct VentanasCaidas;

    #[async_trait]
    impl WindowStore for VentanasCaidas {
        async fn windows_overlapping(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
            _vehicle_type: Option<&str>,
        ) -> Result<Vec<AvailabilityWindow>, AppError> {
            Err(AppError::DependencyUnavailable(
                "availability store unreachable".to_string(),
            ))
        }
    }

    fn servicio(
        vehicles: Vec<Vehicle>,
        windows: Vec<AvailabilityWindow>,
    ) -> AvailabilityService {
        AvailabilityService::new(
            Arc::new(CatalogoFijo(vehicles)),
            Arc::new(VentanasFijas(windows)),
        )
    }

    #[tokio::test]
    async fn test_vehiculo_sin_ventanas_disponible_para_cualquier_rango() {
        let v = vehiculo("Kangoo", "van");
        let service = servicio(vec![v.clone()], vec![]);

        let result = service
            .find_available(fecha(2024, 1, 1), fecha(2024, 12, 31), None, None)
            .await
            .unwrap();

        assert!(!result.degraded);
        assert_eq!(result.vehicles.len(), 1);
        assert_eq!(result.vehicles[0].id, v.id);
    }

    #[tokio::test]
    async fn test_ventana_no_disponible_bloquea_solo_si_solapa() {
        let v = vehiculo("Kangoo", "van");
        let windows = vec![ventana(v.id, fecha(2024, 1, 10), fecha(2024, 1, 20), false)];
        let service = servicio(vec![v.clone()], windows);

        // Rango dentro de la ventana bloqueante: excluido
        let result = service
            .find_available(fecha(2024, 1, 15), fecha(2024, 1, 16), None, None)
            .await
            .unwrap();
        assert!(result.vehicles.is_empty());

        // Rango fuera de la ventana: incluido
        let result = service
            .find_available(fecha(2024, 2, 1), fecha(2024, 2, 5), None, None)
            .await
            .unwrap();
        assert_eq!(result.vehicles.len(), 1);
    }

    #[tokio::test]
    async fn test_ventanas_que_no_solapan_son_irrelevantes() {
        let v = vehiculo("Kangoo", "van");
        // Una ventana bloqueante y otra disponible, ambas fuera del rango
        let windows = vec![
            ventana(v.id, fecha(2024, 1, 10), fecha(2024, 1, 20), false),
            ventana(v.id, fecha(2024, 3, 1), fecha(2024, 3, 10), true),
        ];
        let service = servicio(vec![v.clone()], windows);

        let result = service
            .find_available(fecha(2024, 2, 1), fecha(2024, 2, 5), None, None)
            .await
            .unwrap();
        assert_eq!(result.vehicles.len(), 1);
    }

    #[tokio::test]
    async fn test_ventana_bloqueante_gana_sobre_ventana_disponible() {
        let v = vehiculo("Kangoo", "van");
        let windows = vec![
            ventana(v.id, fecha(2024, 1, 1), fecha(2024, 1, 31), true),
            ventana(v.id, fecha(2024, 1, 10), fecha(2024, 1, 20), false),
        ];
        let service = servicio(vec![v.clone()], windows);

        let result = service
            .find_available(fecha(2024, 1, 15), fecha(2024, 1, 16), None, None)
            .await
            .unwrap();
        assert!(result.vehicles.is_empty());
    }

    #[tokio::test]
    async fn test_filtro_de_tipo_aplica_a_catalogo_y_ventanas() {
        let van = vehiculo("Kangoo", "van");
        let sedan = vehiculo("Corolla", "sedan");
        // Ventana bloqueante con hint "sedan" sobre la van: con filtro
        // "van" el hint no matchea y la ventana se ignora
        let mut w = ventana(van.id, fecha(2024, 1, 10), fecha(2024, 1, 20), false);
        w.vehicle_type = Some("sedan".to_string());
        let service = servicio(vec![van.clone(), sedan.clone()], vec![w]);

        let result = service
            .find_available(fecha(2024, 1, 15), fecha(2024, 1, 16), Some("van"), None)
            .await
            .unwrap();
        assert_eq!(result.vehicles.len(), 1);
        assert_eq!(result.vehicles[0].id, van.id);
    }

    #[tokio::test]
    async fn test_rango_invalido_es_error_de_validacion() {
        let service = servicio(vec![vehiculo("Kangoo", "van")], vec![]);

        let err = service
            .find_available(fecha(2024, 1, 20), fecha(2024, 1, 10), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .find_available(fecha(2024, 1, 10), fecha(2024, 1, 10), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_modo_degradado_devuelve_catalogo_filtrado_sin_fallar() {
        let van = vehiculo("Kangoo", "van");
        let sedan = vehiculo("Corolla", "sedan");
        let service = AvailabilityService::new(
            Arc::new(CatalogoFijo(vec![van.clone(), sedan])),
            Arc::new(VentanasCaidas),
        );

        let result = service
            .find_available(fecha(2024, 1, 15), fecha(2024, 1, 16), Some("van"), None)
            .await
            .unwrap();

        assert!(result.degraded);
        assert_eq!(result.vehicles.len(), 1);
        assert_eq!(result.vehicles[0].id, van.id);
    }
}
