//! Coordinador del ciclo de vida de reservas
//!
//! Orquesta las transiciones de estado sobre el ledger y dispara la
//! notificación al cliente. La transición es la fuente de verdad: un fallo
//! del despacho de notificación se registra y se traga, nunca revierte ni
//! reporta como fallida una mutación ya confirmada.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::services::notification_service::Notifier;
use crate::utils::errors::{not_found_error, AppError};

/// Registro durable de reservas y su máquina de estados. Mutación pura de
/// datos, sin efectos secundarios, para poder testearlo de forma aislada.
#[async_trait]
pub trait BookingLedger: Send + Sync {
    async fn create(&self, new: NewBooking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError>;
    async fn find_all(&self) -> Result<Vec<Booking>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, AppError>;
    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        reason: Option<&str>,
    ) -> Result<Option<Booking>, AppError>;
}

pub struct BookingService {
    ledger: Arc<dyn BookingLedger>,
    notifier: Arc<dyn Notifier>,
}

impl BookingService {
    pub fn new(ledger: Arc<dyn BookingLedger>, notifier: Arc<dyn Notifier>) -> Self {
        Self { ledger, notifier }
    }

    /// Transicionar una reserva a un estado nuevo. Cualquier estado es
    /// alcanzable desde cualquier otro por acción explícita del operador;
    /// la política de "rechazo requiere razón" se aplica en el borde de la
    /// API, no aquí, para que las reversiones administrativas no la exijan.
    pub async fn transition(
        &self,
        id: Uuid,
        status: BookingStatus,
        reason: Option<&str>,
    ) -> Result<Booking, AppError> {
        let booking = self
            .ledger
            .set_status(id, status, reason)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;

        info!("🔄 Reserva {} transicionada a '{}'", booking.id, booking.status);

        // Paso dos, best-effort: la mutación ya está confirmada
        if let Err(e) = self.notifier.booking_status_changed(&booking).await {
            warn!("⚠️ Notificación fallida para reserva {}: {}", booking.id, e);
        }

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Ledger en memoria con la misma semántica que el repo PostgreSQL:
    /// set_status cambia solo el estado y COALESCE sobre la razón.
    #[derive(Default)]
    struct LedgerEnMemoria {
        bookings: Mutex<HashMap<Uuid, Booking>>,
    }

    #[async_trait]
    impl BookingLedger for LedgerEnMemoria {
        async fn create(&self, new: NewBooking) -> Result<Booking, AppError> {
            let booking = Booking {
                id: Uuid::new_v4(),
                vehicle_id: new.vehicle_id,
                vehicle_type_requested: new.vehicle_type_requested,
                pickup_location: new.pickup_location,
                return_location: new.return_location,
                pickup_date: new.pickup_date,
                return_date: new.return_date,
                customer_name: new.customer_name,
                customer_email: new.customer_email,
                customer_phone: new.customer_phone,
                status: BookingStatus::Pending.as_str().to_string(),
                rejection_reason: None,
                created_at: Utc::now(),
            };
            self.bookings
                .lock()
                .unwrap()
                .insert(booking.id, booking.clone());
            Ok(booking)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
            Ok(self.bookings.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
            Ok(self.bookings.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_email(&self, email: &str) -> Result<Vec<Booking>, AppError> {
            Ok(self
                .bookings
                .lock()
                .unwrap()
                .values()
                .filter(|b| b.customer_email.as_deref() == Some(email))
                .cloned()
                .collect())
        }

        async fn set_status(
            &self,
            id: Uuid,
            status: BookingStatus,
            reason: Option<&str>,
        ) -> Result<Option<Booking>, AppError> {
            let mut bookings = self.bookings.lock().unwrap();
            let Some(booking) = bookings.get_mut(&id) else {
                return Ok(None);
            };
            booking.status = status.as_str().to_string();
            if let Some(reason) = reason {
                booking.rejection_reason = Some(reason.to_string());
            }
            Ok(Some(booking.clone()))
        }
    }

    /// Notifier que registra cada aviso, con fallo opcional
    struct NotifierDePrueba {
        sent: Mutex<Vec<(Uuid, String)>>,
        fail: bool,
    }

    impl NotifierDePrueba {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl Notifier for NotifierDePrueba {
        async fn booking_status_changed(&self, booking: &Booking) -> Result<(), AppError> {
            self.sent
                .lock()
                .unwrap()
                .push((booking.id, booking.status.clone()));
            if self.fail {
                return Err(AppError::ExternalApi("smtp caído".to_string()));
            }
            Ok(())
        }
    }

    fn peticion() -> NewBooking {
        NewBooking {
            vehicle_id: Some(Uuid::new_v4()),
            vehicle_type_requested: "van".to_string(),
            pickup_location: "Madrid".to_string(),
            return_location: "Sevilla".to_string(),
            pickup_date: Utc::now(),
            return_date: Utc::now() + chrono::Duration::days(3),
            customer_name: Some("Ana".to_string()),
            customer_email: Some("ana@example.com".to_string()),
            customer_phone: None,
        }
    }

    #[tokio::test]
    async fn test_creacion_arranca_en_pending() {
        let ledger = LedgerEnMemoria::default();
        let booking = ledger.create(peticion()).await.unwrap();
        assert_eq!(booking.status, "pending");
        assert!(booking.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_rechazo_guarda_razon_y_revertir_la_conserva() {
        let ledger = Arc::new(LedgerEnMemoria::default());
        let notifier = Arc::new(NotifierDePrueba::new(false));
        let service = BookingService::new(ledger.clone(), notifier);

        let booking = ledger.create(peticion()).await.unwrap();

        let rejected = service
            .transition(booking.id, BookingStatus::Rejected, Some("no availability"))
            .await
            .unwrap();
        assert_eq!(rejected.status, "rejected");
        assert_eq!(rejected.rejection_reason.as_deref(), Some("no availability"));

        // Reversión de operador: cambia solo el estado
        let reverted = service
            .transition(booking.id, BookingStatus::Pending, None)
            .await
            .unwrap();
        assert_eq!(reverted.status, "pending");
        assert_eq!(reverted.rejection_reason.as_deref(), Some("no availability"));
        assert_eq!(reverted.customer_email, booking.customer_email);
    }

    #[tokio::test]
    async fn test_transicion_repetida_es_noop_en_el_ledger() {
        let ledger = Arc::new(LedgerEnMemoria::default());
        let notifier = Arc::new(NotifierDePrueba::new(false));
        let service = BookingService::new(ledger.clone(), notifier.clone());

        let booking = ledger.create(peticion()).await.unwrap();

        let first = service
            .transition(booking.id, BookingStatus::Accepted, None)
            .await
            .unwrap();
        let second = service
            .transition(booking.id, BookingStatus::Accepted, None)
            .await
            .unwrap();

        assert_eq!(first.status, second.status);
        assert_eq!(first.rejection_reason, second.rejection_reason);
        // La notificación sí se reenvía
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fallo_de_notificacion_no_revierte_la_transicion() {
        let ledger = Arc::new(LedgerEnMemoria::default());
        let notifier = Arc::new(NotifierDePrueba::new(true));
        let service = BookingService::new(ledger.clone(), notifier.clone());

        let booking = ledger.create(peticion()).await.unwrap();

        let accepted = service
            .transition(booking.id, BookingStatus::Accepted, None)
            .await
            .unwrap();
        assert_eq!(accepted.status, "accepted");

        // El estado quedó confirmado en el ledger pese al fallo
        let stored = ledger.find_by_id(booking.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "accepted");
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transicion_de_reserva_inexistente_es_not_found() {
        let service = BookingService::new(
            Arc::new(LedgerEnMemoria::default()),
            Arc::new(NotifierDePrueba::new(false)),
        );

        let err = service
            .transition(Uuid::new_v4(), BookingStatus::Accepted, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    // Hueco conocido y deliberado: findAvailable y create no comparten
    // transacción, así que dos peticiones simultáneas para el mismo
    // vehículo y rangos solapados se aceptan ambas. El triaje lo hace el
    // staff al aceptar.
    #[tokio::test]
    async fn test_dos_creates_solapados_para_el_mismo_vehiculo_ambos_entran() {
        let ledger = LedgerEnMemoria::default();
        let request = peticion();

        let first = ledger.create(request.clone()).await.unwrap();
        let second = ledger.create(request).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.vehicle_id, second.vehicle_id);
        assert_eq!(first.status, "pending");
        assert_eq!(second.status, "pending");
        assert_eq!(ledger.find_all().await.unwrap().len(), 2);
    }
}
