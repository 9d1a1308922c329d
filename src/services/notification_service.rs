//! Dispatcher de notificaciones
//!
//! Colaborador best-effort: avisa al cliente de un cambio de estado de su
//! reserva. Nunca está en el camino crítico; el coordinador registra y
//! traga cualquier fallo de despacho.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::models::booking::Booking;
use crate::utils::errors::AppError;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Avisar al cliente de que el estado de su reserva cambió
    async fn booking_status_changed(&self, booking: &Booking) -> Result<(), AppError>;
}

/// Implementación por webhook HTTP: hace POST del cambio de estado al
/// endpoint configurado (un servicio de email/SMS aguas abajo).
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn booking_status_changed(&self, booking: &Booking) -> Result<(), AppError> {
        let Some(url) = &self.webhook_url else {
            debug!("Sin webhook de notificaciones configurado, se omite el aviso");
            return Ok(());
        };

        let Some(email) = &booking.customer_email else {
            debug!("Reserva {} sin email de contacto, se omite el aviso", booking.id);
            return Ok(());
        };

        let payload = json!({
            "booking_id": booking.id,
            "customer_email": email,
            "status": booking.status,
            "rejection_reason": booking.rejection_reason,
        });

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("notification dispatch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "notification endpoint returned {}",
                response.status()
            )));
        }

        info!("📧 Notificación enviada a {} (reserva {})", email, booking.id);
        Ok(())
    }
}
