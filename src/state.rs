//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El handle del repositorio se construye
//! explícitamente al arranque y se inyecta; no hay singletons globales.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::availability_repository::WindowStoreCapability;
use crate::services::notification_service::{Notifier, WebhookNotifier};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    // Resultado de la sonda de schema hecha una vez al arranque
    pub window_capability: WindowStoreCapability,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        window_capability: WindowStoreCapability,
    ) -> Self {
        let notifier = Arc::new(WebhookNotifier::new(
            reqwest::Client::new(),
            config.notification_webhook_url.clone(),
        ));
        Self {
            pool,
            config,
            window_capability,
            notifier,
        }
    }
}
