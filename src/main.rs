use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use vehicle_rental::config::environment::EnvironmentConfig;
use vehicle_rental::database;
use vehicle_rental::repositories::availability_repository::{
    probe_capability, WindowStoreCapability,
};
use vehicle_rental::routes::create_app_router;
use vehicle_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Rental - API de reservas");
    info!("===================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Sondear el almacén de ventanas una sola vez para elegir el code path
    let window_capability = probe_capability(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Error sondeando el almacén de ventanas: {}", e))?;

    match window_capability {
        WindowStoreCapability::Full => {
            info!("✅ Almacén de ventanas disponible (con hint de tipo)");
        }
        WindowStoreCapability::NoTypeHint => {
            warn!("⚠️ Almacén de ventanas sin columna vehicle_type, hint deshabilitado");
        }
        WindowStoreCapability::Missing => {
            warn!("⚠️ Almacén de ventanas no aprovisionado: resolver en modo degradado");
        }
    }

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone(), window_capability);
    let app = create_app_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("📋 Endpoints - Bookings:");
    info!("   POST   /bookings - Registrar petición de reserva");
    info!("   GET    /bookings - Listar todas las reservas (staff)");
    info!("   GET    /bookings/customer?email= - Reservas de un cliente");
    info!("   GET    /bookings/:id - Obtener reserva");
    info!("   PATCH  /bookings/:id/status - Transicionar estado (staff)");
    info!("🚙 Endpoints - Vehicles:");
    info!("   GET    /vehicles/available - Buscar vehículos reservables");
    info!("   GET    /vehicles/:id/availability - Ventanas de un vehículo (staff)");
    info!("   POST   /vehicles/availability - Crear ventana (staff)");
    info!("   PATCH  /vehicles/availability/:id - Actualizar ventana (staff)");
    info!("   DELETE /vehicles/availability/:id - Eliminar ventana (staff)");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
