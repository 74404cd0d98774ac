use crate::build_router;
use crate::config::OnboardingConfig;
use crate::services::{DocumentStore, MongoGateway};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::signal;

#[derive(Clone)]
pub struct AppState {
    pub config: OnboardingConfig,
    pub store: Arc<dyn DocumentStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: OnboardingConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            store,
            started_at: Instant::now(),
        }
    }
}

pub struct Application {
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    gateway: Arc<MongoGateway>,
}

impl Application {
    /// Connects the gateway, ensures indexes and binds the listener.
    pub async fn build(config: OnboardingConfig) -> Result<Self, AppError> {
        let gateway = Arc::new(MongoGateway::new(
            &config.mongodb.uri,
            &config.mongodb.database,
        ));
        gateway.connect().await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;
        gateway.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let store: Arc<dyn DocumentStore> = gateway.clone();
        let state = AppState::new(config.clone(), store);
        let app = build_router(state)?;

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            server: Box::new(server.into_future()),
            gateway,
        })
    }

    /// Serves until SIGINT/SIGTERM, then releases the store connection.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let result = self.server.await;
        self.gateway.disconnect().await;
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
