use crate::config::{DatabaseBackend, EmployeeConfig};
use crate::handlers;
use crate::services::{Database, EmployeeRepository, MemoryRepository};
use axum::{routing::get, Router};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: EmployeeConfig,
    pub repository: Arc<dyn EmployeeRepository>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: EmployeeConfig) -> Result<Self, AppError> {
        let repository: Arc<dyn EmployeeRepository> = match config.database.backend {
            DatabaseBackend::Postgres => {
                let db = Database::new(
                    &config.database.url,
                    config.database.max_connections,
                    config.database.min_connections,
                )
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to PostgreSQL: {}", e);
                    e
                })?;
                db.run_migrations().await.map_err(|e| {
                    tracing::error!("Failed to run migrations: {}", e);
                    e
                })?;
                Arc::new(db)
            }
            DatabaseBackend::Memory => Arc::new(MemoryRepository::new()),
        };

        let state = AppState {
            config: config.clone(),
            repository,
        };

        let app = Router::new()
            .route("/ping", get(handlers::ping))
            .route(
                "/employees",
                get(handlers::list_employees).post(handlers::create_employee),
            )
            .route(
                "/employees/:id",
                get(handlers::show_employee)
                    .put(handlers::update_employee)
                    .patch(handlers::update_employee)
                    .delete(handlers::destroy_employee),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
