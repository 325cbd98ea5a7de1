use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StorageBackend};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::ship::{
    repo::seaorm::SeaOrmShipRepository,
    repository::{memory::InMemoryShipRepository, ShipRepository},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

/// Pick the ship store from `[storage]`; postgres connects and migrates first.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn ShipRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory ship storage; data is lost on restart");
            Ok(Arc::new(InMemoryShipRepository::new()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
                info!("database migrations applied");
            }
            Ok(Arc::new(SeaOrmShipRepository::new(db)))
        }
    }
}

/// Assemble the router over an already chosen repository.
pub fn build_app(repo: Arc<dyn ShipRepository>) -> Router {
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let repo = build_repository(&cfg).await?;
    let app = build_app(repo);

    // Bind and serve
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, backend = ?cfg.storage.backend, "starting ship catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
