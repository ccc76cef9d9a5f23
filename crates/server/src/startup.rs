use std::{net::SocketAddr, sync::Arc};

use configs::{AppConfig, ServerConfig, StorageBackend};
use migration::MigratorTrait;
use service::runtime;
use service::shops::repo::{json_file::JsonFileShopRepository, seaorm::SeaOrmShopRepository};
use service::shops::repository::{memory::InMemoryShopRepository, ShopRepository};
use service::shops::{ShopStore, StoreConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Open the configured repository and wrap it in a [`ShopStore`].
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let repo: Arc<dyn ShopRepository> = match cfg.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryShopRepository::new()),
        StorageBackend::File => {
            runtime::ensure_data_dir(&cfg.storage.data_file).await?;
            let repo = JsonFileShopRepository::open(&cfg.storage.data_file)
                .await
                .map_err(|e| StartupError::Runtime(e.to_string()))?;
            Arc::new(repo)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Runtime(format!("database connect: {e}")))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Runtime(format!("migrations: {e}")))?;
            Arc::new(SeaOrmShopRepository { db })
        }
    };
    info!(backend = ?cfg.storage.backend, max_retries = cfg.storage.max_retries, "shop repository ready");
    let store = ShopStore::new(repo, StoreConfig { max_retries: cfg.storage.max_retries });
    Ok(ServerState::new(store))
}

/// Public entry: build the app from `cfg` and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting shop server");
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Runtime(format!("bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    Ok(())
}
