//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use userhub_common::{AppConfig, AppError, TokenService};
use userhub_db::{
    apply_schema, create_pool, DatabaseConfig, MemoryStore, PgConfigRepository,
    PgProfileRepository, PgRoleRepository, PgStoreHealth, PgUserRepository,
};
use userhub_service::{ServiceContext, ServiceContextBuilder};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router, state.config());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// A `memory://` database URL selects the in-process store; anything else is
/// treated as a PostgreSQL URL.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let token_service = Arc::new(TokenService::new(
        &config.token.secret,
        config.token.ttl_secs,
    ));

    let service_context = if config.database.is_memory() {
        warn!("Using the in-memory store; data is lost on shutdown");
        memory_context(token_service)?
    } else {
        postgres_context(&config, token_service).await?
    };

    Ok(AppState::new(service_context, config))
}

fn memory_context(token_service: Arc<TokenService>) -> Result<ServiceContext, AppError> {
    let store = Arc::new(MemoryStore::new());

    ServiceContextBuilder::new()
        .user_repo(store.clone())
        .profile_repo(store.clone())
        .role_repo(store.clone())
        .config_repo(store.clone())
        .store_health(store)
        .token_service(token_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

async fn postgres_context(
    config: &AppConfig,
    token_service: Arc<TokenService>,
) -> Result<ServiceContext, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    apply_schema(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .profile_repo(Arc::new(PgProfileRepository::new(pool.clone())))
        .role_repo(Arc::new(PgRoleRepository::new(pool.clone())))
        .config_repo(Arc::new(PgConfigRepository::new(pool.clone())))
        .store_health(Arc::new(PgStoreHealth::new(pool)))
        .token_service(token_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Serve `app` on an already bound listener until Ctrl+C
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
