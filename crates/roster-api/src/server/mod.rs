//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use roster_common::{AppConfig, AppError};
use roster_core::{ChannelId, SnowflakeGenerator};
use roster_db::{
    create_pool, run_migrations, PgActiveEventRepository, PgAttendanceRepository,
    PgMemberDirectory, PoolConfig,
};
use roster_discord::DiscordClient;
use roster_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    let router = apply_middleware(create_router(), &cors, is_production);
    router.with_state(state)
}

/// Connect to PostgreSQL and Discord and wire the service context
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("migrations failed: {e}")))?;
    info!("PostgreSQL connection established");

    let chat = DiscordClient::new(&config.discord).map_err(|e| AppError::Config(e.to_string()))?;

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let default_channel = config
        .discord
        .attendance_channel_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .map(ChannelId::from);

    let service_context = ServiceContextBuilder::new()
        .attendance_repo(Arc::new(PgAttendanceRepository::new(pool.clone())))
        .member_directory(Arc::new(PgMemberDirectory::new(pool.clone())))
        .event_repo(Arc::new(PgActiveEventRepository::new(pool)))
        .chat(Arc::new(chat))
        .snowflake_generator(snowflake_generator)
        .default_channel_id(default_channel)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
