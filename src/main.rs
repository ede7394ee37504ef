//! Orgdesk API server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use orgdesk::adapters::auth::{FirebaseAdminClient, FirebaseTokenVerifier};
use orgdesk::adapters::http::{app_router, AppState};
use orgdesk::adapters::postgres::{
    run_migrations, PostgresEventRepository, PostgresMemberRepository, PostgresProfileRepository,
    PostgresRequirementRepository, PostgresUserRepository,
};
use orgdesk::config::{AppConfig, ServerConfig};
use orgdesk::domain::user::PasswordService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        project_id = %config.firebase.project_id,
        emulator = config.firebase.emulator_host.is_some(),
        "Starting orgdesk"
    );

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let state = AppState {
        token_verifier: Arc::new(FirebaseTokenVerifier::new(&config.firebase)?),
        identity_provider: Arc::new(FirebaseAdminClient::new(&config.firebase)?),
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        events: Arc::new(PostgresEventRepository::new(pool.clone())),
        requirements: Arc::new(PostgresRequirementRepository::new(pool.clone())),
        passwords: Arc::new(PasswordService::default()),
    };

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// JSON lines in production, human-readable output otherwise. `RUST_LOG`
/// overrides the configured level.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.json_logs() {
        registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
