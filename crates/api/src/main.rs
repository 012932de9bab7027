use std::sync::Arc;

use csp_scout_api::config::ServerConfig;
use csp_scout_api::error::BootError;
use csp_scout_api::router::build_app_router;
use csp_scout_api::services::Service;
use csp_scout_api::state::AppState;
use csp_scout_db::{DbConfig, MongoReportRepo, ReportRepository};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Optional env file checked before `.env`.
const LOCAL_ENV_FILE: &str = "configs/.local.env";

#[tokio::main]
async fn main() {
    // Values already in the environment win over both files.
    dotenvy::from_filename(LOCAL_ENV_FILE).ok();
    dotenvy::dotenv().ok();

    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Fatal error, exiting");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BootError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    let db_config = DbConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        request_timeout_secs = ?config.request_timeout_secs,
        database = %db_config.database,
        collection = %db_config.collection,
        "Loaded configuration"
    );

    // --- Report store ---
    let repo = MongoReportRepo::connect(&db_config).await?;
    tracing::info!("Report store connected, ping ok");

    if db_config.ensure_indexes {
        repo.ensure_indexes().await?;
        tracing::info!("Report store indexes ensured");
    }

    let repo: Arc<dyn ReportRepository> = Arc::new(repo);

    // --- App state ---
    let shutdown = CancellationToken::new();
    let state = AppState {
        service: Service::new(Arc::clone(&repo)),
        config: Arc::new(config.clone()),
        shutdown: shutdown.clone(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| BootError::Bind { addr, source })?;
    tracing::info!(%addr, "Starting server");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    if let Err(e) = repo.close().await {
        tracing::warn!(error = %e, "Failed to close report store");
    }

    served.map_err(BootError::Serve)?;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the tracing subscriber. `LOG_FORMAT=json` selects JSON output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "csp_scout_api=debug,csp_scout_db=debug,tower_http=debug".into()
    });
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for a termination signal, then cancel `shutdown`.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). Canceling the token
/// aborts store operations still in flight; axum then stops accepting
/// connections and drains.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }

    shutdown.cancel();
}
