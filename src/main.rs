//! Sequence Timers - pausable timer sequences over a small JSON API
//! 
//! This is the main entry point for the sequence-timers server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use sequence_timers::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::cleanup_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("sequence_timers={},tower_http=info", config.log_level()))
        .init();

    info!("Starting sequence-timers server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, cleanup every {}min",
          config.host, config.port, config.cleanup_interval);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the ended-run cleanup background task
    let cleanup_state = Arc::clone(&state);
    let every = config.cleanup_every();
    tokio::spawn(async move {
        cleanup_task(cleanup_state, every).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /sequences             - List sequences (?page=N)");
    info!("  POST /sequences             - Create a sequence");
    info!("  GET  /sequences/:id         - Show a sequence");
    info!("  POST /sequences/:id/runs    - Start a run");
    info!("  GET  /runs/:id              - Project a run onto now");
    info!("  POST /runs/:id/pause        - Pause a run");
    info!("  POST /runs/:id/unpause      - Resume a run");
    info!("  POST /runs/:id/toggle       - Pause or resume a run");
    info!("  GET  /status                - Server status");
    info!("  GET  /health                - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
