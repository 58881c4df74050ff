use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waveshift_core::{
    load_config, validate_config, Config, ConversionOrchestrator, FfmpegEngine, FsResolver,
    OutputLayout, TempFileJanitor, TranscodeEngine,
};

use waveshift_server::api::create_router;
use waveshift_server::metrics;
use waveshift_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("WAVESHIFT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration; a missing file means defaults plus env overrides
    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file at {:?}, using defaults", config_path);
        Config::default()
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Staging directory: {:?}", config.staging.dir);
    info!("Output directory: {:?}", config.output.dir);

    // Create the transcoding engine and check the binary is reachable.
    // A missing ffmpeg is not fatal at startup; conversions will fail with
    // a clear error until it appears on the path.
    let engine = FfmpegEngine::new(config.engine.clone());
    match engine.validate().await {
        Ok(()) => info!("Transcoding engine validated: {}", engine.name()),
        Err(e) => warn!("Transcoding engine unavailable: {}", e),
    }

    // Create resolver and janitor over the shared staging directory
    let resolver = FsResolver::with_fs_provider(config.staging.dir.clone());
    let janitor = Arc::new(TempFileJanitor::new(
        config.staging.dir.clone(),
        Duration::from_secs(config.staging.retention_secs),
    ));

    let orchestrator = Arc::new(ConversionOrchestrator::new(
        Arc::new(resolver),
        Arc::new(engine),
        Arc::clone(&janitor),
    ));

    let output_layout = OutputLayout::new(config.output.dir.clone());
    output_layout
        .ensure_dir()
        .await
        .with_context(|| format!("Failed to create output directory {:?}", config.output.dir))?;

    // Touch the metrics registry so core collectors are registered up front
    let _ = metrics::REGISTRY.gather();

    // Sweep once at startup to clear orphans from a previous run, then keep
    // sweeping in the background.
    let report = janitor.sweep_orphans().await;
    info!(
        examined = report.examined,
        deleted = report.deleted,
        "Startup orphan sweep finished"
    );

    let sweep_interval = Duration::from_secs(config.staging.sweep_interval_secs);
    let sweep_janitor = Arc::clone(&janitor);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            sweep_janitor.sweep_orphans().await;
        }
    });

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), orchestrator, output_layout));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
