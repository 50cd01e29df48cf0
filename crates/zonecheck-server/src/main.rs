use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use zonecheck_engine::ZonemasterClient;
use zonecheck_storage::CheckStore;

use zonecheck_server::app;
use zonecheck_server::config::ServerConfig;
use zonecheck_server::service::CheckService;
use zonecheck_server::state::AppState;

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  zonecheck-server [config.toml]    Start the server");
    eprintln!();
    eprintln!("Without a path, config/server.toml is used when present.");
    eprintln!("Environment overrides: ZONEMASTER_API_URL, ZONEMASTER_API_TIMEOUT,");
    eprintln!("  DATABASE_URL, DEBUG, BACKEND_CORS_ORIGINS, HTTP_PORT");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if matches!(args.get(1).map(String::as_str), Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let config = ServerConfig::load_with_env(args.get(1).map(String::as_str))?;

    let directive = if config.debug {
        "zonecheck=debug"
    } else {
        "zonecheck=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    run_server(config).await
}

async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!(
        http_port = config.http_port,
        db = %config.database.redacted_url(),
        engine = %config.engine.url,
        engine_timeout_secs = config.engine.timeout_secs,
        debug = config.debug,
        "zonecheck-server starting"
    );

    let store = Arc::new(CheckStore::new(&config.database.url, config.debug).await?);
    let analyzer = Arc::new(ZonemasterClient::new(
        config.engine.url.clone(),
        Some(config.engine.timeout_secs),
    )?);
    let service = Arc::new(CheckService::new(store, analyzer));

    let http_addr: SocketAddr = ([0, 0, 0, 0], config.http_port).into();
    let state = AppState {
        service,
        config: Arc::new(config),
    };
    let app = app::build_http_app(state);

    let listener = tokio::net::TcpListener::bind(http_addr).await?;
    tracing::info!(addr = %http_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("Shutting down gracefully");
        })
        .await?;

    Ok(())
}
