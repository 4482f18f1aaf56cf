// Draft board server entry point.
//
// Startup sequence:
// 1. Initialize tracing (stdout)
// 2. Load config
// 3. Build the file-backed data source
// 4. Spawn the poller and WebSocket push server (when enabled)
// 5. Serve the HTTP API until Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use draftboard_core::config;
use draftboard_core::{DraftSource, JsonFileStore};
use draftboard_server::{api, poller, ws_server};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Draft board server starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!("Config loaded from {}", config.base_dir.display());

    // 3. Data source
    let store = JsonFileStore::from_config(&config.base_dir, &config.data);
    let source: Arc<dyn DraftSource> = Arc::new(store);
    info!("Serving draft data from {}", source.describe());

    // 4. Push channel
    let mut background = Vec::new();
    if config.websocket.enabled {
        let ws_addr: SocketAddr = config
            .websocket_addr()
            .parse()
            .with_context(|| format!("invalid websocket address {}", config.websocket_addr()))?;
        let (update_tx, update_rx) = watch::channel(None);
        let period = Duration::from_millis(config.poll.interval_ms);

        background.push(tokio::spawn(poller::run(source.clone(), period, update_tx)));
        background.push(tokio::spawn(async move {
            if let Err(e) = ws_server::run(ws_addr, update_rx).await {
                error!("WebSocket push server error: {e}");
            }
        }));
    } else {
        info!("WebSocket push disabled");
    }

    // 5. HTTP API
    let addr = config.server_addr();
    let app = api::router(api::ApiState::new(source), config.data_dir());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("HTTP API listening on http://{}/", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await
        .context("HTTP server error")?;

    for handle in background {
        handle.abort();
    }

    info!("Draft board server shut down cleanly");
    Ok(())
}

/// Initialize tracing to stdout.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draftboard_server=info,draftboard_core=info,warn")),
        )
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
