// Draft board viewer entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Pick the data source: the server endpoint when configured, else the data files
// 4. Create mpsc channels
// 5. Spawn the poll task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use draftboard_core::config;
use draftboard_core::{DraftSource, JsonFileStore};
use draftboard_tui::remote::RemoteStore;
use draftboard_tui::{poll, tui};
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Draft board viewer starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 3. Data source
    let source: Arc<dyn DraftSource> = match &config.viewer.server_url {
        Some(url) => Arc::new(
            RemoteStore::new(url.as_str()).context("failed to build HTTP client")?,
        ),
        None => Arc::new(JsonFileStore::from_config(&config.base_dir, &config.data)),
    };
    let label = source.describe();
    info!("Reading draft data from {label}");

    // 4. Channels
    let (ui_tx, ui_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(8);

    // 5. Poll task
    let period = Duration::from_millis(config.viewer.poll_interval_ms);
    let poll_handle = tokio::spawn(poll::run(source, period, ui_tx, cmd_rx));

    // 6. TUI (blocks until quit)
    let result = tui::run(ui_rx, cmd_tx, label).await;
    if let Err(e) = &result {
        error!("TUI error: {e}");
    }

    // 7. Cleanup: the poll task exits once the command channel closes.
    if tokio::time::timeout(Duration::from_secs(2), poll_handle)
        .await
        .is_err()
    {
        info!("Poll task still busy at shutdown");
    }

    info!("Draft board viewer shut down cleanly");
    result
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draftboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("draftboard=info,draftboard_tui=info,draftboard_core=info,warn")
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
