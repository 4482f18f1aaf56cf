// Poll task: loads snapshots on an interval and forwards them to the TUI.
//
// Loads are serialized. A refresh request or tick only starts a new load
// once the previous one has finished, so results reach the TUI in the
// order they were read.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use draftboard_core::DraftSource;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::protocol::{UiUpdate, UserCommand};

/// Load once and wrap the result for the TUI.
pub async fn poll_once(source: &dyn DraftSource) -> UiUpdate {
    match source.load().await {
        Ok(snapshot) => {
            debug!(
                "Loaded {} players, {} picks",
                snapshot.players.len(),
                snapshot.state.picks.len()
            );
            UiUpdate::Snapshot {
                snapshot: Box::new(snapshot),
                fetched_at: Local::now(),
            }
        }
        Err(e) => {
            warn!("Load from {} failed: {e}", source.describe());
            UiUpdate::LoadFailed {
                error: e.to_string(),
                failed_at: Local::now(),
            }
        }
    }
}

/// Poll `source` every `period` until the TUI quits or goes away.
///
/// [`UserCommand::Refresh`] polls immediately and restarts the interval.
pub async fn run(
    source: Arc<dyn DraftSource>,
    period: Duration,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
) {
    info!(
        "Polling {} every {}ms",
        source.describe(),
        period.as_millis()
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            cmd = cmd_rx.recv() => match cmd {
                Some(UserCommand::Refresh) => {
                    debug!("Manual refresh");
                    ticker.reset();
                }
                Some(UserCommand::Quit) | None => break,
            },
        }

        let update = poll_once(source.as_ref()).await;
        if ui_tx.send(update).await.is_err() {
            break;
        }
    }

    info!("Poll task stopped");
}
