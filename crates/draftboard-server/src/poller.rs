// Snapshot poller: reloads the draft documents on an interval and publishes
// changes to the push channel.
//
// Polls are serialized. The next tick is only awaited after the previous
// load finished, and missed ticks are skipped, so an older read can never
// be published after a newer one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use draftboard_core::{DraftSnapshot, DraftSource, StoreError};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::protocol::BoardUpdate;

/// Latest message on the push channel; `None` until the first poll completes.
pub type LatestUpdate = Option<Arc<BoardUpdate>>;

/// Decides which poll results are worth publishing.
///
/// A snapshot is published when it differs from the last published one
/// (whole-document comparison, so removed picks count as changes) or when
/// it follows an error. An error is published when its message differs
/// from the previous error.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    last_snapshot: Option<DraftSnapshot>,
    last_error: Option<String>,
}

impl ChangeTracker {
    pub fn observe(
        &mut self,
        result: Result<DraftSnapshot, StoreError>,
        fetched_at: DateTime<Utc>,
    ) -> Option<BoardUpdate> {
        match result {
            Ok(snapshot) => {
                let recovered = self.last_error.take().is_some();
                if !recovered && self.last_snapshot.as_ref() == Some(&snapshot) {
                    return None;
                }
                self.last_snapshot = Some(snapshot.clone());
                Some(BoardUpdate::snapshot(snapshot, fetched_at))
            }
            Err(e) => {
                let message = e.to_string();
                if self.last_error.as_deref() == Some(message.as_str()) {
                    return None;
                }
                self.last_error = Some(message.clone());
                Some(BoardUpdate::error(message))
            }
        }
    }
}

/// Poll `source` every `period`, publishing changes into `tx`.
///
/// Returns once every receiver of the channel has been dropped.
pub async fn run(
    source: Arc<dyn DraftSource>,
    period: Duration,
    tx: watch::Sender<LatestUpdate>,
) {
    info!(
        "Polling {} every {}ms",
        source.describe(),
        period.as_millis()
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tracker = ChangeTracker::default();

    loop {
        ticker.tick().await;

        let result = source.load().await;
        if let Err(e) = &result {
            warn!("Poll failed: {e}");
        }

        let Some(update) = tracker.observe(result, Utc::now()) else {
            continue;
        };
        debug!(
            "Publishing {} update",
            if update.is_error() { "error" } else { "snapshot" }
        );
        if tx.send(Some(Arc::new(update))).is_err() {
            info!("No push subscribers left; poller stopping");
            break;
        }
    }
}
