// Push protocol: JSON messages sent to WebSocket subscribers.

use chrono::{DateTime, Utc};
use draftboard_core::{DraftSnapshot, DraftState, Player};
use serde::{Deserialize, Serialize};

/// One message on the push channel.
///
/// Serialized with a `type` tag:
/// `{"type":"snapshot","fetchedAt":...,"players":[...],"state":{...}}` or
/// `{"type":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardUpdate {
    #[serde(rename_all = "camelCase")]
    Snapshot {
        fetched_at: DateTime<Utc>,
        players: Vec<Player>,
        state: DraftState,
    },
    Error {
        error: String,
    },
}

impl BoardUpdate {
    pub fn snapshot(snapshot: DraftSnapshot, fetched_at: DateTime<Utc>) -> Self {
        BoardUpdate::Snapshot {
            fetched_at,
            players: snapshot.players,
            state: snapshot.state,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        BoardUpdate::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BoardUpdate::Error { .. })
    }
}
