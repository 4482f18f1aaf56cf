// Individual pick records from the draft state document.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{opt_string_like, string_like};

/// A single draft pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    /// Position in the draft order. Storage order of picks is not draft order;
    /// duplicates are tolerated.
    pub pick_no: i64,
    /// Team that made the pick.
    #[serde(deserialize_with = "string_like")]
    pub team_id: String,
    /// Player reference: usually a catalog id, but organizers sometimes type
    /// the player's display name instead.
    #[serde(rename = "playerId", deserialize_with = "string_like")]
    pub player_ref: String,
    /// When the pick was made, as written by the organizer's tooling.
    #[serde(
        default,
        deserialize_with = "opt_string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub ts: Option<String>,
}

impl Pick {
    pub fn new(pick_no: i64, team_id: impl Into<String>, player_ref: impl Into<String>) -> Self {
        Pick {
            pick_no,
            team_id: team_id.into(),
            player_ref: player_ref.into(),
            ts: None,
        }
    }

    /// The pick timestamp, when `ts` is a valid RFC 3339 value.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(self.ts.as_deref()?.trim()).ok()
    }
}
