// Draft state document: status, round, teams, and picks.

use serde::{Deserialize, Serialize};

use super::pick::Pick;
use super::{null_as_default, opt_string_like, string_like};

/// A drafting team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(deserialize_with = "string_like")]
    pub id: String,
    pub name: String,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Team {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The complete draft state as stored in `draft-state.json`.
///
/// Every field tolerates being absent or `null`; an organizer's half-written file
/// still renders instead of taking the board down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Free text such as "not started", "in progress", "complete".
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub round: u32,
    /// Team currently due to pick.
    #[serde(
        default,
        deserialize_with = "opt_string_like",
        skip_serializing_if = "Option::is_none"
    )]
    pub on_clock_team_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<Team>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub picks: Vec<Pick>,
}

impl DraftState {
    /// Look up a team by id.
    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// The team on the clock, if it is set and names a known team.
    pub fn on_clock_team(&self) -> Option<&Team> {
        self.on_clock_team_id
            .as_deref()
            .and_then(|id| self.team(id))
    }

    /// Picks in draft order: ascending `pick_no`, ties in storage order.
    pub fn picks_in_order(&self) -> Vec<&Pick> {
        let mut ordered: Vec<&Pick> = self.picks.iter().collect();
        // sort_by_key is stable
        ordered.sort_by_key(|p| p.pick_no);
        ordered
    }
}
