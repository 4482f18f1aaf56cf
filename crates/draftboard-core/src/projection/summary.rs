// Headline counters for the board's overview.

use serde::Serialize;

use crate::draft::player::Player;
use crate::draft::state::DraftState;

use super::available_players;

/// Draft-wide counters shown on the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub status: String,
    pub round: u32,
    pub on_clock_team_id: Option<String>,
    /// Name of the on-the-clock team, when its id names a known team.
    pub on_clock_team_name: Option<String>,
    pub teams: usize,
    pub picks_made: usize,
    pub total_players: usize,
    pub available_players: usize,
}

impl DraftSummary {
    /// "available / total", as shown on the overview card.
    pub fn availability_label(&self) -> String {
        format!("{} / {}", self.available_players, self.total_players)
    }

    /// The on-the-clock label: team name, else raw id, else "-".
    pub fn on_clock_label(&self) -> &str {
        self.on_clock_team_name
            .as_deref()
            .or(self.on_clock_team_id.as_deref())
            .unwrap_or("-")
    }
}

/// Compute the overview counters for a snapshot.
pub fn draft_summary(catalog: &[Player], state: &DraftState) -> DraftSummary {
    DraftSummary {
        status: state.status.clone(),
        round: state.round,
        on_clock_team_id: state.on_clock_team_id.clone(),
        on_clock_team_name: state.on_clock_team().map(|t| t.name.clone()),
        teams: state.teams.len(),
        picks_made: state.picks.len(),
        total_players: catalog.len(),
        available_players: available_players(catalog, state).len(),
    }
}
