// Team rosters: picks grouped per team in draft order.

use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

use crate::draft::pick::Pick;
use crate::draft::player::Player;
use crate::draft::state::{DraftState, Team};

use super::PlayerIndex;

/// One team and the players it has picked, in pick order.
///
/// Serializes as `{ "id": ..., "name": ..., "players": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRoster<'a> {
    #[serde(flatten)]
    pub team: &'a Team,
    pub players: Vec<&'a Player>,
    /// The pick behind each entry of `players`, index for index.
    #[serde(skip)]
    pub picks: Vec<&'a Pick>,
}

impl<'a> TeamRoster<'a> {
    /// Players paired with the pick that brought them in.
    pub fn entries(&self) -> impl Iterator<Item = (&'a Player, &'a Pick)> + '_ {
        self.players.iter().copied().zip(self.picks.iter().copied())
    }
}

/// Rosters for every team in the draft state, in `state.teams` order.
///
/// Serializes as a JSON object keyed by team id.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRosters<'a> {
    rosters: Vec<TeamRoster<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> TeamRosters<'a> {
    /// Players picked by `team_id`, or `None` for a team not in the draft.
    pub fn get(&self, team_id: &str) -> Option<&[&'a Player]> {
        self.index
            .get(team_id)
            .map(|&i| self.rosters[i].players.as_slice())
    }

    pub fn contains_team(&self, team_id: &str) -> bool {
        self.index.contains_key(team_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamRoster<'a>> {
        self.rosters.iter()
    }

    pub fn len(&self) -> usize {
        self.rosters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rosters.is_empty()
    }

    pub fn into_vec(self) -> Vec<TeamRoster<'a>> {
        self.rosters
    }
}

impl Serialize for TeamRosters<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rosters.len()))?;
        for roster in &self.rosters {
            map.serialize_entry(&roster.team.id, &roster.players)?;
        }
        map.end()
    }
}

/// Build every team's roster from the picks.
///
/// Each team in `state.teams` gets an entry, empty if it has not picked yet;
/// a repeated team id keeps its first position. Picks are applied in
/// ascending pick number (stable for duplicates). A pick is skipped when
/// its reference resolves to no player (id first, then name) or its team
/// id is not in the draft.
pub fn team_rosters<'a>(catalog: &'a [Player], state: &'a DraftState) -> TeamRosters<'a> {
    let mut rosters: Vec<TeamRoster<'a>> = Vec::with_capacity(state.teams.len());
    let mut index: HashMap<&'a str, usize> = HashMap::with_capacity(state.teams.len());

    for team in &state.teams {
        if index.contains_key(team.id.as_str()) {
            continue;
        }
        index.insert(team.id.as_str(), rosters.len());
        rosters.push(TeamRoster {
            team,
            players: Vec::new(),
            picks: Vec::new(),
        });
    }

    let players = PlayerIndex::new(catalog);

    for pick in state.picks_in_order() {
        let Some(player) = players.resolve(&pick.player_ref) else {
            debug!(
                "Pick #{} references unknown player '{}'",
                pick.pick_no, pick.player_ref
            );
            continue;
        };
        let Some(&slot) = index.get(pick.team_id.as_str()) else {
            debug!(
                "Pick #{} references unknown team '{}'",
                pick.pick_no, pick.team_id
            );
            continue;
        };
        rosters[slot].players.push(player);
        rosters[slot].picks.push(pick);
    }

    TeamRosters { rosters, index }
}
