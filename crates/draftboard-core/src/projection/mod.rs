// Draft-state projection: available players, team rosters, and summary counts.
//
// Every operation here is a pure function of (catalog, state). Nothing is
// cached between calls; callers recompute from each fresh snapshot, so a
// pick that disappears from the state document simply stops counting.
//
// Pick references are matched against players in two explicit stages:
// exact catalog id first, then trimmed case-insensitive display name.

pub mod available;
pub mod roster;
pub mod summary;

use std::collections::{HashMap, HashSet};

use crate::draft::pick::Pick;
use crate::draft::player::Player;

pub use available::{available_players, filter_by_name};
pub use roster::{team_rosters, TeamRoster, TeamRosters};
pub use summary::{draft_summary, DraftSummary};

/// Normalize a display name or pick reference for name matching.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// PickedSet
// ---------------------------------------------------------------------------

/// The player identities referenced by a set of picks.
///
/// Each pick contributes two keys: its trimmed reference (matched against
/// player ids) and the normalized reference (matched against display names).
#[derive(Debug, Clone, Default)]
pub struct PickedSet {
    ids: HashSet<String>,
    names: HashSet<String>,
}

impl PickedSet {
    pub fn from_picks<'a>(picks: impl IntoIterator<Item = &'a Pick>) -> Self {
        let mut set = PickedSet::default();
        for pick in picks {
            set.ids.insert(pick.player_ref.trim().to_string());
            set.names.insert(normalize_name(&pick.player_ref));
        }
        set
    }

    /// Whether any pick refers to this player by id or by display name.
    pub fn contains(&self, player: &Player) -> bool {
        self.ids.contains(&player.id) || self.names.contains(&normalize_name(&player.display_name))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PlayerIndex
// ---------------------------------------------------------------------------

/// Catalog lookups used to resolve pick references.
///
/// When the catalog repeats an id or a normalized name, the later entry wins.
#[derive(Debug, Clone)]
pub struct PlayerIndex<'a> {
    by_id: HashMap<&'a str, &'a Player>,
    by_name: HashMap<String, &'a Player>,
}

impl<'a> PlayerIndex<'a> {
    pub fn new(catalog: &'a [Player]) -> Self {
        let mut by_id = HashMap::with_capacity(catalog.len());
        let mut by_name = HashMap::with_capacity(catalog.len());
        for player in catalog {
            by_id.insert(player.id.as_str(), player);
            by_name.insert(normalize_name(&player.display_name), player);
        }
        PlayerIndex { by_id, by_name }
    }

    /// Exact id lookup.
    pub fn by_id(&self, id: &str) -> Option<&'a Player> {
        self.by_id.get(id).copied()
    }

    /// Trimmed, case-insensitive display name lookup.
    pub fn by_name(&self, name: &str) -> Option<&'a Player> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    /// Resolve a pick reference: id first, then display name.
    pub fn resolve(&self, reference: &str) -> Option<&'a Player> {
        let key = reference.trim();
        self.by_id(key).or_else(|| self.by_name(key))
    }
}
