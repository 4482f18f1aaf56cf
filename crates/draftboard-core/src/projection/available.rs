// Available players: the catalog minus everyone a pick refers to.

use crate::draft::player::Player;
use crate::draft::state::DraftState;

use super::PickedSet;

/// Players not yet picked, in catalog order.
///
/// A player is excluded when any pick references its id (after trimming
/// the reference) or its display name (trimmed, case-insensitive).
pub fn available_players<'a>(catalog: &'a [Player], state: &DraftState) -> Vec<&'a Player> {
    let picked = PickedSet::from_picks(&state.picks);
    catalog.iter().filter(|p| !picked.contains(p)).collect()
}

/// Keep players whose display name contains `query`, case-insensitively.
///
/// A blank query keeps everyone. Order is preserved.
pub fn filter_by_name<'a>(players: &[&'a Player], query: &str) -> Vec<&'a Player> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return players.to_vec();
    }
    players
        .iter()
        .copied()
        .filter(|p| p.display_name.to_lowercase().contains(&needle))
        .collect()
}
