// Available players widget: filterable table of undrafted players.
//
// Columns: #, Name, Bat, Bowl, Role, Clubs. The name filter comes from
// ViewState::filter_text.

use draftboard_core::projection::{available_players, filter_by_name};
use draftboard_core::Player;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::ViewState;

/// Render the available players table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (players, available_count) = match &state.snapshot {
        Some(snapshot) => {
            let available = available_players(&snapshot.players, &snapshot.state);
            let count = available.len();
            (filter_by_name(&available, &state.filter_text), count)
        }
        None => (Vec::new(), 0),
    };

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Bat"),
        Cell::from("Bowl"),
        Cell::from("Role"),
        Cell::from("Clubs"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let scroll = state
        .scroll(TabId::Players)
        .min(players.len().saturating_sub(1));

    let rows: Vec<Row> = if players.is_empty() {
        vec![Row::new(vec![Cell::from(""), Cell::from(empty_message(state))])]
    } else {
        players
            .iter()
            .enumerate()
            .skip(scroll)
            .map(|(i, p)| player_row(i + 1, p))
            .collect()
    };

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(2),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(14),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(build_title(state, players.len(), available_count)),
    );
    frame.render_widget(table, area);
}

fn player_row(rank: usize, player: &Player) -> Row<'static> {
    let name = if player.is_duo_opt_in() {
        match &player.duo_name {
            Some(duo) if !duo.trim().is_empty() => format!("{} (duo: {})", player.display_name, duo),
            _ => player.display_name.clone(),
        }
    } else {
        player.display_name.clone()
    };

    Row::new(vec![
        Cell::from(rank.to_string()),
        Cell::from(name),
        Cell::from(format_rating(player.bat_rating)),
        Cell::from(format_rating(player.bowl_rating)),
        Cell::from(player.role_preference.clone().unwrap_or_else(|| "-".into())),
        Cell::from(player.clubs_label().unwrap_or_else(|| "-".into())),
    ])
}

/// Ratings are whole numbers in practice; show one decimal only when needed.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.fract() == 0.0 => format!("{r:.0}"),
        Some(r) => format!("{r:.1}"),
        None => "-".to_string(),
    }
}

fn empty_message(state: &ViewState) -> &'static str {
    if state.snapshot.is_none() {
        "Waiting for the first snapshot..."
    } else if state.filter_text.trim().is_empty() {
        "Every player has been drafted"
    } else {
        "No available player matches the filter"
    }
}

/// Title with filter text and "shown / available" counts.
fn build_title(state: &ViewState, shown: usize, available: usize) -> Line<'static> {
    let mut title = String::from("Available Players");
    if state.filter_mode || !state.filter_text.is_empty() {
        title.push_str(&format!(" /{}", state.filter_text));
        if state.filter_mode {
            title.push('_');
        }
    }
    title.push_str(&format!(" ({shown} / {available})"));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
