// Teams widget: every team's roster in pick order.

use draftboard_core::projection::{team_rosters, TeamRoster};
use draftboard_core::{DraftState, Pick, Player};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::available::format_rating;
use crate::protocol::TabId;
use crate::tui::ViewState;

/// Render all rosters as one scrollable list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (title, lines) = match &state.snapshot {
        Some(snapshot) => {
            let rosters = team_rosters(&snapshot.players, &snapshot.state);
            let lines: Vec<Line> = rosters.iter().flat_map(roster_lines).collect();
            (header(&snapshot.state), lines)
        }
        None => (
            "Team Rosters".to_string(),
            vec![Line::from(Span::styled(
                "Waiting for the first snapshot...",
                Style::default().fg(Color::Gray),
            ))],
        ),
    };

    let lines = if lines.is_empty() {
        vec![Line::raw("No teams in this draft")]
    } else {
        lines
    };

    let scroll = state.scroll(TabId::Teams).min(lines.len().saturating_sub(1));
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

/// "Team Rosters | Round N | On the clock: X"
pub fn header(state: &DraftState) -> String {
    let on_clock = state
        .on_clock_team()
        .map(|t| t.name.as_str())
        .or(state.on_clock_team_id.as_deref())
        .unwrap_or("-");
    format!(
        "Team Rosters | Round {} | On the clock: {}",
        state.round, on_clock
    )
}

/// Heading, one line per player, and a blank separator.
pub fn roster_lines(roster: &TeamRoster<'_>) -> Vec<Line<'static>> {
    let count = roster.players.len();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            roster.team.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {count} player{}", if count == 1 { "" } else { "s" }),
            Style::default().fg(Color::Gray),
        ),
    ])];

    if roster.players.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No picks yet",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.extend(
            roster
                .entries()
                .enumerate()
                .map(|(i, (player, pick))| player_line(i + 1, player, pick)),
        );
    }
    lines.push(Line::raw(""));
    lines
}

fn player_line(n: usize, player: &Player, pick: &Pick) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("  {n}. ")),
        Span::styled(
            player.display_name.clone(),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "  Bat {} | Bowl {}",
                format_rating(player.bat_rating),
                format_rating(player.bowl_rating)
            ),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if let Some(duo) = player.duo_name.as_deref().filter(|d| !d.trim().is_empty()) {
        spans.push(Span::raw(format!("  Duo: {duo}")));
    }
    if let Some(id) = player.cric_clubs_id.as_deref().filter(|id| !id.trim().is_empty()) {
        spans.push(Span::raw(format!("  CricClubs: {id}")));
    }
    // Shown as written, in the organizer's offset.
    if let Some(at) = pick.timestamp() {
        spans.push(Span::styled(
            format!("  picked {}", at.format("%H:%M")),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(url) = player.photo_view_url() {
        spans.push(Span::styled(
            format!("  Photo: {url}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftboard_core::{DraftSnapshot, Team};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn board() -> ViewState {
        let mut alice = Player::new("p1", "Alice");
        alice.bat_rating = Some(4.0);
        alice.duo_name = Some("Bob".into());
        alice.cric_clubs_id = Some("88123".into());

        let draft = DraftState {
            round: 2,
            on_clock_team_id: Some("t2".into()),
            teams: vec![Team::new("t1", "Chomp Squad"), Team::new("t2", "Swamp Kings")],
            picks: vec![Pick::new(2, "t1", "bob"), Pick::new(1, "t1", "p1")],
            ..DraftState::default()
        };
        let mut state = ViewState::new("data");
        state.snapshot = Some(DraftSnapshot::new(
            vec![alice, Player::new("p2", "Bob")],
            draft,
        ));
        state.active_tab = TabId::Teams;
        state
    }

    fn screen(state: &ViewState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(90, 14)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..14u16)
            .map(|y| (0..90u16).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn header_names_on_clock_team() {
        let state = board();
        let draft = &state.snapshot.as_ref().unwrap().state;
        assert_eq!(header(draft), "Team Rosters | Round 2 | On the clock: Swamp Kings");

        let unknown = DraftState {
            on_clock_team_id: Some("t9".into()),
            ..DraftState::default()
        };
        assert!(header(&unknown).ends_with("On the clock: t9"));
        assert!(header(&DraftState::default()).ends_with("On the clock: -"));
    }

    #[test]
    fn rosters_in_pick_order_with_details() {
        let rows = screen(&board());
        let text = rows.join("\n");
        assert!(text.contains("Chomp Squad  2 players"));

        let alice_row = rows.iter().position(|r| r.contains("1. Alice")).unwrap();
        let bob_row = rows.iter().position(|r| r.contains("2. Bob")).unwrap();
        assert!(alice_row < bob_row);
        assert!(rows[alice_row].contains("Bat 4 | Bowl -"));
        assert!(rows[alice_row].contains("Duo: Bob"));
        assert!(rows[alice_row].contains("CricClubs: 88123"));
    }

    #[test]
    fn roster_line_shows_pick_time_and_photo() {
        let mut player = Player::new("p1", "Alice");
        player.photo_url = Some("https://drive.google.com/open?id=AbC_1".into());
        let mut pick = Pick::new(1, "t1", "p1");
        pick.ts = Some("2025-08-30T18:04:05-04:00".into());

        let text = line_text(&player_line(1, &player, &pick));
        assert!(text.contains("picked 18:04"));
        assert!(text.contains("Photo: https://drive.google.com/uc?export=view&id=AbC_1"));

        let bare = line_text(&player_line(1, &Player::new("p2", "Bob"), &Pick::new(2, "t1", "p2")));
        assert!(!bare.contains("picked"));
        assert!(!bare.contains("Photo"));
    }

    #[test]
    fn empty_team_says_no_picks_yet() {
        let text = screen(&board()).join("\n");
        assert!(text.contains("Swamp Kings  0 players"));
        assert!(text.contains("No picks yet"));
    }

    #[test]
    fn roster_lines_singular_count() {
        let team = Team::new("t1", "Chomp");
        let player = Player::new("p1", "Alice");
        let pick = Pick::new(1, "t1", "p1");
        let roster = TeamRoster {
            team: &team,
            players: vec![&player],
            picks: vec![&pick],
        };
        let lines = roster_lines(&roster);
        assert_eq!(line_text(&lines[0]), "Chomp  1 player");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn scroll_moves_content_up() {
        let mut state = board();
        state.scroll_offset.insert(TabId::Teams, 4);
        let text = screen(&state).join("\n");
        assert!(!text.contains("Chomp Squad"));
        assert!(text.contains("Swamp Kings"));
    }

    #[test]
    fn render_without_snapshot() {
        let text = screen(&ViewState::default()).join("\n");
        assert!(text.contains("Waiting for the first snapshot"));
    }
}
