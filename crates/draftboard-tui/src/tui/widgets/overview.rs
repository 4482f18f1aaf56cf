// Overview widget: draft status counters and format notes.

use draftboard_core::projection::{draft_summary, DraftSummary};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::ViewState;

const NOTES: &[(&str, &str)] = &[
    (
        "Format",
        "Snake/serpentine draft. 4 players per team (adjustable). Captains pick in order; optional pick clock.",
    ),
    (
        "Eligibility",
        "Open community draft. Captains consider ratings, role preference, notes, and team balance.",
    ),
    (
        "Contact",
        "For issues during the draft, reach the organizer on site or via Zoom chat.",
    ),
];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (title, mut lines) = match &state.snapshot {
        Some(snapshot) => {
            let summary = draft_summary(&snapshot.players, &snapshot.state);
            let title = if snapshot.state.id.is_empty() {
                "Draft Overview".to_string()
            } else {
                format!("Draft Overview: {}", snapshot.state.id)
            };
            (title, stat_lines(&summary))
        }
        None => (
            "Draft Overview".to_string(),
            vec![Line::from(Span::styled(
                "Waiting for the first snapshot...",
                Style::default().fg(Color::Gray),
            ))],
        ),
    };

    for (heading, text) in NOTES {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            *heading,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(*text));
    }

    // Clamp against wrapped rows inside the borders, not source lines.
    let inner_width = area.width.saturating_sub(2);
    let rows = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: true })
        .line_count(inner_width);
    let scroll = state.scroll(TabId::Overview).min(rows.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(paragraph, area);
}

/// One labelled line per headline counter.
pub fn stat_lines(summary: &DraftSummary) -> Vec<Line<'static>> {
    let status = if summary.status.is_empty() {
        "-".to_string()
    } else {
        summary.status.clone()
    };
    let stats = [
        ("Status", status),
        ("Round", summary.round.to_string()),
        ("Teams", summary.teams.to_string()),
        ("Players (avail / total)", summary.availability_label()),
        ("On the clock", summary.on_clock_label().to_string()),
        ("Picks made", summary.picks_made.to_string()),
    ];

    stats
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<24}"), Style::default().fg(Color::Cyan)),
                Span::styled(
                    value,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}
