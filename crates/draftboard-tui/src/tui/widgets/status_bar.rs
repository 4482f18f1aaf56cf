// Status bar widget: tab bar, data source, last refresh, last error.

use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::TabId;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Row 1: `[1:Overview] [2:Players] [3:Teams]`
/// Row 2: source, refresh time, and the last error when there is one.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let tabs = Line::from(tab_spans(state.active_tab));

    let mut info = vec![
        Span::styled(
            format!(" {} ", source_label(&state.source)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("Updated {}", refresh_label(state.last_updated)),
            Style::default().fg(Color::White),
        ),
    ];
    if let Some(error) = &state.last_error {
        info.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        info.push(Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(vec![tabs, Line::from(info)])
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Tab indicator spans with the active tab highlighted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let tabs = [
        (TabId::Overview, "1:Overview"),
        (TabId::Players, "2:Players"),
        (TabId::Teams, "3:Teams"),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (tab_id, label) in tabs {
        let style = if tab_id == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{label}]"), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Local wall-clock time of the last refresh, or "never".
pub fn refresh_label(at: Option<DateTime<Local>>) -> String {
    match at {
        Some(at) => at.format("%H:%M:%S").to_string(),
        None => "never".to_string(),
    }
}

fn source_label(source: &str) -> &str {
    if source.is_empty() {
        "(no source)"
    } else {
        source
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
