// TUI board: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the last complete snapshot. The poll
// task pushes `UiUpdate` messages over an mpsc channel; the TUI applies
// them to `ViewState` and re-renders at ~30 fps. Projections are
// recomputed from the snapshot on every frame.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use draftboard_core::DraftSnapshot;
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::protocol::{TabId, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the last good snapshot plus view settings.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Last complete snapshot. A failed poll never clears it.
    pub snapshot: Option<DraftSnapshot>,
    /// Where snapshots come from (URL or data directory).
    pub source: String,
    /// When `snapshot` was fetched.
    pub last_updated: Option<DateTime<Local>>,
    /// Most recent poll error; cleared by the next successful poll.
    pub last_error: Option<String>,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Per-tab scroll offsets.
    pub scroll_offset: HashMap<TabId, usize>,
    /// Name filter for the Players tab.
    pub filter_text: String,
    /// Whether keystrokes currently edit the filter.
    pub filter_mode: bool,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: None,
            source: String::new(),
            last_updated: None,
            last_error: None,
            active_tab: TabId::Overview,
            scroll_offset: HashMap::new(),
            filter_text: String::new(),
            filter_mode: false,
            confirm_quit: false,
        }
    }
}

impl ViewState {
    pub fn new(source: impl Into<String>) -> Self {
        ViewState {
            source: source.into(),
            ..ViewState::default()
        }
    }

    /// Scroll offset of `tab`, zero when never scrolled.
    pub fn scroll(&self, tab: TabId) -> usize {
        self.scroll_offset.get(&tab).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot {
            snapshot,
            fetched_at,
        } => {
            state.snapshot = Some(*snapshot);
            state.last_updated = Some(fetched_at);
            state.last_error = None;
        }
        UiUpdate::LoadFailed { error, .. } => {
            state.last_error = Some(error);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete board frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    render_main_panel(frame, &layout, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let area = layout.main_panel;
    match state.active_tab {
        TabId::Overview => widgets::overview::render(frame, area, state),
        TabId::Players => widgets::available::render(frame, area, state),
        TabId::Teams => widgets::teams::render(frame, area, state),
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.filter_mode {
        " Type to filter | Enter:Keep | Esc:Clear"
    } else {
        " q:Quit | 1-3:Tabs | j/k:Scroll | /:Filter | Esc:Clear filter | r:Refresh"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop over poll updates, keyboard input, and
///    render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    source: String,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(source);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => match update {
                Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                None => {
                    info!("Poll task ended; closing viewer");
                    break Ok(());
                }
            },

            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key_event))) => {
                    match input::handle_key(key_event, &mut view_state) {
                        Some(UserCommand::Quit) => {
                            let _ = cmd_tx.send(UserCommand::Quit).await;
                            break Ok(());
                        }
                        Some(UserCommand::Refresh) => {
                            debug!("Refresh requested");
                            // A refresh is already queued if the channel is full.
                            let _ = cmd_tx.try_send(UserCommand::Refresh);
                        }
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Terminal input error: {e}");
                    break Err(e.into());
                }
                None => break Ok(()),
            },

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use draftboard_core::{DraftState, Player};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn snapshot(names: &[&str]) -> DraftSnapshot {
        let players = names
            .iter()
            .enumerate()
            .map(|(i, n)| Player::new(format!("p{i}"), *n))
            .collect();
        DraftSnapshot::new(players, DraftState::default())
    }

    fn screen(state: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render_frame(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.snapshot.is_none());
        assert!(state.last_updated.is_none());
        assert!(state.last_error.is_none());
        assert_eq!(state.active_tab, TabId::Overview);
        assert!(state.scroll_offset.is_empty());
        assert!(!state.filter_mode);
        assert!(state.filter_text.is_empty());
        assert!(!state.confirm_quit);
    }

    #[test]
    fn snapshot_update_replaces_data_and_clears_error() {
        let mut state = ViewState::new("data");
        state.last_error = Some("old".into());
        let at = Local::now();
        apply_ui_update(
            &mut state,
            UiUpdate::Snapshot {
                snapshot: Box::new(snapshot(&["Alice"])),
                fetched_at: at,
            },
        );
        assert_eq!(state.snapshot.as_ref().unwrap().players.len(), 1);
        assert_eq!(state.last_updated, Some(at));
        assert!(state.last_error.is_none());
    }

    #[test]
    fn failed_load_keeps_last_good_snapshot() {
        let mut state = ViewState::new("data");
        let at = Local::now();
        apply_ui_update(
            &mut state,
            UiUpdate::Snapshot {
                snapshot: Box::new(snapshot(&["Alice", "Bob"])),
                fetched_at: at,
            },
        );
        apply_ui_update(
            &mut state,
            UiUpdate::LoadFailed {
                error: "draft data unavailable".into(),
                failed_at: Local::now(),
            },
        );
        assert_eq!(state.snapshot.as_ref().unwrap().players.len(), 2);
        assert_eq!(state.last_updated, Some(at));
        assert_eq!(state.last_error.as_deref(), Some("draft data unavailable"));
    }

    #[test]
    fn renders_every_tab() {
        let mut state = ViewState::new("data");
        state.snapshot = Some(snapshot(&["Alice", "Bob"]));
        for tab in [TabId::Overview, TabId::Players, TabId::Teams] {
            state.active_tab = tab;
            let text = screen(&state);
            assert!(text.contains("1:Overview"), "tab bar missing on {tab:?}");
        }
    }

    #[test]
    fn quit_dialog_drawn_on_top() {
        let mut state = ViewState::new("data");
        state.confirm_quit = true;
        assert!(screen(&state).contains("Quit?"));
    }

    #[test]
    fn help_bar_switches_in_filter_mode() {
        let mut state = ViewState::new("data");
        assert!(screen(&state).contains("r:Refresh"));
        state.filter_mode = true;
        assert!(screen(&state).contains("Enter:Keep"));
    }
}
