// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the poll
// task, or into local ViewState mutations (tab switching, scroll, filter).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::{TabId, UserCommand};

/// Lines moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should reach the poll
/// task (Refresh, Quit), `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both press and release; act on press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.filter_mode {
        handle_filter_mode(key_event, view_state);
        return None;
    }

    match key_event.code {
        KeyCode::Char('1') => view_state.active_tab = TabId::Overview,
        KeyCode::Char('2') => view_state.active_tab = TabId::Players,
        KeyCode::Char('3') => view_state.active_tab = TabId::Teams,

        KeyCode::Up | KeyCode::Char('k') => scroll_up(view_state, 1),
        KeyCode::Down | KeyCode::Char('j') => scroll_down(view_state, 1),
        KeyCode::PageUp => scroll_up(view_state, PAGE_SIZE),
        KeyCode::PageDown => scroll_down(view_state, PAGE_SIZE),
        KeyCode::Home => {
            view_state.scroll_offset.remove(&view_state.active_tab);
        }

        // The filter only applies to the Players tab; jump there.
        KeyCode::Char('/') => {
            view_state.active_tab = TabId::Players;
            view_state.filter_mode = true;
        }
        KeyCode::Esc => clear_filter(view_state),

        KeyCode::Char('r') => return Some(UserCommand::Refresh),
        KeyCode::Char('q') => view_state.confirm_quit = true,

        _ => {}
    }
    None
}

/// `y` or `q` confirms; `n` or Esc cancels; everything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y' | 'Y' | 'q' | 'Q') => Some(UserCommand::Quit),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Printable characters edit the filter; Enter keeps it, Esc clears it.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            clear_filter(view_state);
        }
        KeyCode::Enter => view_state.filter_mode = false,
        KeyCode::Backspace => {
            view_state.filter_text.pop();
            reset_players_scroll(view_state);
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
            reset_players_scroll(view_state);
        }
        _ => {}
    }
}

fn clear_filter(view_state: &mut ViewState) {
    view_state.filter_text.clear();
    reset_players_scroll(view_state);
}

// The filtered list changes length; keep the first match visible.
fn reset_players_scroll(view_state: &mut ViewState) {
    view_state.scroll_offset.remove(&TabId::Players);
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_tab)
        .or_insert(0);
    *offset = offset.saturating_sub(lines);
}

// Widgets clamp the offset to their content when rendering.
fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_tab)
        .or_insert(0);
    *offset = offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press_all(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            handle_key(key(KeyCode::Char(c)), state);
        }
    }

    // -- Tabs --

    #[test]
    fn number_keys_switch_tabs() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('2')), &mut state).is_none());
        assert_eq!(state.active_tab, TabId::Players);
        handle_key(key(KeyCode::Char('3')), &mut state);
        assert_eq!(state.active_tab, TabId::Teams);
        handle_key(key(KeyCode::Char('1')), &mut state);
        assert_eq!(state.active_tab, TabId::Overview);
    }

    // -- Scroll --

    #[test]
    fn j_and_k_scroll_active_tab() {
        let mut state = ViewState::default();
        state.active_tab = TabId::Teams;
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.scroll(TabId::Teams), 1);
        assert_eq!(state.scroll(TabId::Players), 0);
    }

    #[test]
    fn scroll_up_does_not_underflow() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll(TabId::Overview), 0);
    }

    #[test]
    fn page_keys_scroll_by_page() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::PageDown), &mut state);
        handle_key(key(KeyCode::PageDown), &mut state);
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.scroll(TabId::Overview), PAGE_SIZE);
        handle_key(key(KeyCode::Home), &mut state);
        assert_eq!(state.scroll(TabId::Overview), 0);
    }

    // -- Filter --

    #[test]
    fn slash_opens_filter_on_players_tab() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('/')), &mut state);
        assert!(state.filter_mode);
        assert_eq!(state.active_tab, TabId::Players);
    }

    #[test]
    fn filter_mode_captures_keys_that_are_normally_commands() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('/')), &mut state);
        press_all(&mut state, "qr1j");
        assert_eq!(state.filter_text, "qr1j");
        assert!(!state.confirm_quit);
        assert_eq!(state.active_tab, TabId::Players);
        assert_eq!(state.scroll(TabId::Players), 0);
    }

    #[test]
    fn filter_mode_backspace() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('/')), &mut state);
        press_all(&mut state, "ab");
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.filter_text, "a");
        handle_key(key(KeyCode::Backspace), &mut state);
        handle_key(key(KeyCode::Backspace), &mut state);
        assert!(state.filter_text.is_empty());
    }

    #[test]
    fn enter_keeps_filter_and_esc_clears_it() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('/')), &mut state);
        press_all(&mut state, "ali");
        handle_key(key(KeyCode::Enter), &mut state);
        assert!(!state.filter_mode);
        assert_eq!(state.filter_text, "ali");

        // Esc in normal mode clears the kept filter.
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.filter_text.is_empty());
    }

    #[test]
    fn esc_in_filter_mode_exits_and_clears() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('/')), &mut state);
        press_all(&mut state, "bo");
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(!state.filter_mode);
        assert!(state.filter_text.is_empty());
    }

    #[test]
    fn typing_resets_players_scroll() {
        let mut state = ViewState::default();
        state.active_tab = TabId::Players;
        handle_key(key(KeyCode::PageDown), &mut state);
        handle_key(key(KeyCode::Char('/')), &mut state);
        press_all(&mut state, "a");
        assert_eq!(state.scroll(TabId::Players), 0);
    }

    // -- Commands --

    #[test]
    fn r_requests_refresh() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::Refresh)
        );
    }

    #[test]
    fn q_then_y_quits() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert!(state.confirm_quit);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn double_q_quits() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('q')), &mut state);
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn n_or_esc_cancels_quit() {
        for cancel in [KeyCode::Char('n'), KeyCode::Esc] {
            let mut state = ViewState::default();
            handle_key(key(KeyCode::Char('q')), &mut state);
            assert!(handle_key(key(cancel), &mut state).is_none());
            assert!(!state.confirm_quit);
        }
    }

    #[test]
    fn confirm_quit_blocks_other_keys() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Char('q')), &mut state);
        assert!(handle_key(key(KeyCode::Char('2')), &mut state).is_none());
        assert!(handle_key(key(KeyCode::Char('r')), &mut state).is_none());
        assert_eq!(state.active_tab, TabId::Overview);
        assert!(state.confirm_quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );

        state.filter_mode = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = key(KeyCode::Char('2'));
        event.kind = KeyEventKind::Release;
        assert!(handle_key(event, &mut state).is_none());
        assert_eq!(state.active_tab, TabId::Overview);
    }

    #[test]
    fn unknown_key_is_noop() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::F(5)), &mut state).is_none());
        assert_eq!(state.active_tab, TabId::Overview);
    }
}
