// Messages between the poll task and the TUI.

use chrono::{DateTime, Local};
use draftboard_core::DraftSnapshot;

/// Poll results pushed to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A complete snapshot replaced the previous one.
    Snapshot {
        snapshot: Box<DraftSnapshot>,
        fetched_at: DateTime<Local>,
    },
    /// A poll failed. The previous snapshot stays on screen.
    LoadFailed {
        error: String,
        failed_at: DateTime<Local>,
    },
}

/// Commands from the TUI to the poll task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Poll now instead of waiting for the next tick.
    Refresh,
    Quit,
}

/// Main panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Overview,
    Players,
    Teams,
}
