// Terminal viewer for the draft board.
//
// The binary wires a `DraftSource` (data files or the HTTP retrieval
// endpoint) into the poll task, which feeds the TUI over channels.

pub mod poll;
pub mod protocol;
pub mod remote;
pub mod tui;
