// TUI widget modules for each board panel.

pub mod available;
pub mod overview;
pub mod quit_confirm;
pub mod status_bar;
pub mod teams;
