//! Ratatui widgets for the lexi TUI.

pub mod button_bar;
pub mod command_bar;
pub mod help;
pub mod query_bar;
pub mod result_list;
pub mod status_line;
