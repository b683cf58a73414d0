//! lexi TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

/// Start the TUI on an opened dictionary session.
pub fn run(config: lexi_core::config::Config, dictionary: lexi_core::Dictionary) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    App::new(dictionary, config, theme).run()
}
