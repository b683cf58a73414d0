//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Every input event is handled to completion before the next one is read:
//! a keystroke in the search box persists the query and re-runs the search
//! synchronously, so the result list always belongs to the latest text.
//!
//! At startup the last persisted query is put back into the search box and
//! its results are shown straight away, looked up without persisting again.
//! The list is therefore not empty on launch when a query was saved.

use crate::{
    commands::Command,
    event::{AppEvent, Keymap},
    theme::Theme,
    widgets::{
        button_bar::{ButtonBar, ButtonBarState},
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        result_list::{ResultList, ResultListState},
        status_line::{StatusLine, StatusState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lexi_core::{config::Config, Dictionary, ExportAction, Notification};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Results,
    Buttons,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub dictionary: Dictionary,
    pub query: QueryBarState,
    pub results: ResultListState,
    pub buttons: ButtonBarState,
    pub status: StatusState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    /// Re-run the search for the current query text, persisting it first.
    fn run_search(&mut self) {
        match self.dictionary.search_results(&self.query.query) {
            Ok(results) => self.results.set(results),
            Err(e) => {
                tracing::error!(query = %self.query.query, kind = %e.kind(), error = %e, "search failed");
                self.results.clear();
                self.status.push(Notification::failure("Search failed"));
            }
        }
    }

    /// Press one of the export buttons.
    fn press(&mut self, action: ExportAction) {
        tracing::debug!(action = %action, "button pressed");
        let note = self.dictionary.run(action);
        self.status.push(note);
    }

    /// Copy the highlighted result into the search box, which searches again.
    fn select_result(&mut self) {
        if let Some(item) = self.results.selected().map(str::to_owned) {
            tracing::debug!(item = %item, "result selected");
            self.query.set_text(item);
            self.run_search();
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the app around an opened dictionary. The last persisted query is
    /// restored into the search box and its results are shown; restoring does
    /// not write the preference again.
    pub fn new(dictionary: Dictionary, config: Config, theme: Theme) -> Self {
        let last = dictionary.last_query();
        let mut results = ResultListState::default();
        match dictionary.lookup(&last) {
            Ok(found) => results.set(found),
            Err(e) => tracing::error!(query = %last, error = %e, "initial search failed"),
        }

        let keymap = Keymap::from_config(&config.keybindings);
        let state = AppState {
            dictionary,
            query: QueryBarState::with_text(last),
            results,
            buttons: ButtonBarState::default(),
            status: StatusState::default(),
            focus: Focus::Query,
            prev_focus: Focus::Query,
            theme,
            config,
            keymap,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            self.state.keymap.to_app_event_insert(raw)
                        } else {
                            self.state.keymap.to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = self.state.keymap.to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Quit => s.quit = true,
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::Query => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::Query => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape => {
                if s.focus == Focus::Query {
                    tracing::debug!("focus: Query -> Results");
                    s.focus = Focus::Results;
                }
            }

            // Tab-cycle focus: Query → Results → Buttons → Query
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Query => Focus::Results,
                    Focus::Results => Focus::Buttons,
                    Focus::Buttons | Focus::Command => Focus::Query,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> Query");
                s.focus = Focus::Query;
            }

            AppEvent::Action(action) => s.press(action),

            AppEvent::Enter => match s.focus {
                Focus::Results => s.select_result(),
                Focus::Buttons => {
                    let action = s.buttons.selected();
                    s.press(action);
                }
                Focus::Query | Focus::Command => {}
            },

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Query | Focus::Command)
}

/// Execute a parsed [`Command`] against the application state.
fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => s.theme = Theme::by_name(&name),
        Command::Run(action) => s.press(action),
        Command::Clear => {
            s.query.set_text("");
            s.run_search();
        }
    }
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Query => {
            if s.query.handle(&event) {
                s.run_search();
            }
        }
        Focus::Results => s.results.handle(&event),
        Focus::Buttons => s.buttons.handle(&event),
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line query bar | results | 3-line buttons | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        QueryBar::new(&state.query, state.focus == Focus::Query, &state.theme),
        vert[0],
    );
    frame.render_widget(
        ResultList::new(&state.results, state.focus == Focus::Results, &state.theme),
        vert[1],
    );
    frame.render_widget(
        ButtonBar::new(&state.buttons, state.focus == Focus::Buttons, &state.theme),
        vert[2],
    );
    let ttl = Duration::from_millis(state.config.ui.toast_ms);
    frame.render_widget(
        StatusLine::new(
            state.status.visible(ttl),
            &state.config.ui.timestamp_format,
            &state.theme,
        ),
        vert[3],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Query {
        let qb = QueryBar::new(&state.query, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[0]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
