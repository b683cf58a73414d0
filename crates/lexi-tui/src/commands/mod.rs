// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use lexi_core::ExportAction;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Leave the application
    Quit,
    // Toggle the help popup
    Help,
    // Change theme
    Theme(String),
    // Press one of the export buttons
    Run(ExportAction),
    // Empty the search box (and search for "")
    Clear,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "save-internal" | "save-external" | "copy-external" => {
                word.parse().map(Command::Run)
            }
            // `:export internal|external|copy`
            "export" => rest
                .parse()
                .map(Command::Run)
                .map_err(|_| "usage: export <internal|external|copy>".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}
