use clap::{Parser, Subcommand};
use lexi_core::{config::Config, Dictionary, ExportAction};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexi", about = "Lexi: terminal dictionary lookup and export")]
struct Cli {
    /// Write debug logs to lexi-debug.log in the temp dir (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Override `[storage] data_dir` from the config file.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Override `[storage] external_root` from the config file.
    #[arg(long, value_name = "DIR")]
    external_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Look up a word, falling back to every word that contains QUERY.
    Search { query: String },
    /// Print the last recorded query.
    Last,
    /// Run one export action: internal, external or copy.
    Export { action: ExportAction },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("lexi-debug.log");
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "lexi debug log started");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(dir) = cli.external_dir {
        config.storage.external_root = dir.to_string_lossy().into_owned();
    }

    let mut dictionary = Dictionary::open(&config.storage)?;

    match cli.command {
        None => lexi_tui::run(config, dictionary),
        Some(Cmd::Search { query }) => {
            for line in dictionary.search(&query)? {
                println!("{line}");
            }
            Ok(())
        }
        Some(Cmd::Last) => {
            println!("{}", dictionary.last_query());
            Ok(())
        }
        Some(Cmd::Export { action }) => {
            let note = dictionary.run(action);
            if note.is_success() {
                println!("{}", note.message);
                Ok(())
            } else {
                anyhow::bail!("{}", note.message)
            }
        }
    }
}
