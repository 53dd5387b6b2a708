use anyhow::{Context, Result};
use calcpad::keys::{LineCommand, parse_line};
use calcpad::{Config, Controller, InputEvent, JsonFileStore, MemoryStore, TerminalRenderer};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Keypad calculator for the terminal.
///
/// Type keys and press Enter: `12+8=` evaluates, an empty line commits,
/// `c` clears. Commands: `:load N`, `:rm N`, `:wipe`, `:back`, `:quit`.
#[derive(Parser, Debug)]
#[command(name = "calcpad", version, about)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// History file, overriding the config
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long, conflicts_with = "history_file")]
    no_persist: bool,

    /// Log filter, e.g. "debug" or "calcpad=trace"
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let config_path = args.config.clone().or_else(Config::default_path);
    let mut config = Config::load_or_default(config_path.as_deref())?;
    if let Some(path) = args.history_file {
        config.history_path = Some(path);
    }

    let (tx, rx) = mpsc::channel(64);
    spawn_stdin_reader(tx);

    let renderer = TerminalRenderer::stdout();

    if args.no_persist {
        info!("history kept in memory only");
        Controller::new(MemoryStore::new(), renderer, &config)
            .run(rx)
            .await;
    } else {
        let path = config
            .history_path
            .clone()
            .or_else(JsonFileStore::default_path)
            .context("No data directory found; pass --history-file or --no-persist")?;
        info!(path = %path.display(), "using history file");
        Controller::new(JsonFileStore::new(path), renderer, &config)
            .run(rx)
            .await;
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("calcpad=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read stdin on its own thread; the channel closes on EOF or `:quit`.
fn spawn_stdin_reader(tx: mpsc::Sender<InputEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(error = %err, "failed to read stdin");
                    return;
                }
            };

            match parse_line(&line) {
                Ok(LineCommand::Quit) => return,
                Ok(LineCommand::Events(events)) => {
                    for event in events {
                        if tx.blocking_send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => warn!(error = %err, "ignoring input"),
            }
        }
    });
}
