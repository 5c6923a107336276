//! Groove Console - play with playlists from a terminal

use anyhow::Context;
use clap::Parser;
use groove_console::{session::describe_error, Command, ConsoleConfig, Outcome, Session};
use groove_core::ConfirmPrompt;
use groove_storage::FileStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groove-console")]
#[command(about = "Groove Player playlists in your terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GROOVE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for saved playlists (overrides the configuration)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    yes: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "groove_console=info,groove_playback=info,groove_storage=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config =
        ConsoleConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    tracing::info!("Playlists stored in {}", config.data_dir.display());

    let mut session = Session::new(&config, FileStore::new(&config.data_dir));
    for notice in session.pump() {
        println!("! {}", notice);
    }
    println!("Groove Console - type 'help' for commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let auto_yes = cli.yes;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        // Confirmations read their answer from the same input stream
        let mut confirm = |prompt: &ConfirmPrompt| {
            if auto_yes {
                return true;
            }
            print!("{} [y/N] ", prompt.message());
            if io::stdout().flush().is_err() {
                return false;
            }
            matches!(
                lines.next(),
                Some(Ok(answer)) if answer.trim().eq_ignore_ascii_case("y")
                    || answer.trim().eq_ignore_ascii_case("yes")
            )
        };

        match session.execute(command, &mut confirm) {
            Ok(Outcome::Continue(output)) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Ok(Outcome::Quit) => break,
            Err(e) => {
                if let Some(message) = describe_error(&e) {
                    println!("{}", message);
                }
            }
        }
    }

    Ok(())
}
