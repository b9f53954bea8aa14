use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pawmatch")]
#[command(about = "PawMatch - elige el nombre de tu mascota en grupo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (host or join)
    Play {
        /// Gemini model to use instead of the configured one
        #[arg(long)]
        model: Option<String>,
        /// Path to secret.json (defaults to ~/.config/pawmatch/secret.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Decode a session or vote code and print its contents
    Inspect {
        token: String,
    },
    /// Compute matches offline from a session code and vote codes
    Tally {
        /// The host's session code
        #[arg(long)]
        session: String,
        /// This device's vote code
        #[arg(long)]
        mine: Option<String>,
        /// Friends' vote codes
        #[arg(long = "votes", num_args = 1..)]
        votes: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { model, config } => commands::play::run(model, config).await?,
        Commands::Inspect { token } => commands::inspect::run(&token)?,
        Commands::Tally {
            session,
            mine,
            votes,
        } => commands::tally::run(&session, mine.as_deref(), &votes)?,
    }

    Ok(())
}
