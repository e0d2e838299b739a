//! Ninety CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config directory and default config
//! - `serve`   — Start the HTTP coaching gateway
//! - `ask`     — Run one prompt through the pipeline without HTTP
//! - `doctor`  — Diagnose configuration and provider reachability

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "ninety",
    about = "Ninety — first-90-days coaching API",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the coach a single question from the terminal
    Ask {
        /// The coaching question
        prompt: String,

        /// Path to a JSON profile file to include
        #[arg(long)]
        profile: Option<std::path::PathBuf>,
    },

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Ask { prompt, profile } => commands::ask::run(prompt, profile).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
