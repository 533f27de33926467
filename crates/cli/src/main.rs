//! Rewaqbot CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config directory
//! - `serve`   — Answer lines from stdin (console transport)
//! - `send`    — Handle a single message and print the reply
//! - `status`  — Show roster and ledger health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "rewaqbot",
    about = "Rewaqbot — attendance assistant for the Rewaq workspace",
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

    /// Answer messages from stdin, one line at a time
    Serve,

    /// Handle a single message and print the reply
    Send {
        /// The message text
        message: String,
    },

    /// Show roster and ledger status
    Status,
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
        Commands::Onboard => commands::onboard::run()?,
        Commands::Serve => commands::serve::run().await?,
        Commands::Send { message } => commands::send::run(&message).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
