//! Theme Sections CLI - database migrations and theme tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ts-cli migrate
//!
//! # List the first page of themes on the configured store
//! ts-cli themes
//!
//! # Add the section to the active theme (same as the app's button)
//! ts-cli add-section
//! ```
//!
//! `themes` and `add-section` use the access token stored by the OAuth
//! install, so the app must have been installed once.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ts-cli")]
#[command(author, version, about = "Theme Sections CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// List the first page of themes
    Themes,
    /// Add the simple template section to the active theme
    AddSection,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Themes => commands::sections::list_themes().await,
        Commands::AddSection => commands::sections::add_section().await,
    }
}
