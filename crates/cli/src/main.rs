//! AdmitBot CLI — the main entry point.
//!
//! Commands:
//! - `chat`     — Interactive chat or single-message mode
//! - `upload`   — Simulate a document upload
//! - `status`   — Show configuration and knowledge base summary
//! - `onboard`  — Write default config and knowledge base

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "admitbot",
    about = "AdmitBot — university admissions FAQ assistant",
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
    /// Chat with the admissions assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// User id the session is kept under
        #[arg(short, long, default_value = commands::DEFAULT_USER)]
        user: String,

        /// Print the reply as a `{"response", "status"}` JSON envelope
        #[arg(long)]
        json: bool,
    },

    /// Simulate uploading a document
    Upload {
        /// Name (or path) of the file to upload
        file_name: String,

        /// User id the document is recorded under
        #[arg(short, long, default_value = commands::DEFAULT_USER)]
        user: String,
    },

    /// Show configuration and knowledge base status
    Status,

    /// Write default configuration and knowledge base
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for replies
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat {
            message,
            user,
            json,
        } => commands::chat::run(message, user, json).await?,
        Commands::Upload { file_name, user } => commands::upload::run(file_name, user).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Onboard => commands::onboard::run().await?,
    }

    Ok(())
}
