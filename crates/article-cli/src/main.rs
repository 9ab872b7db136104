//! article-sync CLI
//!
//! Publishes CMS articles to Qiita, at most once per logical change.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::SyncArgs;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Sync {
            dry_run,
            service,
            endpoint,
            api_key,
            qiita_token,
        }) => {
            commands::run_sync(
                &cli.config,
                &cli.state,
                SyncArgs {
                    dry_run,
                    service,
                    endpoint,
                    api_key,
                    qiita_token,
                },
            )
            .await
        }
        Some(Commands::Status) => commands::run_status(&cli.state),
        None => {
            // No command provided - show help hint
            println!("{} article synchronizer", "article-sync".green().bold());
            println!();
            println!(
                "Run {} for available commands.",
                "article-sync --help".cyan()
            );
            Ok(())
        }
    }
}
