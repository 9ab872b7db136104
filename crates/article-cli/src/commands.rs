//! Command implementations

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use article_client::{MicroCmsClient, QiitaClient};
use article_core::{RunOptions, StateStore, SyncConfig, SyncRunner};

use crate::error::{CliError, Result};

/// Credentials and endpoints resolved from flags or the environment
pub struct SyncArgs {
    pub dry_run: bool,
    pub service: String,
    pub endpoint: String,
    pub api_key: String,
    pub qiita_token: String,
}

/// Run one sync batch.
///
/// Completes with an error when any item failed, so the process exits
/// non-zero while the successful subset's state is already persisted.
pub async fn run_sync(config_path: &Path, state_path: &Path, args: SyncArgs) -> Result<()> {
    let config = SyncConfig::load(config_path)?;

    let source = MicroCmsClient::new(&args.service, &args.endpoint, &args.api_key)?;
    let publisher = QiitaClient::new(&args.qiita_token)?;

    let runner = SyncRunner::new(
        Arc::new(source),
        Arc::new(publisher),
        config,
        state_path,
    );
    let report = runner
        .run_with_options(RunOptions {
            dry_run: args.dry_run,
        })
        .await?;

    for action in &report.actions {
        println!("  {action}");
    }

    println!(
        "{} {} created, {} updated, {} skipped",
        "done:".green().bold(),
        report.created,
        report.updated,
        report.skipped
    );

    if !report.success() {
        for error in &report.errors {
            eprintln!("  {} {error}", "failed:".red());
        }
        return Err(CliError::user(format!(
            "{} item(s) failed to publish",
            report.errors.len()
        )));
    }

    Ok(())
}

/// Print the persisted sync state without contacting any collaborator.
pub fn run_status(state_path: &Path) -> Result<()> {
    let store = StateStore::load(state_path);

    match store.last_sync_time {
        Some(at) => println!("Last sync: {at}"),
        None => println!("Last sync: never"),
    }

    if store.articles.is_empty() {
        println!("No articles synced yet.");
        return Ok(());
    }

    println!("{} article(s):", store.articles.len());
    for (id, record) in &store.articles {
        println!(
            "  {} -> {} ({}, synced {})",
            id.cyan(),
            record.remote_id,
            record.title,
            record.last_synced_at
        );
    }

    Ok(())
}
