//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// article-sync - Publish CMS articles to Qiita, once per change
#[derive(Parser, Debug)]
#[command(name = "article-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = "sync-config.toml")]
    pub config: PathBuf,

    /// Path to the persisted sync state
    #[arg(long, global = true, default_value = "sync-state.json")]
    pub state: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run one sync batch from the content source to the publisher
    Sync {
        /// Compute decisions without publishing or saving state
        #[arg(long)]
        dry_run: bool,

        /// microCMS service identifier
        #[arg(long, env = "MICROCMS_SERVICE")]
        service: String,

        /// microCMS content endpoint
        #[arg(long, env = "MICROCMS_ENDPOINT", default_value = "articles")]
        endpoint: String,

        /// microCMS API key
        #[arg(long, env = "MICROCMS_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Qiita personal access token
        #[arg(long, env = "QIITA_TOKEN", hide_env_values = true)]
        qiita_token: String,
    },

    /// Show the persisted sync state
    Status,
}
