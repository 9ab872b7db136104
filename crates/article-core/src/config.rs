//! Sync configuration surface
//!
//! The core consumes configuration as plain resolved values; secrets
//! (API keys) are the caller's problem and never appear here.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::publisher::Visibility;

/// Resolved configuration for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum number of tags per published article
    pub max_tags: usize,
    /// Maximum length of a single tag, in characters
    pub max_tag_length: usize,
    /// Maximum number of items processed in one run
    pub max_items: usize,
    /// Pause between consecutive successful publishes, in milliseconds
    pub pause_ms: u64,
    /// Attribution block appended to every published body
    pub footer: String,
    /// Base URL for the canonical-article backlink; absent disables it
    pub base_url: Option<String>,
    /// Visibility of published articles
    pub visibility: Visibility,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_tags: 5,
            max_tag_length: 30,
            max_items: 10,
            pause_ms: 3000,
            footer: String::new(),
            base_url: None,
            visibility: Visibility::Public,
        }
    }
}

impl SyncConfig {
    /// Parse configuration from TOML content
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML for this shape.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file, or the defaults if the file
    /// does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The inter-publish pause as a duration
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}
