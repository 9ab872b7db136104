//! Persisted synchronization state
//!
//! The state store is the durable record of what has been published and
//! when. It is loaded once at batch start, mutated in memory per
//! successful publish, and persisted once at batch end. The JSON field
//! names are the persisted-state contract and must round-trip exactly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Proof that one article was published: the remote identity plus the
/// source timestamp it carried when it was last synced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRecord {
    /// Identity assigned by the publisher
    #[serde(rename = "qiitaId")]
    pub remote_id: String,
    /// Informational; not used by the decision engine
    pub title: String,
    /// Wall-clock time of the successful publish
    #[serde(rename = "lastSyncedAt")]
    pub last_synced_at: DateTime<Utc>,
    /// The item's effective timestamp at decision time
    #[serde(rename = "microCMSUpdatedAt")]
    pub source_updated_at: Option<DateTime<Utc>>,
}

/// Durable mapping from content-item identity to its sync record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateStore {
    #[serde(rename = "lastSyncTime")]
    pub last_sync_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub articles: BTreeMap<String, SyncRecord>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from disk.
    ///
    /// A missing, unreadable, or unparseable file yields the empty
    /// default store; a fresh state means every item is eligible for
    /// `create`, which is the safe direction.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(store) => store,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "state file unparseable, starting fresh");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "state file unreadable, starting fresh");
                Self::default()
            }
        }
    }

    /// Save the store atomically with write-to-temp-then-rename.
    ///
    /// Creates the parent directory if it doesn't exist. A crashed run
    /// never corrupts the previously persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or renamed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Look up the record for an item id
    pub fn record(&self, item_id: &str) -> Option<&SyncRecord> {
        self.articles.get(item_id)
    }

    /// Overwrite the record for an item id.
    ///
    /// This is the only mutation path into the store; records are never
    /// deleted by the sync engine.
    pub fn record_sync(&mut self, item_id: impl Into<String>, record: SyncRecord) {
        self.articles.insert(item_id.into(), record);
    }
}
