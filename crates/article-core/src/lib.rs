//! Core synchronization layer for article-sync
//!
//! Owns the content-item model, the persisted sync state, the
//! create/update/skip decision engine, and the bounded batch runner
//! that ties them to the external collaborators.

pub mod config;
pub mod decision;
pub mod error;
pub mod item;
pub mod publisher;
pub mod runner;
pub mod source;
pub mod state;

pub use config::SyncConfig;
pub use decision::{Decision, decide};
pub use error::{Error, Result};
pub use item::{Categories, ContentItem};
pub use publisher::{PublishRequest, Publisher, Visibility};
pub use runner::{RunOptions, RunReport, SyncRunner};
pub use source::ContentSource;
pub use state::{StateStore, SyncRecord};
