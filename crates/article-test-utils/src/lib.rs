//! Shared test builders and in-memory fakes for article-sync tests.

pub mod fakes;
pub mod item;

pub use fakes::{FailingSource, FakeSource, RecordingPublisher};
pub use item::ItemBuilder;
