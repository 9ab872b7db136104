//! Batch sync runner
//!
//! One run is a bounded, sequential loop over the content source's
//! items: decide, transduce, publish, record. Item failures are counted
//! and skipped over; only a failed fetch or a failed state save aborts
//! the run. The state store is loaded once at run start and persisted
//! once at run end.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use article_markup::{TransduceOptions, Transducer, normalize_tags};

use crate::Result;
use crate::config::SyncConfig;
use crate::decision::{Decision, decide};
use crate::item::ContentItem;
use crate::publisher::{PublishRequest, Publisher};
use crate::source::ContentSource;
use crate::state::{StateStore, SyncRecord};

/// Report from one batch run
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    /// Items published for the first time
    pub created: usize,
    /// Items republished with newer content
    pub updated: usize,
    /// Items left alone
    pub skipped: usize,
    /// Human-readable actions taken during the run
    pub actions: Vec<String>,
    /// Per-item errors; non-empty means a non-zero completion status
    pub errors: Vec<String>,
}

impl RunReport {
    /// Whether the run completed without per-item errors
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    fn with_action(mut self, action: String) -> Self {
        self.actions.push(action);
        self
    }
}

/// Options for a batch run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// If true, compute decisions and report `[dry-run] Would ...`
    /// actions without publishing or touching the state store
    pub dry_run: bool,
}

/// Coordinates one bounded sync run between the content source, the
/// transduction engine, the decision engine, and the publisher.
pub struct SyncRunner {
    source: Arc<dyn ContentSource>,
    publisher: Arc<dyn Publisher>,
    transducer: Transducer,
    config: SyncConfig,
    state_path: PathBuf,
}

impl SyncRunner {
    pub fn new(
        source: Arc<dyn ContentSource>,
        publisher: Arc<dyn Publisher>,
        config: SyncConfig,
        state_path: impl Into<PathBuf>,
    ) -> Self {
        let transducer = Transducer::new(TransduceOptions {
            footer: config.footer.clone(),
            ..TransduceOptions::default()
        });
        Self {
            source,
            publisher,
            transducer,
            config,
            state_path: state_path.into(),
        }
    }

    /// Run one batch with default options
    pub async fn run(&self) -> Result<RunReport> {
        self.run_with_options(RunOptions::default()).await
    }

    /// Run one batch.
    ///
    /// # Errors
    ///
    /// Returns an error only for batch-fatal conditions: the content
    /// list cannot be fetched (the state store is left untouched), or
    /// the state store cannot be persisted at run end.
    pub async fn run_with_options(&self, options: RunOptions) -> Result<RunReport> {
        let mut store = StateStore::load(&self.state_path);

        let mut items = self.source.fetch_items(self.config.max_items).await?;
        items.truncate(self.config.max_items);
        tracing::info!(count = items.len(), dry_run = options.dry_run, "starting sync run");

        let mut report = RunReport::default();

        for (position, item) in items.iter().enumerate() {
            let decision = decide(item, &store);

            if decision == Decision::Skip {
                tracing::debug!(id = %item.id, "unchanged, skipping");
                report.skipped += 1;
                continue;
            }

            let request = self.build_request(item);

            if options.dry_run {
                let verb = match &decision {
                    Decision::Create => {
                        report.created += 1;
                        "create"
                    }
                    Decision::Update { .. } => {
                        report.updated += 1;
                        "update"
                    }
                    Decision::Skip => unreachable!(),
                };
                report = report.with_action(format!("[dry-run] Would {verb} '{}'", item.title));
                continue;
            }

            let published = match &decision {
                Decision::Create => self.publisher.create(&request).await,
                Decision::Update { remote_id } => {
                    self.publisher.update(remote_id, &request).await
                }
                Decision::Skip => unreachable!(),
            };

            match published {
                Ok(remote_id) => {
                    store.record_sync(
                        item.id.clone(),
                        SyncRecord {
                            remote_id: remote_id.clone(),
                            title: item.title.clone(),
                            last_synced_at: Utc::now(),
                            source_updated_at: item.effective_timestamp(),
                        },
                    );
                    let action = match decision {
                        Decision::Create => {
                            report.created += 1;
                            format!("Created '{}' as {remote_id}", item.title)
                        }
                        _ => {
                            report.updated += 1;
                            format!("Updated '{}' ({remote_id})", item.title)
                        }
                    };
                    report = report.with_action(action);

                    // Respect the publisher's rate limit between
                    // consecutive publishes
                    if position + 1 < items.len() {
                        tokio::time::sleep(self.config.pause()).await;
                    }
                }
                Err(e) => {
                    tracing::error!(id = %item.id, error = %e, "publish failed");
                    report.errors.push(format!("{}: {e}", item.id));
                    // No record is written, so the item is retried on
                    // the next run
                }
            }
        }

        if !options.dry_run {
            store.last_sync_time = Some(Utc::now());
            store.save(&self.state_path)?;
        }

        tracing::info!(
            created = report.created,
            updated = report.updated,
            skipped = report.skipped,
            errors = report.errors.len(),
            "sync run finished"
        );
        Ok(report)
    }

    /// Assemble the outgoing publish payload for one item.
    ///
    /// A transduction failure falls back to the original raw markup for
    /// that item; it is logged, never fatal.
    fn build_request(&self, item: &ContentItem) -> PublishRequest {
        let mut body = match self
            .transducer
            .transduce_document(&item.content, item.excerpt.as_deref())
        {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(id = %item.id, error = %e, "transduction failed, publishing raw markup");
                item.content.clone()
            }
        };

        if let Some(base) = &self.config.base_url {
            let base = base.trim_end_matches('/');
            body.push_str(&format!(
                "\n\n[Read the original article]({base}/{})",
                item.id
            ));
        }

        let tags = normalize_tags(
            item.categories.as_slice(),
            &item.tags,
            self.config.max_tags,
            self.config.max_tag_length,
        );

        PublishRequest {
            title: item.title.clone(),
            body,
            tags,
            visibility: self.config.visibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Categories;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn ts(s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, s).unwrap()
    }

    fn item(id: &str, updated_s: u32) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: format!("Title {id}"),
            content: format!("<p>body of {id}</p>"),
            excerpt: None,
            categories: Categories::default(),
            tags: "rust".to_string(),
            published_at: Some(ts(1)),
            updated_at: Some(ts(updated_s)),
            revised_at: None,
        }
    }

    struct FakeSource(Vec<ContentItem>);

    #[async_trait]
    impl ContentSource for FakeSource {
        async fn fetch_items(&self, limit: usize) -> Result<Vec<ContentItem>> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ContentSource for FailingSource {
        async fn fetch_items(&self, _limit: usize) -> Result<Vec<ContentItem>> {
            Err(crate::Error::source_error("connection refused"))
        }
    }

    #[derive(Default)]
    struct FakePublisher {
        created: Mutex<Vec<PublishRequest>>,
        updated: Mutex<Vec<(String, PublishRequest)>>,
        fail_titles: HashSet<String>,
    }

    #[async_trait]
    impl Publisher for FakePublisher {
        async fn create(&self, request: &PublishRequest) -> Result<String> {
            if self.fail_titles.contains(&request.title) {
                return Err(crate::Error::publish(&request.title, "boom"));
            }
            let mut created = self.created.lock().unwrap();
            created.push(request.clone());
            Ok(format!("q-{}", created.len()))
        }

        async fn update(&self, target_id: &str, request: &PublishRequest) -> Result<String> {
            if self.fail_titles.contains(&request.title) {
                return Err(crate::Error::publish(&request.title, "boom"));
            }
            self.updated
                .lock()
                .unwrap()
                .push((target_id.to_string(), request.clone()));
            Ok(target_id.to_string())
        }
    }

    fn config() -> SyncConfig {
        SyncConfig {
            pause_ms: 0,
            ..SyncConfig::default()
        }
    }

    fn runner(
        items: Vec<ContentItem>,
        publisher: Arc<FakePublisher>,
        state_path: &std::path::Path,
    ) -> SyncRunner {
        SyncRunner::new(
            Arc::new(FakeSource(items)),
            publisher,
            config(),
            state_path,
        )
    }

    #[tokio::test]
    async fn first_run_creates_every_item() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());

        let report = runner(vec![item("a", 5), item("b", 5)], publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();

        assert!(report.success());
        assert_eq!(report.created, 2);
        assert_eq!(publisher.created.lock().unwrap().len(), 2);

        let store = StateStore::load(&state_path);
        assert_eq!(store.articles.len(), 2);
        assert_eq!(store.record("a").unwrap().source_updated_at, Some(ts(5)));
        assert!(store.last_sync_time.is_some());
    }

    #[tokio::test]
    async fn second_run_skips_unchanged_items() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());
        let items = vec![item("a", 5)];

        runner(items.clone(), publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();
        let second = runner(items, publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();

        assert_eq!(second.skipped, 1);
        assert_eq!(second.created, 0);
        assert_eq!(publisher.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn changed_item_is_updated_at_its_remote_id() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());

        runner(vec![item("a", 5)], publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();
        let report = runner(vec![item("a", 9)], publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
        let updated = publisher.updated.lock().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].0, "q-1");

        let store = StateStore::load(&state_path);
        assert_eq!(store.record("a").unwrap().source_updated_at, Some(ts(9)));
    }

    #[tokio::test]
    async fn publish_failure_is_recovered_per_item() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher {
            fail_titles: ["Title a".to_string()].into_iter().collect(),
            ..FakePublisher::default()
        });

        let report = runner(vec![item("a", 5), item("b", 5)], publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();

        assert!(!report.success());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.created, 1);

        // The failed item has no record, so the next run retries it
        let store = StateStore::load(&state_path);
        assert!(store.record("a").is_none());
        assert!(store.record("b").is_some());
    }

    #[tokio::test]
    async fn fetch_failure_is_batch_fatal_and_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");

        let mut prior = StateStore::new();
        prior.last_sync_time = Some(ts(1));
        prior.save(&state_path).unwrap();

        let runner = SyncRunner::new(
            Arc::new(FailingSource),
            Arc::new(FakePublisher::default()),
            config(),
            &state_path,
        );
        assert!(runner.run().await.is_err());

        assert_eq!(StateStore::load(&state_path), prior);
    }

    #[tokio::test]
    async fn dry_run_publishes_nothing_and_writes_no_state() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());

        let report = runner(vec![item("a", 5)], publisher.clone(), &state_path)
            .run_with_options(RunOptions { dry_run: true })
            .await
            .unwrap();

        assert_eq!(report.created, 1);
        assert!(report.actions[0].starts_with("[dry-run] Would create"));
        assert!(publisher.created.lock().unwrap().is_empty());
        assert!(!state_path.exists());
    }

    #[tokio::test]
    async fn run_is_bounded_by_max_items() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());

        let items: Vec<ContentItem> = (0..20).map(|i| item(&format!("i{i}"), 5)).collect();
        let runner = SyncRunner::new(
            Arc::new(FakeSource(items)),
            publisher.clone(),
            SyncConfig {
                max_items: 3,
                pause_ms: 0,
                ..SyncConfig::default()
            },
            &state_path,
        );

        let report = runner.run().await.unwrap();
        assert_eq!(report.created, 3);
    }

    #[tokio::test]
    async fn transduction_failure_falls_back_to_raw_markup() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());

        let mut deep = item("a", 5);
        deep.content = "<div>".repeat(200);

        let report = runner(vec![deep.clone()], publisher.clone(), &state_path)
            .run()
            .await
            .unwrap();

        assert!(report.success());
        let created = publisher.created.lock().unwrap();
        assert_eq!(created[0].body, deep.content);
    }

    #[tokio::test]
    async fn backlink_is_appended_when_base_url_is_set() {
        let dir = tempdir().unwrap();
        let state_path = dir.path().join("state.json");
        let publisher = Arc::new(FakePublisher::default());

        let runner = SyncRunner::new(
            Arc::new(FakeSource(vec![item("art-1", 5)])),
            publisher.clone(),
            SyncConfig {
                base_url: Some("https://blog.example.com/articles/".to_string()),
                pause_ms: 0,
                ..SyncConfig::default()
            },
            &state_path,
        );
        runner.run().await.unwrap();

        let created = publisher.created.lock().unwrap();
        assert!(
            created[0]
                .body
                .ends_with("(https://blog.example.com/articles/art-1)")
        );
    }
}
