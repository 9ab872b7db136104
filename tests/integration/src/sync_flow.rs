//! End-to-end batch runs against in-memory collaborators

use std::path::Path;
use std::sync::Arc;

use article_core::{RunOptions, StateStore, SyncConfig, SyncRunner};
use article_test_utils::{FakeSource, ItemBuilder, RecordingPublisher};
use tempfile::tempdir;

fn config() -> SyncConfig {
    SyncConfig {
        pause_ms: 0,
        footer: "*Synced from the blog.*".to_string(),
        ..SyncConfig::default()
    }
}

fn runner(
    items: Vec<article_core::ContentItem>,
    publisher: Arc<RecordingPublisher>,
    state_path: &Path,
) -> SyncRunner {
    SyncRunner::new(
        Arc::new(FakeSource::new(items)),
        publisher,
        config(),
        state_path,
    )
}

#[tokio::test]
async fn first_run_publishes_transduced_document() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");
    let publisher = Arc::new(RecordingPublisher::new());

    let item = ItemBuilder::new("art-1")
        .title("Intro post")
        .content("<h2>Intro</h2><p>Read <b> this </b>.</p>")
        .excerpt("<p>Lead.</p>")
        .categories(&["Rust", "Rust", "CLI"])
        .tags("tools, sync")
        .updated_at_s(5)
        .build();

    let report = runner(vec![item], publisher.clone(), &state_path)
        .run()
        .await
        .unwrap();

    assert!(report.success());
    assert_eq!(report.created, 1);

    let created = publisher.created();
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0].body,
        "Lead.\n\n## Intro\n\nRead **this**.\n\n*Synced from the blog.*"
    );

    let tag_names: Vec<&str> = created[0].tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["Rust", "CLI", "tools", "sync"]);
}

#[tokio::test]
async fn create_skip_update_lifecycle() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");
    let publisher = Arc::new(RecordingPublisher::new());

    let item = ItemBuilder::new("art-1").updated_at_s(5).build();

    // First run: create
    let first = runner(vec![item.clone()], publisher.clone(), &state_path)
        .run()
        .await
        .unwrap();
    assert_eq!(first.created, 1);

    // Same content: skip, no publish call
    let second = runner(vec![item], publisher.clone(), &state_path)
        .run()
        .await
        .unwrap();
    assert_eq!(second.skipped, 1);
    assert_eq!(publisher.publish_count(), 1);

    // Newer content: update against the recorded remote id
    let newer = ItemBuilder::new("art-1").updated_at_s(9).build();
    let third = runner(vec![newer], publisher.clone(), &state_path)
        .run()
        .await
        .unwrap();
    assert_eq!(third.updated, 1);

    let updated = publisher.updated();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].0, "q-1");

    // The record now carries the newer source timestamp
    let store = StateStore::load(&state_path);
    assert_eq!(
        store.record("art-1").unwrap().source_updated_at,
        Some(article_test_utils::item::fixed_time(9))
    );
}

#[tokio::test]
async fn failed_item_is_retried_on_the_next_run() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");

    let items = vec![
        ItemBuilder::new("a").title("Alpha").updated_at_s(5).build(),
        ItemBuilder::new("b").title("Beta").updated_at_s(5).build(),
    ];

    // First run: Alpha fails, Beta succeeds
    let failing = Arc::new(RecordingPublisher::failing_for(&["Alpha"]));
    let report = runner(items.clone(), failing.clone(), &state_path)
        .run()
        .await
        .unwrap();

    assert!(!report.success());
    assert_eq!(report.created, 1);
    assert_eq!(report.errors.len(), 1);

    // Second run with a healthy publisher: Alpha is created, Beta skips
    let healthy = Arc::new(RecordingPublisher::new());
    let retry = runner(items, healthy.clone(), &state_path)
        .run()
        .await
        .unwrap();

    assert!(retry.success());
    assert_eq!(retry.created, 1);
    assert_eq!(retry.skipped, 1);
    assert_eq!(healthy.created()[0].title, "Alpha");
}

#[tokio::test]
async fn persisted_state_matches_the_contract_shape() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");
    let publisher = Arc::new(RecordingPublisher::new());

    let item = ItemBuilder::new("art-1").updated_at_s(5).build();
    runner(vec![item], publisher, &state_path)
        .run()
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&state_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(json["lastSyncTime"].is_string());
    let record = &json["articles"]["art-1"];
    assert_eq!(record["qiitaId"], "q-1");
    assert!(record["title"].is_string());
    assert!(record["lastSyncedAt"].is_string());
    assert!(record["microCMSUpdatedAt"].is_string());
}

#[tokio::test]
async fn every_successful_publish_gets_exactly_one_record() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");
    let publisher = Arc::new(RecordingPublisher::failing_for(&["Title b"]));

    let items = vec![
        ItemBuilder::new("a").updated_at_s(3).build(),
        ItemBuilder::new("b").updated_at_s(4).build(),
        ItemBuilder::new("c").updated_at_s(5).build(),
    ];
    runner(items, publisher, &state_path).run().await.unwrap();

    let store = StateStore::load(&state_path);
    assert_eq!(store.articles.len(), 2);
    assert_eq!(
        store.record("a").unwrap().source_updated_at,
        Some(article_test_utils::item::fixed_time(3))
    );
    assert_eq!(
        store.record("c").unwrap().source_updated_at,
        Some(article_test_utils::item::fixed_time(5))
    );
    assert!(store.record("b").is_none());
}

#[tokio::test]
async fn dry_run_reports_decisions_without_side_effects() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");
    let publisher = Arc::new(RecordingPublisher::new());

    let items = vec![ItemBuilder::new("a").updated_at_s(5).build()];
    let report = runner(items, publisher.clone(), &state_path)
        .run_with_options(RunOptions { dry_run: true })
        .await
        .unwrap();

    assert_eq!(report.created, 1);
    assert!(report.actions[0].contains("[dry-run]"));
    assert_eq!(publisher.publish_count(), 0);
    assert!(!state_path.exists());
}

#[tokio::test]
async fn item_without_tags_gets_the_fallback_tag() {
    let dir = tempdir().unwrap();
    let state_path = dir.path().join("sync-state.json");
    let publisher = Arc::new(RecordingPublisher::new());

    let item = ItemBuilder::new("bare").updated_at_s(5).build();
    runner(vec![item], publisher.clone(), &state_path)
        .run()
        .await
        .unwrap();

    let created = publisher.created();
    assert_eq!(created[0].tags.len(), 1);
    assert_eq!(created[0].tags[0].name, article_markup::FALLBACK_TAG);
}
