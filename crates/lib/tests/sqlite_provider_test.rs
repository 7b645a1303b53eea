//! # SQLite Provider Tests
//!
//! Verifies the `SqliteProvider` as a generation and file store: records
//! round-trip unchanged, reads are scoped to their owner, usage sums per user,
//! and topic search ranks by relevance with newest-first ties.
//!
//! Each test uses an in-memory database so tests stay fast and isolated.

mod common;

use crate::common::setup_tracing;
use frameforge::providers::db::storage::{FileStore, GenerationStore};
use frameforge::types::{ContentType, NewFile, NewGeneration, Philosophy, Usage};
use frameforge_test_utils::{new_generation, TestSetup};

#[tokio::test]
async fn test_saved_generation_round_trips() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    let new = NewGeneration {
        user_id: "user-a".to_string(),
        topic: "AI in healthcare".to_string(),
        url: Some("https://example.com/paper".to_string()),
        region: "USA".to_string(),
        content_type: ContentType::ShortDailyBlogPost,
        model: "gemini-2.5-flash".to_string(),
        result_text: "Hospitals are quietly changing.".to_string(),
        philosophy: Philosophy::Lakoff,
        usage: Usage {
            prompt_tokens: 120,
            total_tokens: 120,
        },
    };
    let saved = store.save(new.clone()).await.unwrap();

    let fetched = store
        .get_by_id("user-a", &saved.id)
        .await
        .unwrap()
        .expect("owner should see the record");

    assert_eq!(fetched, saved);
    assert_eq!(fetched.topic, "AI in healthcare");
    assert_eq!(fetched.content_type.as_str(), "Short Daily Blog Post");
    assert_eq!(fetched.url, new.url);
    assert_eq!(fetched.usage, new.usage);
}

#[tokio::test]
async fn test_unknown_tags_are_stored_verbatim() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    let mut new = new_generation("user-a", "tea ceremonies", 3);
    new.content_type = ContentType::from("Haiku");
    new.philosophy = Philosophy::from("Stoic");
    let saved = store.save(new).await.unwrap();

    let fetched = store.get_by_id("user-a", &saved.id).await.unwrap().unwrap();
    assert_eq!(fetched.content_type, ContentType::Other("Haiku".to_string()));
    assert_eq!(fetched.philosophy, Philosophy::Other("Stoic".to_string()));
}

#[tokio::test]
async fn test_records_are_private_to_their_owner() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    let saved = store
        .save(new_generation("user-a", "city budgets", 10))
        .await
        .unwrap();

    assert!(store.get_by_id("user-b", &saved.id).await.unwrap().is_none());
    assert!(store
        .search_by_topic("user-b", "")
        .await
        .unwrap()
        .is_empty());
    assert!(store
        .search_by_topic("user-b", "budgets")
        .await
        .unwrap()
        .is_empty());
    assert!(store
        .get_by_id("user-a", "no-such-id")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_usage_total_sums_only_the_callers_records() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    for tokens in [10, 25, 5] {
        store
            .save(new_generation("user-a", "transit", tokens))
            .await
            .unwrap();
    }
    store
        .save(new_generation("user-b", "transit", 1000))
        .await
        .unwrap();

    assert_eq!(store.usage_total("user-a").await.unwrap(), 40);
    assert_eq!(store.usage_total("user-c").await.unwrap(), 0);
}

#[tokio::test]
async fn test_blank_query_lists_newest_first() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    let mut ids = Vec::new();
    for topic in ["first", "second", "third"] {
        ids.push(store.save(new_generation("user-a", topic, 1)).await.unwrap().id);
    }

    let listed: Vec<String> = store
        .search_by_topic("user-a", "  ")
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.id)
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_topic_search_ranks_by_relevance() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    let older = store
        .save(new_generation("user-a", "solar farms", 1))
        .await
        .unwrap();
    store
        .save(new_generation("user-a", "wind turbines", 1))
        .await
        .unwrap();
    let best = store
        .save(new_generation("user-a", "solar subsidies for farms", 1))
        .await
        .unwrap();
    let newer = store
        .save(new_generation("user-a", "rooftop solar", 1))
        .await
        .unwrap();

    let found: Vec<String> = store
        .search_by_topic("user-a", "Solar farms")
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.id)
        .collect();

    // Two terms matched beats one; among equals the newest comes first.
    assert_eq!(found.len(), 3);
    assert_eq!(found[0], best.id);
    assert_eq!(found[1], older.id);
    assert_eq!(found[2], newer.id);

    assert!(store
        .search_by_topic("user-a", "!!!")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_file_search_and_content_lookup() {
    setup_tracing();
    let setup = TestSetup::new().await.unwrap();
    let store = &setup.provider;

    let saved = store
        .save_file(NewFile {
            name: "framing.txt".to_string(),
            storage_id: Some("blob-1".to_string()),
            text_content: "Frames shape how voters think about taxes.".to_string(),
        })
        .await
        .unwrap();
    store
        .save_file(NewFile {
            name: "other.txt".to_string(),
            storage_id: None,
            text_content: "Unrelated gardening notes.".to_string(),
        })
        .await
        .unwrap();

    let matches = store.search_files("taxes", 5).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, saved.id);
    assert_eq!(matches[0].name, "framing.txt");
    assert_eq!(saved.storage_id, "blob-1");

    assert_eq!(
        store.get_file_content(&saved.id).await.unwrap().as_deref(),
        Some("Frames shape how voters think about taxes.")
    );
    assert_eq!(store.get_file_content("missing").await.unwrap(), None);
    assert!(store.search_files("", 5).await.unwrap().is_empty());
}
