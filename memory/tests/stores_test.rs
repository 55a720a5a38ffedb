//! Integration tests for the memory stores and SquadMemory.

mod common;

use common::{keyword_index, MockVectorIndex};
use memory::{
    EntityMemory, EnvMemoryConfig, LongTermMemory, RecallPolicy, ShortTermMemory, SquadMemory,
    UserMemory,
};
use memory_core::{
    EntityMemoryItem, LongTermMemoryItem, MemoryError, MemoryItem, MemoryKind, MemoryProvider,
    MemoryStore, Metadata,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

/// **Test: Entity save with the default provider persists "name(type): description"**
#[tokio::test]
async fn test_entity_save_local_format() {
    let index = Arc::new(MockVectorIndex::default());
    let entity = EntityMemory::new(index.clone(), MemoryProvider::Local);

    entity
        .save_entity(&EntityMemoryItem::new("Acme", "Org", "A widget maker"), Some("researcher"))
        .await
        .unwrap();

    let saved = index.saved.lock().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "Acme(Org): A widget maker");
    assert_eq!(saved[0].1["agent"], json!("researcher"));
    assert_eq!(saved[0].1["entity_type"], json!("Org"));
}

/// **Test: Entity save with mem0 persists a narrative instruction block**
#[tokio::test]
async fn test_entity_save_mem0_format() {
    let index = Arc::new(MockVectorIndex::default());
    let entity = EntityMemory::new(index.clone(), MemoryProvider::Mem0);

    entity
        .save_entity(&EntityMemoryItem::new("Acme", "Org", "A widget maker"), None)
        .await
        .unwrap();

    let saved = index.saved.lock().await;
    assert_eq!(
        saved[0].0,
        "Remember details about the following entity:\nName: Acme\nType: Org\nEntity Description: A widget maker"
    );
    assert!(saved[0].1.get("agent").is_none());
}

/// **Test: Short-term and user values are wrapped only for mem0**
#[tokio::test]
async fn test_short_term_and_user_formatting_by_provider() {
    let local_index = Arc::new(MockVectorIndex::default());
    ShortTermMemory::new(local_index.clone(), MemoryProvider::Local)
        .save_item(&MemoryItem::new("Used a pivot table", Metadata::new(), Some("analyst".into())))
        .await
        .unwrap();
    assert_eq!(local_index.saved.lock().await[0].0, "Used a pivot table");
    assert_eq!(local_index.saved.lock().await[0].1["agent"], json!("analyst"));

    let mem0_index = Arc::new(MockVectorIndex::default());
    ShortTermMemory::new(mem0_index.clone(), MemoryProvider::Mem0)
        .save("Used a pivot table", Metadata::new(), None)
        .await
        .unwrap();
    assert_eq!(
        mem0_index.saved.lock().await[0].0,
        "Remember the following insights from Agent run: Used a pivot table"
    );

    let user_index = Arc::new(MockVectorIndex::default());
    UserMemory::new(user_index.clone(), MemoryProvider::Mem0)
        .save("Likes bullet points", Metadata::new(), None)
        .await
        .unwrap();
    assert_eq!(
        user_index.saved.lock().await[0].0,
        "Remember the details about the user: Likes bullet points"
    );
}

/// **Test: Backend faults surface as typed errors, never panics; reset faults are wrapped**
#[tokio::test]
async fn test_backend_faults_are_typed() {
    let stm = ShortTermMemory::new(Arc::new(MockVectorIndex::failing()), MemoryProvider::Local);

    let saved = stm.save("x", Metadata::new(), None).await;
    assert!(matches!(saved, Err(MemoryError::Backend { kind: MemoryKind::ShortTerm, .. })));

    assert!(!stm.search("x", 3, 0.0).await.is_available());

    let reset = stm.reset().await.unwrap_err();
    assert!(matches!(reset, MemoryError::Reset { kind: MemoryKind::ShortTerm, .. }));
    assert!(reset.to_string().contains("index offline"));
}

/// **Test: Long-term save_item stores agent, expected output and quality; score = quality**
#[tokio::test]
async fn test_long_term_save_item_and_search_records() {
    let dir = TempDir::new().unwrap();
    let ltm = LongTermMemory::open(dir.path().join("ltm.db")).await;

    let mut metadata = Metadata::new();
    metadata.insert("suggestions".to_string(), json!(["Use headings"]));
    let item = LongTermMemoryItem::new("writer", "Draft blog post", "A 500-word post", 7.5, metadata);
    ltm.save_item(&item).await.unwrap();

    let records = ltm.search_records("Draft blog post", 3).await.available().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.score, 7.5);
    assert_eq!(record.datetime, item.datetime);
    assert_eq!(record.metadata["agent"], json!("writer"));
    assert_eq!(record.metadata["expected_output"], json!("A 500-word post"));
    assert_eq!(record.metadata["quality"], json!(7.5));
    assert_eq!(record.suggestions(), vec!["Use headings"]);

    let hits = ltm.search("Draft blog post", 3, 0.99).await.available().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "Use headings");
}

/// **Test: Long-term reset failure is wrapped as a reset error with the cause kept**
#[tokio::test]
async fn test_long_term_reset_failure_is_wrapped() {
    let dir = TempDir::new().unwrap();
    let ltm = LongTermMemory::open(dir.path()).await;

    let err = ltm.reset().await.unwrap_err();
    assert!(matches!(err, MemoryError::Reset { kind: MemoryKind::LongTerm, .. }));
    assert!(std::error::Error::source(&err).is_some());
}

/// **Test: SquadMemory end to end with a real in-memory index and SQLite file**
#[tokio::test]
async fn test_squad_memory_recall_and_reset_all() {
    let dir = TempDir::new().unwrap();
    let config = EnvMemoryConfig {
        memory_provider: MemoryProvider::Local,
        ltm_db_path: dir.path().join("data").join("ltm.db"),
        recall: RecallPolicy {
            score_threshold: 0.5,
            ..RecallPolicy::default()
        },
    };
    let stm_index = keyword_index("short_term");
    let entity_index = keyword_index("entities");
    let memory = SquadMemory::from_config(&config, stm_index.clone(), entity_index.clone(), Some(keyword_index("user"))).await;
    assert!(memory.user.is_none(), "local provider has no user memory");

    memory
        .short_term
        .save("The report needed a budget table", Metadata::new(), Some("analyst"))
        .await
        .unwrap();
    memory
        .short_term
        .save("Travel booked for Monday", Metadata::new(), None)
        .await
        .unwrap();
    memory
        .entity
        .save_entity(&EntityMemoryItem::new("Acme", "Org", "Client asking for the budget report"), None)
        .await
        .unwrap();
    let mut metadata = Metadata::new();
    metadata.insert("suggestions".to_string(), json!(["Start with the budget summary"]));
    memory
        .long_term
        .save_item(&LongTermMemoryItem::new("analyst", "Write the budget report", "A report", 8.0, metadata))
        .await
        .unwrap();

    let block = memory
        .contextual()
        .build_context_for_mission("Write the budget report", None)
        .await;
    assert_eq!(
        block,
        "Recent Insights:\n- The report needed a budget table\n\
         Historical Data:\n- Start with the budget summary\n\
         Entities:\n- Acme(Org): Client asking for the budget report"
    );

    memory.reset_all().await.unwrap();
    assert!(stm_index.is_empty().await);
    assert!(entity_index.is_empty().await);
    let block = memory
        .contextual()
        .build_context_for_mission("Write the budget report", None)
        .await;
    assert_eq!(block, "");
}

/// **Test: mem0 provider enables user memory when an index is supplied**
#[tokio::test]
async fn test_from_config_mem0_enables_user_memory() {
    let dir = TempDir::new().unwrap();
    let config = EnvMemoryConfig {
        memory_provider: MemoryProvider::Mem0,
        ltm_db_path: dir.path().join("ltm.db"),
        recall: RecallPolicy::default(),
    };
    let memory = SquadMemory::from_config(
        &config,
        keyword_index("short_term"),
        keyword_index("entities"),
        Some(keyword_index("user")),
    )
    .await;
    assert!(memory.user.is_some());
    assert_eq!(memory.policy(), &RecallPolicy::default());
}
