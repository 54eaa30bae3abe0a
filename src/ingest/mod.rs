// src/ingest/mod.rs
//! Enrichment and persistence of extracted items.
//!
//! Each item is tagged, embedded and inserted on its own. A failure for one
//! item is logged and counted, and the run moves on to the next one.

pub mod tags;

use crate::extractors::models::truncate_chars;
use crate::extractors::Item;
use crate::supabase::models::book_title;
use crate::supabase::KnowledgeRecord;
use crate::utils::error::{EmbeddingError, StoreError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tags::{priority_for, tags_for_domain};

/// The embedding API only sees this many characters of an item's content.
pub const MAX_EMBEDDING_CHARS: usize = 8000;

/// Produces a vector embedding for a piece of text.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Destination table for assembled knowledge records.
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Whether a row with this title and chunk name is already stored.
    async fn exists(&self, book_title: &str, chunk_name: &str) -> Result<bool, StoreError>;

    async fn insert(&self, record: &KnowledgeRecord) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub skip_existing: bool,
    pub request_delay: Duration,
    pub max_embedding_chars: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            skip_existing: false,
            request_delay: Duration::ZERO,
            max_embedding_chars: MAX_EMBEDDING_CHARS,
        }
    }
}

/// Aggregate outcome of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub total: usize,
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl IngestReport {
    /// True when items were attempted and every one of them failed.
    pub fn all_failed(&self) -> bool {
        self.failed > 0 && self.inserted == 0 && self.skipped == 0
    }
}

#[derive(Debug)]
enum Outcome {
    Inserted,
    Skipped,
}

#[derive(Debug, thiserror::Error)]
enum ItemError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("knowledge base failed: {0}")]
    Store(#[from] StoreError),
}

pub struct Ingestor<E, S> {
    embedder: E,
    store: S,
    options: IngestOptions,
}

impl<E: Embedder, S: KnowledgeStore> Ingestor<E, S> {
    pub fn new(embedder: E, store: S, options: IngestOptions) -> Self {
        Self { embedder, store, options }
    }

    /// Enriches and stores every item, one at a time.
    pub async fn run(&self, items: &[Item]) -> IngestReport {
        let mut report = IngestReport {
            total: items.len(),
            ..Default::default()
        };
        tracing::info!("Ingesting {} items...", items.len());

        for (idx, item) in items.iter().enumerate() {
            tracing::info!("[{}/{}] {}...", idx + 1, items.len(), truncate_chars(&item.name, 60));

            match self.ingest_one(item).await {
                Ok(Outcome::Inserted) => {
                    tracing::info!("   Inserted");
                    report.inserted += 1;
                }
                Ok(Outcome::Skipped) => {
                    tracing::info!("   Skipped (already exists)");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("   Failed '{}': {}", item.name, e);
                    report.failed += 1;
                }
            }

            if !self.options.request_delay.is_zero() && idx + 1 < items.len() {
                tokio::time::sleep(self.options.request_delay).await;
            }
        }

        report
    }

    async fn ingest_one(&self, item: &Item) -> Result<Outcome, ItemError> {
        let title = book_title(&item.domain);

        if self.options.skip_existing && self.store.exists(&title, &item.name).await? {
            return Ok(Outcome::Skipped);
        }

        let input = truncate_chars(&item.content, self.options.max_embedding_chars);
        let embedding = self.embedder.embed(input).await?;

        let tags = tags_for_domain(&item.domain);
        let record = KnowledgeRecord::from_item(item, &tags, priority_for(item.item_type), embedding);
        self.store.insert(&record).await?;

        Ok(Outcome::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ItemType;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeEmbedder {
        inputs: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            self.inputs.lock().unwrap().push(text.to_string());
            if self.fail_on.is_some_and(|needle| text.contains(needle)) {
                return Err(EmbeddingError::RateLimited);
            }
            Ok(vec![text.len() as f32])
        }
    }

    #[derive(Default)]
    struct FakeStore {
        existing: Vec<(String, String)>,
        inserted: Mutex<Vec<KnowledgeRecord>>,
    }

    #[async_trait]
    impl KnowledgeStore for FakeStore {
        async fn exists(&self, book_title: &str, chunk_name: &str) -> Result<bool, StoreError> {
            Ok(self
                .existing
                .iter()
                .any(|(title, name)| title == book_title && name == chunk_name))
        }

        async fn insert(&self, record: &KnowledgeRecord) -> Result<(), StoreError> {
            self.inserted.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn item(item_type: ItemType, name: &str, content: &str) -> Item {
        Item {
            domain: "FINANCE".to_string(),
            item_type,
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let items = vec![
            item(ItemType::Principle, "Cash is oxygen", "Cash is oxygen for startups"),
            item(ItemType::Mistake, "Broken", "Broken item that fails to embed"),
            item(ItemType::Framework, "Runway model", "Runway model"),
        ];
        let embedder = FakeEmbedder {
            fail_on: Some("fails to embed"),
            ..Default::default()
        };
        let ingestor = Ingestor::new(embedder, FakeStore::default(), IngestOptions::default());

        let report = tokio_test::block_on(ingestor.run(&items));

        assert_eq!(report, IngestReport { total: 3, inserted: 2, skipped: 0, failed: 1 });
        assert!(!report.all_failed());

        let inserted = ingestor.store.inserted.lock().unwrap();
        let names: Vec<_> = inserted.iter().map(|r| r.chunk_name.as_str()).collect();
        assert_eq!(names, vec!["Cash is oxygen", "Runway model"]);
        assert_eq!(inserted[0].priority, tags::Priority::High);
        assert_eq!(inserted[0].embedding, vec!["Cash is oxygen for startups".len() as f32]);
    }

    #[test]
    fn test_skip_existing_avoids_embedding() {
        let items = vec![
            item(ItemType::Principle, "Cash is oxygen", "Cash is oxygen for startups"),
            item(ItemType::Principle, "Know your burn", "Know your burn rate weekly"),
        ];
        let store = FakeStore {
            existing: vec![("Domain Pack: FINANCE".to_string(), "Cash is oxygen".to_string())],
            ..Default::default()
        };
        let options = IngestOptions {
            skip_existing: true,
            ..Default::default()
        };
        let ingestor = Ingestor::new(FakeEmbedder::default(), store, options);

        let report = tokio_test::block_on(ingestor.run(&items));

        assert_eq!(report, IngestReport { total: 2, inserted: 1, skipped: 1, failed: 0 });
        assert_eq!(*ingestor.embedder.inputs.lock().unwrap(), vec!["Know your burn rate weekly".to_string()]);
    }

    #[test]
    fn test_embedding_input_is_truncated() {
        let long = "é".repeat(MAX_EMBEDDING_CHARS + 500);
        let items = vec![item(ItemType::MentalModel, "Long", &long)];
        let ingestor = Ingestor::new(FakeEmbedder::default(), FakeStore::default(), IngestOptions::default());

        tokio_test::block_on(ingestor.run(&items));

        let inputs = ingestor.embedder.inputs.lock().unwrap();
        assert_eq!(inputs[0].chars().count(), MAX_EMBEDDING_CHARS);
        // The stored description keeps the full content.
        assert_eq!(ingestor.store.inserted.lock().unwrap()[0].description, long);
    }

    #[test]
    fn test_all_failed_report() {
        let items = vec![item(ItemType::Mistake, "Broken", "always fails to embed")];
        let embedder = FakeEmbedder {
            fail_on: Some("fails"),
            ..Default::default()
        };
        let ingestor = Ingestor::new(embedder, FakeStore::default(), IngestOptions::default());

        let report = tokio_test::block_on(ingestor.run(&items));
        assert!(report.all_failed());
        assert!(!IngestReport::default().all_failed());
    }
}
