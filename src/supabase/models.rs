// src/supabase/models.rs
use crate::extractors::Item;
use crate::ingest::tags::{DomainTags, Priority};
use serde::{Deserialize, Serialize};

pub const BOOK_AUTHOR: &str = "EERA Knowledge Base";

/// One row of the knowledge-base table, as sent to PostgREST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeRecord {
    pub book_title: String,
    pub book_author: String,
    pub book_category: String,
    pub chunk_type: String,
    pub chunk_name: String,
    pub description: String,
    pub components: Vec<String>,
    pub when_applies: String,
    pub tags: Vec<String>,
    pub stage_tags: Vec<String>,
    pub domain_tags: Vec<String>,
    pub priority: Priority,
    pub embedding: Vec<f32>,
}

impl KnowledgeRecord {
    /// Assembles the row for an extracted item.
    pub fn from_item(item: &Item, tags: &DomainTags, priority: Priority, embedding: Vec<f32>) -> Self {
        Self {
            book_title: book_title(&item.domain),
            book_author: BOOK_AUTHOR.to_string(),
            book_category: item.domain.clone(),
            chunk_type: item.item_type.as_str().to_string(),
            chunk_name: item.name.clone(),
            description: item.content.clone(),
            components: vec![item.item_type.label().to_string()],
            when_applies: tags.when_applies(),
            tags: vec![item.domain.to_lowercase(), item.item_type.as_str().to_string()],
            stage_tags: tags.stage_tags.iter().map(|t| t.to_string()).collect(),
            domain_tags: tags.domain_tags.iter().map(|t| t.to_string()).collect(),
            priority,
            embedding,
        }
    }
}

/// Title under which every item of a domain is filed.
pub fn book_title(domain: &str) -> String {
    format!("Domain Pack: {}", domain)
}

/// Minimal projection returned by existence lookups.
#[derive(Debug, Deserialize)]
pub struct RowId {
    #[allow(dead_code)]
    pub id: serde_json::Value,
}
