// src/extractors/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length (in characters) of the `name` of a principle or mistake.
pub const MAX_NAME_CHARS: usize = 100;

/// One top-level `DOMAIN` block of a domain pack.
/// The body borrows from the document it was split out of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain<'a> {
    pub name: String,  // Trimmed heading title, e.g. "MARKETING"
    pub body: &'a str, // Everything up to the next domain heading (or end of document)
}

/// The closed set of knowledge item kinds a domain pack can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Principle,
    Mistake,
    MentalModel,
    Framework,
}

impl ItemType {
    /// Wire/database identifier (`mental_model`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Principle => "principle",
            ItemType::Mistake => "mistake",
            ItemType::MentalModel => "mental_model",
            ItemType::Framework => "framework",
        }
    }

    /// Human readable label used in the `components` column.
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Principle => "Principle",
            ItemType::Mistake => "Mistake",
            ItemType::MentalModel => "Mental Model",
            ItemType::Framework => "Framework",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted knowledge unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub domain: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    pub content: String,
}

/// Returns at most `max` characters of `text` (char boundary safe).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
