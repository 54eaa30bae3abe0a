// src/extractors/items.rs
//! Item grammars for the four sub-section kinds.
//!
//! Principles and mistakes are plain numbered lists, frameworks are numbered
//! lists whose entries start with a bolded name, and mental models are
//! numbered `**Name** → description` entries whose description may wrap over
//! several lines. All of them are exposed through one lazy iterator,
//! [`SectionItems`].

use crate::extractors::models::{truncate_chars, Item, ItemType, MAX_NAME_CHARS};
use crate::extractors::section::{find_section, SectionKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Cleaned principle/mistake text must be longer than this (in characters).
const MIN_LIST_ITEM_CHARS: usize = 10;

// `1. anything` on a trimmed line.
static NUMBERED_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s+(.+)$").expect("Failed to compile NUMBERED_LINE_RE")
});

// `1. **Name**` at the start of a trimmed line; the rest of the line is ignored.
static NUMBERED_BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s+\*\*(.+?)\*\*").expect("Failed to compile NUMBERED_BOLD_RE")
});

// `1. **Name** → ` up to the first character of the description.
static MENTAL_MODEL_HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\d+\.\s+\*\*(.+?)\*\*\s*[→:\-—]\s*")
        .expect("Failed to compile MENTAL_MODEL_HEAD_RE")
});

// A description ends at the next numbered entry or a blank line.
static DESCRIPTION_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\d+\.|\n\n").expect("Failed to compile DESCRIPTION_END_RE")
});

/// Lazy, finite, non-restartable sequence of the items in one sub-section.
pub enum SectionItems<'a> {
    /// The sub-section is absent.
    Empty,
    /// Line-oriented grammars (principles, mistakes, frameworks).
    Lines {
        kind: SectionKind,
        domain: String,
        lines: std::str::Split<'a, char>,
    },
    /// Mental models are scanned over the whole section text.
    MentalModels {
        domain: String,
        text: &'a str,
        pos: usize,
    },
}

impl<'a> SectionItems<'a> {
    /// Finds the `kind` sub-section in a domain body and iterates its items.
    pub fn new(kind: SectionKind, domain: String, domain_body: &'a str) -> Self {
        match find_section(domain_body, kind) {
            Some(section) => Self::over_section(kind, domain, section),
            None => SectionItems::Empty,
        }
    }

    /// Iterates the items of an already located sub-section body.
    pub fn over_section(kind: SectionKind, domain: String, section: &'a str) -> Self {
        match kind {
            SectionKind::MentalModels => SectionItems::MentalModels {
                domain,
                text: section,
                pos: 0,
            },
            _ => SectionItems::Lines {
                kind,
                domain,
                lines: section.split('\n'),
            },
        }
    }
}

impl<'a> Iterator for SectionItems<'a> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        match self {
            SectionItems::Empty => None,
            SectionItems::Lines { kind, domain, lines } => {
                for line in lines {
                    if let Some(item) = parse_line(*kind, domain, line) {
                        return Some(item);
                    }
                }
                None
            }
            SectionItems::MentalModels { domain, text, pos } => next_mental_model(domain, *text, pos),
        }
    }
}

fn parse_line(kind: SectionKind, domain: &str, line: &str) -> Option<Item> {
    match kind {
        SectionKind::Frameworks => parse_framework_line(domain, line),
        _ => parse_list_line(kind.item_type(), domain, line),
    }
}

/// Strips escaped `>` and emphasis markers from list text.
pub fn clean_list_text(raw: &str) -> String {
    raw.replace("\\>", ">").replace("**", "").replace('*', "")
}

/// Principle / mistake grammar: `<n>. <text>`, cleaned and length-checked.
fn parse_list_line(item_type: ItemType, domain: &str, line: &str) -> Option<Item> {
    let caps = NUMBERED_LINE_RE.captures(line.trim())?;
    let content = clean_list_text(caps.get(1)?.as_str().trim());

    if content.chars().count() <= MIN_LIST_ITEM_CHARS || content.starts_with('#') {
        tracing::trace!("Skipping short or heading-like {} line: '{}'", item_type, content);
        return None;
    }

    Some(Item {
        domain: domain.to_string(),
        item_type,
        name: truncate_chars(&content, MAX_NAME_CHARS).to_string(),
        content,
    })
}

/// Framework grammar: only the bolded name is kept.
// NOTE: any description after the name on the same line is dropped. Existing
// knowledge-base rows were built this way, so it stays until they are re-ingested.
fn parse_framework_line(domain: &str, line: &str) -> Option<Item> {
    let caps = NUMBERED_BOLD_RE.captures(line.trim())?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    Some(Item {
        domain: domain.to_string(),
        item_type: ItemType::Framework,
        name: name.to_string(),
        content: name.to_string(),
    })
}

fn next_mental_model(domain: &str, text: &str, pos: &mut usize) -> Option<Item> {
    while *pos < text.len() {
        let Some(caps) = MENTAL_MODEL_HEAD_RE.captures_at(text, *pos) else {
            *pos = text.len();
            return None;
        };
        let (Some(head), Some(name)) = (caps.get(0), caps.get(1)) else {
            *pos = text.len();
            return None;
        };

        // The description needs at least one character.
        let desc_start = head.end();
        let Some(first) = text[desc_start..].chars().next() else {
            *pos = text.len();
            return None;
        };
        let desc_end = description_end(text, desc_start + first.len_utf8());
        *pos = desc_end;

        let name = name.as_str().trim();
        let description = text[desc_start..desc_end].trim();
        if name.is_empty() || description.is_empty() {
            tracing::trace!("Skipping mental model with empty name or description at byte {}", head.start());
            continue;
        }

        return Some(Item {
            domain: domain.to_string(),
            item_type: ItemType::MentalModel,
            name: name.to_string(),
            content: format!("{}: {}", name, description),
        });
    }
    None
}

/// First terminator at or after `from`: a numbered entry, a blank line, or the
/// end of the text (ignoring one trailing line break).
fn description_end(text: &str, from: usize) -> usize {
    let end_of_text = if text.ends_with('\n') && text.len() - 1 >= from {
        text.len() - 1
    } else {
        text.len()
    };

    match DESCRIPTION_END_RE.find_at(text, from) {
        Some(m) if m.start() < end_of_text => m.start(),
        _ => end_of_text,
    }
}
