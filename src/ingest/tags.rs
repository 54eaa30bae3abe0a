// src/ingest/tags.rs
use crate::extractors::ItemType;
use serde::Serialize;

/// When (business stage) and where (functional area) an item applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainTags {
    pub stage_tags: &'static [&'static str],
    pub domain_tags: &'static [&'static str],
}

impl DomainTags {
    /// Sentence stored in the `when_applies` column.
    pub fn when_applies(&self) -> String {
        format!(
            "Relevant for {} at stages: {}",
            self.domain_tags.join(", "),
            self.stage_tags.join(", ")
        )
    }
}

// (any of these substrings, tags). First match wins, so order matters:
// "GTM" must be checked before "SALES" and "OPS" after "OPERATIONS".
const TAG_TABLE: &[(&[&str], DomainTags)] = &[
    (
        &["MARKETING"],
        DomainTags {
            stage_tags: &["mvp", "first_customers", "early_revenue", "pmf", "growth"],
            domain_tags: &["Marketing", "GTM"],
        },
    ),
    (
        &["GTM", "GO-TO-MARKET"],
        DomainTags {
            stage_tags: &["first_customers", "early_revenue", "pmf", "seed", "growth"],
            domain_tags: &["GTM", "Strategy"],
        },
    ),
    (
        &["SALES"],
        DomainTags {
            stage_tags: &["first_customers", "early_revenue", "pmf", "seed", "growth"],
            domain_tags: &["Sales", "GTM"],
        },
    ),
    (
        &["TECH", "PRODUCT"],
        DomainTags {
            stage_tags: &["idea", "validation", "mvp", "first_customers", "early_revenue", "pmf"],
            domain_tags: &["Product", "Tech"],
        },
    ),
    (
        &["OPERATIONS", "OPS"],
        DomainTags {
            stage_tags: &["first_customers", "early_revenue", "pmf", "seed", "growth"],
            domain_tags: &["Ops"],
        },
    ),
    (
        &["LEADERSHIP", "HR"],
        DomainTags {
            stage_tags: &["early_revenue", "pmf", "seed", "growth"],
            domain_tags: &["Leadership", "HR"],
        },
    ),
    (
        &["FINANCE"],
        DomainTags {
            stage_tags: &["early_revenue", "pmf", "seed", "growth"],
            domain_tags: &["Finance"],
        },
    ),
];

const DEFAULT_TAGS: DomainTags = DomainTags {
    stage_tags: &["idea", "validation", "mvp"],
    domain_tags: &["Strategy"],
};

/// Classifies a domain name by case-insensitive substring lookup.
pub fn tags_for_domain(domain: &str) -> DomainTags {
    let upper = domain.to_uppercase();
    TAG_TABLE
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| upper.contains(needle)))
        .map(|(_, tags)| *tags)
        .unwrap_or(DEFAULT_TAGS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// Frameworks and principles are surfaced first at retrieval time.
pub fn priority_for(item_type: ItemType) -> Priority {
    match item_type {
        ItemType::Framework | ItemType::Principle => Priority::High,
        ItemType::Mistake | ItemType::MentalModel => Priority::Medium,
    }
}
