// src/extractors/mod.rs
pub mod domain;
pub mod items;
pub mod models;
pub mod section;

use std::borrow::Cow;

// Re-export key extraction types for convenience
pub use domain::split_domains;
pub use items::SectionItems;
#[allow(unused_imports)]
pub use models::{Domain, Item, ItemType};
pub use section::SectionKind;

/// Turns a domain pack document into an ordered list of knowledge items.
///
/// For each domain, in document order, items come out grouped as principles,
/// mistakes, mental models, then frameworks. The extractor is stateless, so
/// parsing the same text twice yields the same items.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomainPackExtractor;

impl DomainPackExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Lazily yields every item of the document.
    ///
    /// Expects `\n` line endings; [`parse`](Self::parse) normalizes first.
    pub fn extract<'a>(&self, document: &'a str) -> impl Iterator<Item = Item> + 'a {
        split_domains(document).into_iter().flat_map(|domain| {
            SectionKind::ALL
                .into_iter()
                .flat_map(move |kind| SectionItems::new(kind, domain.name.clone(), domain.body))
        })
    }

    /// Normalizes line endings, then collects [`extract`](Self::extract) into a vector.
    pub fn parse(&self, document: &str) -> Vec<Item> {
        let document = normalize_line_endings(document);
        let items: Vec<Item> = self.extract(&document).collect();
        tracing::debug!("Parsed {} items from {} bytes of input", items.len(), document.len());
        items
    }
}

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Per-domain item counts, used for progress output and dry runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DomainSummary {
    pub domain: String,
    pub principles: usize,
    pub mistakes: usize,
    pub mental_models: usize,
    pub frameworks: usize,
}

impl DomainSummary {
    pub fn total(&self) -> usize {
        self.principles + self.mistakes + self.mental_models + self.frameworks
    }
}

/// Counts items per domain, keeping domains in first-seen order.
pub fn summarize(items: &[Item]) -> Vec<DomainSummary> {
    let mut summaries: Vec<DomainSummary> = Vec::new();

    for item in items {
        let idx = match summaries.iter().position(|s| s.domain == item.domain) {
            Some(idx) => idx,
            None => {
                summaries.push(DomainSummary {
                    domain: item.domain.clone(),
                    ..Default::default()
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[idx];
        match item.item_type {
            ItemType::Principle => summary.principles += 1,
            ItemType::Mistake => summary.mistakes += 1,
            ItemType::MentalModel => summary.mental_models += 1,
            ItemType::Framework => summary.frameworks += 1,
        }
    }

    summaries
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const PACK: &str = r#"# Domain Packs

Some intro text that should be ignored.
1. Not inside any domain so it is dropped

# **⭐ DOMAIN 1 — MARKETING**

# **🧩 FRAMEWORKS YOU SHOULD KNOW**
1. **AARRR** - pirate metrics
2. **Jobs To Be Done**

# **🧠 MENTAL MODELS**
1. **Flywheel** → Momentum compounds over time

# **❌ 10 BIGGEST MISTAKES**
1. Spending on ads before positioning is clear
2. Tiny

# **✅ 10 CORE MARKETING PRINCIPLES**
1. **Positioning** beats volume every single time
2. Distribution is a product feature

# **⭐ DOMAIN 2 — B2B SALES PLAYBOOK**

# **✅ SALES PRINCIPLES**
1. Always talk to customers early and often

# **🧩 FRAMEWORKS**
1. **MEDDIC** qualification
"#;

    #[test]
    fn test_document_without_domains_is_empty() {
        let extractor = DomainPackExtractor::new();
        assert!(extractor.parse("").is_empty());
        assert!(extractor.parse("# **✅ PRINCIPLES**\n1. Orphaned principle text\n").is_empty());
    }

    #[test]
    fn test_items_grouped_by_type_within_domain() {
        let items = DomainPackExtractor::new().parse(PACK);
        let seen: Vec<(&str, ItemType, &str)> = items
            .iter()
            .map(|i| (i.domain.as_str(), i.item_type, i.name.as_str()))
            .collect();

        assert_eq!(
            seen,
            vec![
                ("MARKETING", ItemType::Principle, "Positioning beats volume every single time"),
                ("MARKETING", ItemType::Principle, "Distribution is a product feature"),
                ("MARKETING", ItemType::Mistake, "Spending on ads before positioning is clear"),
                ("MARKETING", ItemType::MentalModel, "Flywheel"),
                ("MARKETING", ItemType::Framework, "AARRR"),
                ("MARKETING", ItemType::Framework, "Jobs To Be Done"),
                ("B2B SALES PLAYBOOK", ItemType::Principle, "Always talk to customers early and often"),
                ("B2B SALES PLAYBOOK", ItemType::Framework, "MEDDIC"),
            ]
        );
    }

    #[test]
    fn test_item_domains_match_split_domains() {
        let domains: Vec<String> = split_domains(PACK).into_iter().map(|d| d.name).collect();
        for item in DomainPackExtractor::new().extract(PACK) {
            assert_eq!(domains.iter().filter(|d| **d == item.domain).count(), 1);
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let extractor = DomainPackExtractor::new();
        assert_eq!(extractor.parse(PACK), extractor.parse(PACK));
    }

    #[test]
    fn test_crlf_document_parses_like_lf() {
        let lf = "# **⭐ DOMAIN 1 — OPS**\n# **🧠 MENTAL MODELS**\n1. **Flywheel** → Momentum compounds\n\nClosing notes about this section\n";
        let crlf = lf.replace('\n', "\r\n");

        let extractor = DomainPackExtractor::new();
        let items = extractor.parse(&crlf);
        assert_eq!(items, extractor.parse(lf));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "Flywheel: Momentum compounds");

        assert_eq!(extractor.parse(&PACK.replace('\n', "\r\n")), extractor.parse(PACK));
    }

    #[test]
    fn test_normalize_line_endings() {
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed("a\nb")));
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_summarize_counts_per_domain() {
        let summaries = summarize(&DomainPackExtractor::new().parse(PACK));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].domain, "MARKETING");
        assert_eq!(
            (summaries[0].principles, summaries[0].mistakes, summaries[0].mental_models, summaries[0].frameworks),
            (2, 1, 1, 2)
        );
        assert_eq!(summaries[1].total(), 2);
    }
}
