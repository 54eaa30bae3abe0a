// src/extractors/domain.rs
use crate::extractors::models::Domain;
use once_cell::sync::Lazy;
use regex::Regex;

// Domain headings look like: # **⭐ DOMAIN 3 — SALES**
// The title stops at the closing emphasis or the end of the line.
static DOMAIN_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)# \*\*⭐ DOMAIN \d+ — ([^*\n]+)")
        .expect("Failed to compile DOMAIN_HEADING_RE")
});

/// Splits a domain pack into its domains, in document order.
/// Text before the first heading is not part of any domain.
pub fn split_domains(document: &str) -> Vec<Domain<'_>> {
    let headings: Vec<_> = DOMAIN_HEADING_RE.captures_iter(document).collect();
    let mut domains = Vec::with_capacity(headings.len());

    for (idx, caps) in headings.iter().enumerate() {
        // Group 0 always exists for a match; group 1 is mandatory in the pattern.
        let (Some(heading), Some(title)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let body_end = headings
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map(|next| next.start())
            .unwrap_or(document.len());

        let name = title.as_str().trim().to_string();
        tracing::debug!("Found domain heading '{}' at byte {}", name, heading.start());

        domains.push(Domain {
            name,
            body: &document[heading.end()..body_end],
        });
    }

    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_headings_yields_no_domains() {
        assert!(split_domains("").is_empty());
        assert!(split_domains("# **✅ 10 CORE PRINCIPLES**\n1. Something long enough\n").is_empty());
    }

    #[test]
    fn test_splits_in_document_order() {
        let doc = "preamble\n# **⭐ DOMAIN 1 — MARKETING**\nmarketing body\n# **⭐ DOMAIN 2 — B2B SALES **\nsales body\n";
        let domains = split_domains(doc);

        assert_eq!(domains.len(), 2);
        assert_eq!(domains[0].name, "MARKETING");
        assert_eq!(domains[0].body, "**\nmarketing body\n");
        assert_eq!(domains[1].name, "B2B SALES");
        assert_eq!(domains[1].body, "**\nsales body\n");
    }

    #[test]
    fn test_heading_is_case_insensitive() {
        let doc = "# **⭐ domain 7 — Finance\nbody";
        let domains = split_domains(doc);
        assert_eq!(domains.len(), 1);
        assert_eq!(domains[0].name, "Finance");
        assert_eq!(domains[0].body, "\nbody");
    }

    #[test]
    fn test_heading_requires_numeric_identifier() {
        assert!(split_domains("# **⭐ DOMAIN X — OPS\nbody").is_empty());
    }
}
