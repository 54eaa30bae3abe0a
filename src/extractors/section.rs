// src/extractors/section.rs

// --- Imports ---
use crate::extractors::models::ItemType;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
/// Every top-level heading in a domain pack starts with this prefix.
/// A sub-section runs until the next occurrence of it.
pub const HEADING_PREFIX: &str = "# **";

// --- Regex Patterns (Lazy Static) ---
// Heading = prefix + marker emoji, anything (even across lines) up to the keyword,
// then the rest of that line. `(?s)` lets the gap span lines, `(?i)` ignores case.
static PRINCIPLES_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)# \*\*✅.*?PRINCIPLES[^\n]*\n")
        .expect("Failed to compile PRINCIPLES_HEADING_RE")
});

static MISTAKES_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)# \*\*❌.*?MISTAKES[^\n]*\n")
        .expect("Failed to compile MISTAKES_HEADING_RE")
});

static MENTAL_MODELS_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)# \*\*🧠.*?MENTAL MODELS[^\n]*\n")
        .expect("Failed to compile MENTAL_MODELS_HEADING_RE")
});

static FRAMEWORKS_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)# \*\*🧩.*?FRAMEWORKS[^\n]*\n")
        .expect("Failed to compile FRAMEWORKS_HEADING_RE")
});

// --- Data Structures ---

/// The four labelled sub-sections every domain may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Principles,
    Mistakes,
    MentalModels,
    Frameworks,
}

impl SectionKind {
    /// Extraction order within a domain. Downstream consumers rely on it.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Principles,
        SectionKind::Mistakes,
        SectionKind::MentalModels,
        SectionKind::Frameworks,
    ];

    /// Emoji that distinguishes this sub-section's heading.
    pub fn marker(&self) -> &'static str {
        match self {
            SectionKind::Principles => "✅",
            SectionKind::Mistakes => "❌",
            SectionKind::MentalModels => "🧠",
            SectionKind::Frameworks => "🧩",
        }
    }

    /// Keyword that must follow the marker somewhere in the heading.
    pub fn keyword(&self) -> &'static str {
        match self {
            SectionKind::Principles => "PRINCIPLES",
            SectionKind::Mistakes => "MISTAKES",
            SectionKind::MentalModels => "MENTAL MODELS",
            SectionKind::Frameworks => "FRAMEWORKS",
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            SectionKind::Principles => ItemType::Principle,
            SectionKind::Mistakes => ItemType::Mistake,
            SectionKind::MentalModels => ItemType::MentalModel,
            SectionKind::Frameworks => ItemType::Framework,
        }
    }

    fn heading_re(&self) -> &'static Regex {
        match self {
            SectionKind::Principles => &PRINCIPLES_HEADING_RE,
            SectionKind::Mistakes => &MISTAKES_HEADING_RE,
            SectionKind::MentalModels => &MENTAL_MODELS_HEADING_RE,
            SectionKind::Frameworks => &FRAMEWORKS_HEADING_RE,
        }
    }
}

/// Locates the first heading for `kind` inside a domain body and returns the
/// text that follows it, up to the next top-level heading or end of input.
/// Returns `None` when the heading never occurs.
pub fn find_section(domain_body: &str, kind: SectionKind) -> Option<&str> {
    let heading = match kind.heading_re().find(domain_body) {
        Some(m) => m,
        None => {
            tracing::trace!("No {} {} heading in domain body", kind.marker(), kind.keyword());
            return None;
        }
    };

    let rest = &domain_body[heading.end()..];
    let section = match rest.find(HEADING_PREFIX) {
        Some(end) => &rest[..end],
        None => rest,
    };

    tracing::trace!(
        "Found {} section '{}' ({} bytes)",
        kind.keyword(),
        heading.as_str().trim_end(),
        section.len()
    );
    Some(section)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "**\n\
# **✅ I. 10 CORE MARKETING PRINCIPLES**\n\
1. Principle one is long enough\n\
2. Principle two is long enough\n\
\n\
# **❌ II. 10 BIGGEST MISTAKES**\n\
1. Mistake one is long enough\n\
# **🧠 5 Mental Models**\n\
1. **Flywheel** → Momentum compounds\n";

    #[test]
    fn test_finds_section_until_next_heading() {
        let section = find_section(BODY, SectionKind::Principles).unwrap();
        assert_eq!(section, "1. Principle one is long enough\n2. Principle two is long enough\n\n");
    }

    #[test]
    fn test_last_section_runs_to_end_of_input() {
        let section = find_section(BODY, SectionKind::MentalModels).unwrap();
        assert_eq!(section, "1. **Flywheel** → Momentum compounds\n");
    }

    #[test]
    fn test_missing_section_is_absent() {
        assert!(find_section(BODY, SectionKind::Frameworks).is_none());
        assert!(find_section("", SectionKind::Principles).is_none());
    }

    #[test]
    fn test_heading_matching_ignores_case() {
        let body = "# **🧩 a few frameworks we use\n1. **RICE**\n";
        assert_eq!(find_section(body, SectionKind::Frameworks), Some("1. **RICE**\n"));
    }

    #[test]
    fn test_heading_without_line_break_is_absent() {
        assert!(find_section("# **❌ 10 BIGGEST MISTAKES", SectionKind::Mistakes).is_none());
    }

    #[test]
    fn test_marker_without_keyword_is_absent() {
        assert!(find_section("# **✅ CHECKLIST\n1. Do the thing properly\n", SectionKind::Principles).is_none());
    }

    #[test]
    fn test_kinds_map_to_item_types_in_order() {
        let types: Vec<_> = SectionKind::ALL.iter().map(|k| k.item_type()).collect();
        assert_eq!(
            types,
            vec![ItemType::Principle, ItemType::Mistake, ItemType::MentalModel, ItemType::Framework]
        );
    }
}
