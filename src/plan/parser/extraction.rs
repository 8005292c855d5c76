//! Phase extraction from markdown section headers

use regex::Regex;
use std::sync::OnceLock;

use crate::plan::schema::{PhaseId, PlanPhase};

fn phase_header_regex() -> &'static Regex {
    static PHASE_HEADER: OnceLock<Regex> = OnceLock::new();
    PHASE_HEADER.get_or_init(|| {
        Regex::new(r"(?m)^##[ \t]+Phase[ \t]+(\d+):[ \t]*(.*)$").expect("Invalid regex pattern")
    })
}

/// Extract phases from `## Phase <n>: <title>` headers.
///
/// Used when the front matter carries no phase list. Header phases have no
/// dependencies, files or agents; the id is the header number with leading
/// zeros dropped, so `## Phase 03:` and `id: 3` name the same phase.
pub fn extract_header_phases(content: &str) -> Vec<PlanPhase> {
    phase_header_regex()
        .captures_iter(content)
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str();
            let id = number
                .parse::<u64>()
                .map(PhaseId::from)
                .unwrap_or_else(|_| PhaseId::new(number));
            let title = caps
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|t| !t.is_empty())
                .map(String::from);

            let mut phase = PlanPhase::new(id);
            phase.title = title;
            Some(phase)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_header_phases() {
        let content = r#"
# Implementation Plan

## Phase 1: Database schema

Create tables.

## Phase 2: API layer

## Notes
"#;
        let phases = extract_header_phases(content);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].id.as_str(), "1");
        assert_eq!(phases[0].title.as_deref(), Some("Database schema"));
        assert_eq!(phases[1].id.as_str(), "2");
        assert!(phases[1].blocked_by.is_empty());
    }

    #[test]
    fn test_header_ids_drop_leading_zeros() {
        let phases = extract_header_phases("## Phase 03: Wiring\n");
        assert_eq!(phases[0].id.as_str(), "3");
    }

    #[test]
    fn test_header_without_title() {
        let phases = extract_header_phases("## Phase 4:\n");
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].title, None);
    }

    #[test]
    fn test_ignores_other_header_levels() {
        let content = "# Phase 1: Top\n### Phase 2: Deep\n##Phase 3: Cramped\n";
        assert!(extract_header_phases(content).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_trimmed_from_title() {
        let phases = extract_header_phases("## Phase 1: Setup   \r\n");
        assert_eq!(phases[0].title.as_deref(), Some("Setup"));
    }
}
