// src/sections.rs
use serde_json::Value;
use tracing::debug;

use crate::document::CvDocument;
use crate::experience::{flatten_experience, Position};

/// Sections whose entries are flattened into position records. Every other
/// section passes its entries through untouched.
pub const FLATTENED_SECTIONS: &[&str] = &["experience", "volunteer"];

/// True when an entry is tagged `archived`.
///
/// The tag must appear verbatim in a `tags` array; a `tags` string, a
/// different casing, or any other shape does not archive the entry.
pub fn is_archived(entry: &Value) -> bool {
    entry
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().any(|tag| tag.as_str() == Some("archived")))
        .unwrap_or(false)
}

/// Knobs for [`build_section_view`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Keep at most this many records, applied after filtering.
    pub limit: Option<usize>,
    /// Keep entries tagged `archived` instead of dropping them.
    pub include_archived: bool,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_archived(mut self, include_archived: bool) -> Self {
        self.include_archived = include_archived;
        self
    }
}

/// The render-ready view of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView {
    /// Flattened position records, for sections in [`FLATTENED_SECTIONS`].
    Positions(Vec<Position>),
    /// Entries passed through as they appear in the document.
    Entries(Vec<Value>),
}

impl SectionView {
    pub fn len(&self) -> usize {
        match self {
            SectionView::Positions(records) => records.len(),
            SectionView::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The view as a JSON array, position records under camelCase keys.
    pub fn to_json(&self) -> Value {
        match self {
            SectionView::Positions(records) => {
                serde_json::to_value(records).unwrap_or(Value::Null)
            }
            SectionView::Entries(entries) => Value::Array(entries.clone()),
        }
    }
}

/// Build the view of one section: filter archived entries, flatten when the
/// section calls for it, then apply the limit.
///
/// Filtering always runs before the limit, and for flattened sections the
/// limit counts position records, not document entries. Unknown sections
/// yield an empty view.
pub fn build_section_view(doc: &CvDocument, section: &str, options: &ViewOptions) -> SectionView {
    let entries = doc.section(section);
    let visible: Vec<Value> = entries
        .iter()
        .filter(|entry| options.include_archived || !is_archived(entry))
        .cloned()
        .collect();

    let view = if FLATTENED_SECTIONS.contains(&section) {
        let mut records = flatten_experience(&visible);
        if let Some(limit) = options.limit {
            records.truncate(limit);
        }
        SectionView::Positions(records)
    } else {
        let mut kept = visible;
        if let Some(limit) = options.limit {
            kept.truncate(limit);
        }
        SectionView::Entries(kept)
    };

    debug!(
        section,
        entries = entries.len(),
        records = view.len(),
        "built section view"
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(sections: Value) -> CvDocument {
        CvDocument::from_value(json!({"name": "Ada", "sections": sections}))
    }

    #[test]
    fn test_is_archived() {
        assert!(is_archived(&json!({"tags": ["archived"]})));
        assert!(is_archived(&json!({"tags": [1, "archived", null]})));
        assert!(!is_archived(&json!({"tags": ["Archived"]})));
        assert!(!is_archived(&json!({"tags": "archived"})));
        assert!(!is_archived(&json!({"tags": []})));
        assert!(!is_archived(&json!({})));
        assert!(!is_archived(&json!(null)));
        assert!(!is_archived(&json!(["archived"])));
    }

    #[test]
    fn test_filter_runs_before_limit() {
        let doc = doc(json!({
            "projects": [
                {"name": "a", "tags": ["archived"]},
                {"name": "b"},
                {"name": "c"},
                {"name": "d"},
                {"name": "e"},
            ]
        }));

        let view = build_section_view(&doc, "projects", &ViewOptions::new().with_limit(2));
        match view {
            SectionView::Entries(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0]["name"], json!("b"));
                assert_eq!(entries[1]["name"], json!("c"));
            }
            SectionView::Positions(_) => panic!("projects must pass through"),
        }
    }

    #[test]
    fn test_include_archived_keeps_everything() {
        let doc = doc(json!({
            "projects": [
                {"name": "a", "tags": ["archived"]},
                {"name": "b"},
            ]
        }));

        let view = build_section_view(&doc, "projects", &ViewOptions::new().with_archived(true));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_experience_is_flattened_and_limit_counts_records() {
        let doc = doc(json!({
            "experience": [{
                "company": "Acme",
                "positions": [
                    {"title": "Engineer II", "end_date": "present"},
                    {"title": "Engineer I", "end_date": "2021-06"},
                    {"title": "Intern", "end_date": "2019-09"},
                ]
            }]
        }));

        let view = build_section_view(&doc, "experience", &ViewOptions::new().with_limit(2));
        match view {
            SectionView::Positions(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].title.as_deref(), Some("Engineer II"));
                assert!(records[0].is_current);
                assert_eq!(records[1].title.as_deref(), Some("Engineer I"));
                assert!(!records[1].is_current);
            }
            SectionView::Entries(_) => panic!("experience must flatten"),
        }
    }

    #[test]
    fn test_volunteer_is_flattened_too() {
        let doc = doc(json!({
            "volunteer": [{"organization": "Red Cross", "role": "Driver"}]
        }));

        let view = build_section_view(&doc, "volunteer", &ViewOptions::default());
        match view {
            SectionView::Positions(records) => {
                assert_eq!(records[0].company.as_deref(), Some("Red Cross"));
                assert_eq!(records[0].title.as_deref(), Some("Driver"));
            }
            SectionView::Entries(_) => panic!("volunteer must flatten"),
        }
    }

    #[test]
    fn test_archived_experience_entry_drops_all_its_positions() {
        let doc = doc(json!({
            "experience": [
                {"company": "Old", "tags": ["archived"], "positions": [{"title": "a"}, {"title": "b"}]},
                {"company": "New", "title": "c"},
            ]
        }));

        let view = build_section_view(&doc, "experience", &ViewOptions::default());
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_unknown_section_is_empty() {
        let doc = doc(json!({"projects": [{"name": "a"}]}));
        let view = build_section_view(&doc, "talks", &ViewOptions::default());
        assert!(view.is_empty());
        assert!(matches!(view, SectionView::Entries(_)));
    }

    #[test]
    fn test_section_holding_non_array_is_empty() {
        let doc = doc(json!({"projects": "not a list"}));
        let view = build_section_view(&doc, "projects", &ViewOptions::default());
        assert!(view.is_empty());
    }

    #[test]
    fn test_limit_zero_and_oversized_limit() {
        let doc = doc(json!({"projects": [{"name": "a"}, {"name": "b"}]}));

        let view = build_section_view(&doc, "projects", &ViewOptions::new().with_limit(0));
        assert!(view.is_empty());

        let view = build_section_view(&doc, "projects", &ViewOptions::new().with_limit(99));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_to_json_uses_camel_case_for_records() {
        let doc = doc(json!({
            "experience": [{"company": "Acme", "start_date": "2020-01"}]
        }));

        let view = build_section_view(&doc, "experience", &ViewOptions::default());
        let rendered = view.to_json();
        assert_eq!(rendered[0]["startDate"], json!("2020-01"));
        assert_eq!(rendered[0]["isCurrent"], json!(true));
    }
}
