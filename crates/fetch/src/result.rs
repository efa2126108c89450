// ABOUTME: Result shapes produced by backends and by the follow resolver.
// ABOUTME: ExtractionResult is one fetch's output; ResolvedResult is the possibly-nested tree.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::SourceKind;

/// The output of a single fetch-and-extract against one location.
///
/// HTML extraction yields `Fields` (values always ordered sequences, even
/// for a single match) or `Document` when no fields were requested; RSS
/// extraction yields `Entries` in feed order. Serialization is untagged,
/// so `Document` serializes to exactly `{"html": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Document { html: String },
    Fields(HashMap<String, Vec<String>>),
    Entries(Vec<HashMap<String, String>>),
}

impl ExtractionResult {
    /// The empty result a failed job maps to, shaped for its backend kind.
    pub fn empty(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Html => ExtractionResult::Fields(HashMap::new()),
            SourceKind::Rss => ExtractionResult::Entries(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ExtractionResult::Document { html } => html.is_empty(),
            ExtractionResult::Fields(fields) => fields.is_empty(),
            ExtractionResult::Entries(entries) => entries.is_empty(),
        }
    }

    /// The link list a follow field derives from this result.
    ///
    /// `Fields` holds the sequence directly under the field name; `Entries`
    /// contributes each entry's value for that name, in entry order. A raw
    /// `Document` carries no extracted fields and therefore no links.
    pub fn follow_links(&self, field: &str) -> Vec<String> {
        match self {
            ExtractionResult::Document { .. } => Vec::new(),
            ExtractionResult::Fields(fields) => fields.get(field).cloned().unwrap_or_default(),
            ExtractionResult::Entries(entries) => entries
                .iter()
                .filter_map(|entry| entry.get(field).cloned())
                .collect(),
        }
    }
}

/// The value ultimately associated with a source name in the final output.
///
/// Terminal variants mirror [`ExtractionResult`]; `Followed` nests one
/// recursively resolved result per surviving followed link, in link order,
/// under the follow field's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedResult {
    Document { html: String },
    Fields(HashMap<String, Vec<String>>),
    Entries(Vec<HashMap<String, String>>),
    Followed(HashMap<String, Vec<ResolvedResult>>),
}

impl ResolvedResult {
    pub fn followed(field: impl Into<String>, children: Vec<ResolvedResult>) -> Self {
        let mut map = HashMap::new();
        map.insert(field.into(), children);
        ResolvedResult::Followed(map)
    }
}

impl From<ExtractionResult> for ResolvedResult {
    fn from(data: ExtractionResult) -> Self {
        match data {
            ExtractionResult::Document { html } => ResolvedResult::Document { html },
            ExtractionResult::Fields(fields) => ResolvedResult::Fields(fields),
            ExtractionResult::Entries(entries) => ResolvedResult::Entries(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn follow_links_from_fields_uses_stored_sequence() {
        let mut fields = HashMap::new();
        fields.insert(
            "links".to_string(),
            vec!["a.html".to_string(), "b.html".to_string()],
        );
        let data = ExtractionResult::Fields(fields);

        assert_eq!(data.follow_links("links"), vec!["a.html", "b.html"]);
        assert!(data.follow_links("other").is_empty());
    }

    #[test]
    fn follow_links_from_entries_preserves_entry_order() {
        let entries = vec![
            HashMap::from([("url".to_string(), "http://x/1".to_string())]),
            HashMap::from([("title".to_string(), "no url here".to_string())]),
            HashMap::from([("url".to_string(), "http://x/2".to_string())]),
        ];
        let data = ExtractionResult::Entries(entries);

        assert_eq!(data.follow_links("url"), vec!["http://x/1", "http://x/2"]);
    }

    #[test]
    fn document_serializes_to_html_key() {
        let data = ExtractionResult::Document {
            html: "<html></html>".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"html":"<html></html>"}"#
        );
    }

    #[test]
    fn followed_serializes_as_nested_sequence() {
        let child = ResolvedResult::Fields(HashMap::from([(
            "title".to_string(),
            vec!["A".to_string()],
        )]));
        let resolved = ResolvedResult::followed("links", vec![child]);

        assert_eq!(
            serde_json::to_string(&resolved).unwrap(),
            r#"{"links":[{"title":["A"]}]}"#
        );
    }

    #[test]
    fn empty_results_are_shaped_by_kind() {
        assert_eq!(
            ExtractionResult::empty(SourceKind::Html),
            ExtractionResult::Fields(HashMap::new())
        );
        assert_eq!(
            ExtractionResult::empty(SourceKind::Rss),
            ExtractionResult::Entries(Vec::new())
        );
        assert!(ExtractionResult::empty(SourceKind::Html).is_empty());
        assert!(ExtractionResult::empty(SourceKind::Rss).is_empty());
    }
}
