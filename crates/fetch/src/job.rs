// ABOUTME: The ephemeral unit of fetch work submitted to a backend.
// ABOUTME: Jobs are derived from a Source or from a follow expansion and live for one batch.

use crate::config::{FieldSpec, Source, SourceKind};

/// One concrete (location, field-selectors, type) unit submitted to a
/// backend, possibly derived from following a link.
///
/// Job names are unique within their batch; follow sub-jobs are named
/// `{parent}_{index}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub name: String,
    pub location: String,
    pub kind: SourceKind,
    /// Field name/selector pairs in configuration order.
    pub selectors: Vec<(String, String)>,
}

impl Job {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        kind: SourceKind,
        fields: &[FieldSpec],
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            kind,
            selectors: fields
                .iter()
                .map(|f| (f.name.clone(), f.selector.clone()))
                .collect(),
        }
    }

    pub fn from_source(source: &Source) -> Self {
        Job::new(&source.name, &source.location, source.kind, &source.fields)
    }
}
