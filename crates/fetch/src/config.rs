// ABOUTME: Declarative source description consumed by the fetch engine.
// ABOUTME: Defines Source, FieldSpec, FollowConfig, and follow-field validation.

use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Which backend fetches and extracts a source or followed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Html,
    Rss,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceKind::Html => "html",
            SourceKind::Rss => "rss",
        };
        write!(f, "{}", s)
    }
}

/// One named extraction rule.
///
/// For HTML sources the selector is a CSS selector with an extraction
/// suffix (`h1::text`, `a.item::attr(href)`); for RSS sources it is the
/// name of an entry attribute (`title`, `link`, ...).
///
/// At most one field per level may set `follow`; that field's extracted
/// values are treated as links and fetched recursively according to
/// `follow_config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub selector: String,
    #[serde(default)]
    pub follow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_config: Option<FollowConfig>,
}

/// How to fetch and extract the pages behind a follow field's links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowConfig {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One top-level configured fetch target with its extraction rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Source {
    /// Checks the follow-field invariants for this source and every nested
    /// follow level, without touching the network.
    pub fn validate(&self) -> Result<(), FetchError> {
        validate_fields(&self.fields, &self.location)
    }
}

/// The full parsed source description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl Config {
    /// Validates every configured source.
    pub fn validate(&self) -> Result<(), FetchError> {
        for source in &self.sources {
            source.validate()?;
        }
        Ok(())
    }
}

/// Returns the (at most one) field marked `follow`, or a Config error when
/// more than one is present at this level.
pub(crate) fn follow_field<'a>(
    fields: &'a [FieldSpec],
    location: &str,
) -> Result<Option<&'a FieldSpec>, FetchError> {
    let mut found: Option<&FieldSpec> = None;
    for field in fields.iter().filter(|f| f.follow) {
        if let Some(first) = found {
            return Err(FetchError::config(
                location,
                "Resolve",
                Some(anyhow!(
                    "fields '{}' and '{}' both marked follow; at most one per level",
                    first.name,
                    field.name
                )),
            ));
        }
        found = Some(field);
    }
    Ok(found)
}

fn validate_fields(fields: &[FieldSpec], location: &str) -> Result<(), FetchError> {
    if let Some(field) = follow_field(fields, location)? {
        let cfg = field.follow_config.as_ref().ok_or_else(|| {
            FetchError::config(
                location,
                "Resolve",
                Some(anyhow!("follow field '{}' has no follow_config", field.name)),
            )
        })?;
        validate_fields(&cfg.fields, location)?;
    }
    Ok(())
}
