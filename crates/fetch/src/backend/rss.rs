// ABOUTME: RSS fetch backend: retrieves a feed with feed-rs and projects entry attributes.
// ABOUTME: Selectors name entry attributes; missing attributes are warned once per feed.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::SecondsFormat;
use feed_rs::model::{Entry, Feed};
use tracing::warn;

use crate::backend::Backend;
use crate::error::FetchError;
use crate::job::Job;
use crate::result::ExtractionResult;

/// Fetches RSS/Atom feeds and extracts per-entry attribute values.
pub struct RssBackend;

#[async_trait]
impl Backend for RssBackend {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        job: &Job,
    ) -> Result<ExtractionResult, FetchError> {
        let response = match client.get(&job.location).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                warn!(url = %job.location, "timed out fetching feed");
                return Ok(ExtractionResult::empty(job.kind));
            }
            Err(err) => {
                warn!(url = %job.location, error = %err, "failed to fetch feed");
                return Ok(ExtractionResult::empty(job.kind));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %job.location, status = %status, "feed returned non-success status");
            return Ok(ExtractionResult::empty(job.kind));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!(url = %job.location, error = %err, "failed to read feed response body");
                return Ok(ExtractionResult::empty(job.kind));
            }
        };

        let feed = match feed_rs::parser::parse(body.as_ref()) {
            Ok(feed) => feed,
            Err(err) => {
                warn!(url = %job.location, error = %err, "failed to parse feed");
                return Ok(ExtractionResult::empty(job.kind));
            }
        };

        if feed.entries.is_empty() {
            warn!(url = %job.location, "feed contains no entries");
            return Ok(ExtractionResult::empty(job.kind));
        }

        Ok(ExtractionResult::Entries(map_entries(
            &feed,
            &job.selectors,
            &job.location,
        )))
    }
}

/// The string-valued attributes an entry exposes to selectors.
fn entry_attributes(entry: &Entry) -> HashMap<String, String> {
    let mut attrs = HashMap::new();

    if !entry.id.is_empty() {
        attrs.insert("id".to_string(), entry.id.clone());
    }
    if let Some(title) = &entry.title {
        attrs.insert("title".to_string(), title.content.clone());
    }
    if let Some(link) = entry.links.first() {
        attrs.insert("link".to_string(), link.href.clone());
    }
    if let Some(summary) = &entry.summary {
        attrs.insert("summary".to_string(), summary.content.clone());
    }
    if let Some(content) = &entry.content {
        if let Some(body) = &content.body {
            attrs.insert("content".to_string(), body.clone());
        }
    }
    if let Some(published) = entry.published {
        attrs.insert(
            "published".to_string(),
            published.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    if let Some(updated) = entry.updated {
        attrs.insert(
            "updated".to_string(),
            updated.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    if let Some(author) = entry.authors.first() {
        attrs.insert("author".to_string(), author.name.clone());
    }

    attrs
}

/// Projects each feed entry through the (name, attribute) selector pairs.
///
/// An attribute absent from an entry is omitted from that entry's mapping
/// and warned at most once per feed. Entries whose mapping ends up empty
/// are dropped. With no selectors, every available attribute is copied.
pub(crate) fn map_entries(
    feed: &Feed,
    selectors: &[(String, String)],
    location: &str,
) -> Vec<HashMap<String, String>> {
    let mut results = Vec::new();
    let mut missing_logged: HashSet<&str> = HashSet::new();

    for entry in &feed.entries {
        let attrs = entry_attributes(entry);

        let item = if selectors.is_empty() {
            attrs
        } else {
            let mut item = HashMap::new();
            for (name, attribute) in selectors {
                match attrs.get(attribute.as_str()) {
                    Some(value) => {
                        item.insert(name.clone(), value.clone());
                    }
                    None => {
                        if missing_logged.insert(attribute.as_str()) {
                            warn!(url = %location, attribute = %attribute, "attribute not found in feed entries");
                        }
                    }
                }
            }
            item
        };

        if !item.is_empty() {
            results.push(item);
        }
    }

    results
}
