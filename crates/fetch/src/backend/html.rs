// ABOUTME: HTML fetch backend: retrieves a page and extracts fields via CSS selectors.
// ABOUTME: Selectors carry an extraction suffix (`::text` or `::attr(name)`) naming what to pull.

use std::collections::HashMap;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::warn;

use crate::backend::Backend;
use crate::error::FetchError;
use crate::job::Job;
use crate::result::ExtractionResult;

/// Fetches HTML pages and extracts field values with CSS selectors.
pub struct HtmlBackend;

#[async_trait]
impl Backend for HtmlBackend {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        job: &Job,
    ) -> Result<ExtractionResult, FetchError> {
        let response = match client.get(&job.location).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                warn!(url = %job.location, "timed out fetching HTML page");
                return Ok(ExtractionResult::empty(job.kind));
            }
            Err(err) => {
                warn!(url = %job.location, error = %err, "failed to fetch HTML page");
                return Ok(ExtractionResult::empty(job.kind));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %job.location, status = %status, "HTML page returned non-success status");
            return Ok(ExtractionResult::empty(job.kind));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(url = %job.location, error = %err, "failed to read HTML response body");
                return Ok(ExtractionResult::empty(job.kind));
            }
        };

        // No fields requested: hand back the raw document.
        if job.selectors.is_empty() {
            return Ok(ExtractionResult::Document { html: body });
        }

        Ok(ExtractionResult::Fields(extract_fields(
            &body,
            &job.selectors,
            &job.location,
        )))
    }
}

/// What a selector's suffix asks to extract from matched elements.
enum Extraction {
    Text,
    Attr(String),
}

/// Splits a selector into its CSS part and extraction suffix.
///
/// Returns `None` when the selector has no suffix, which means it
/// addresses element nodes rather than text or attribute values.
fn parse_selector(raw: &str) -> Option<(&str, Extraction)> {
    if let Some(css) = raw.strip_suffix("::text") {
        return Some((css, Extraction::Text));
    }
    if let Some(idx) = raw.rfind("::attr(") {
        let rest = &raw[idx + "::attr(".len()..];
        if let Some(attr) = rest.strip_suffix(')') {
            if !attr.is_empty() {
                return Some((&raw[..idx], Extraction::Attr(attr.to_string())));
            }
        }
    }
    None
}

/// Normalizes whitespace by collapsing runs into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Evaluates each (name, selector) pair against the document.
///
/// Matched values are collected as an ordered sequence, always a sequence
/// even for a single match. Fields whose selector is malformed, matches
/// element nodes, or matches nothing are omitted and warned.
pub(crate) fn extract_fields(
    html: &str,
    selectors: &[(String, String)],
    location: &str,
) -> HashMap<String, Vec<String>> {
    let doc = Html::parse_document(html);
    let mut result = HashMap::new();

    for (name, raw) in selectors {
        let Some((css, extraction)) = parse_selector(raw) else {
            warn!(
                url = %location,
                field = %name,
                selector = %raw,
                "selector addresses element nodes; append ::text or ::attr(name)"
            );
            continue;
        };

        let selector = match Selector::parse(css) {
            Ok(selector) => selector,
            Err(err) => {
                warn!(url = %location, field = %name, selector = %raw, error = %err, "invalid CSS selector");
                continue;
            }
        };

        let values: Vec<String> = doc
            .select(&selector)
            .filter_map(|el| match &extraction {
                Extraction::Text => {
                    let text = normalize_whitespace(&el.text().collect::<String>());
                    if text.is_empty() {
                        None
                    } else {
                        Some(text)
                    }
                }
                Extraction::Attr(attr) => el
                    .value()
                    .attr(attr)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty()),
            })
            .collect();

        if values.is_empty() {
            warn!(url = %location, field = %name, selector = %raw, "selector matched nothing");
        } else {
            result.insert(name.clone(), values);
        }
    }

    result
}
