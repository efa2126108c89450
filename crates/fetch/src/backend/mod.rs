// ABOUTME: The fetch backend capability interface and its HTML/RSS variants.
// ABOUTME: Backends retrieve one location and extract fields; they know nothing about recursion.

use async_trait::async_trait;

use crate::config::SourceKind;
use crate::error::FetchError;
use crate::job::Job;
use crate::result::ExtractionResult;

pub mod html;
pub mod rss;

pub use html::HtmlBackend;
pub use rss::RssBackend;

/// Retrieves the content at a job's location and extracts its fields.
///
/// Transient conditions (network failure, timeout, non-success status,
/// malformed document) are reported via `tracing` and recovered as an
/// empty result; `Err` is reserved for faults the batch executor must
/// convert at the job boundary.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch(
        &self,
        client: &reqwest::Client,
        job: &Job,
    ) -> Result<ExtractionResult, FetchError>;
}

/// Selects the backend variant for a declared source/job kind.
pub fn backend_for(kind: SourceKind) -> &'static dyn Backend {
    match kind {
        SourceKind::Html => &HtmlBackend,
        SourceKind::Rss => &RssBackend,
    }
}
