// ABOUTME: Main library entry point for the Gleaner fetch orchestration engine.
// ABOUTME: Re-exports the public API: Fetcher, Config, Job, results, errors, and URL helpers.

//! Gleaner - a declarative fetch engine for HTML pages and RSS feeds.
//!
//! This crate fetches structured data from remote HTML pages and RSS feeds
//! according to a declarative source description, optionally following
//! extracted links to recursively fetch deeper pages, and returns a named
//! result tree.
//!
//! # Example
//!
//! ```no_run
//! use gleaner_fetch::{Config, Fetcher};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config: Config = serde_json::from_str(
//!         r#"{"sources": [{
//!             "name": "news",
//!             "location": "https://example.com/feed.xml",
//!             "type": "rss",
//!             "fields": [{"name": "title", "selector": "title"}]
//!         }]}"#,
//!     )
//!     .unwrap();
//!
//!     let fetcher = Fetcher::builder().build();
//!     let results = fetcher.run(&config).await;
//!     println!("{}", serde_json::to_string_pretty(&results).unwrap());
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
mod executor;
pub mod fetcher;
pub mod job;
pub mod options;
mod resolver;
pub mod result;

pub use crate::backend::{backend_for, Backend, HtmlBackend, RssBackend};
pub use crate::config::{Config, FieldSpec, FollowConfig, Source, SourceKind};
pub use crate::error::{ErrorCode, FetchError};
pub use crate::fetcher::Fetcher;
pub use crate::job::Job;
pub use crate::options::{FetcherBuilder, Options};
pub use crate::result::{ExtractionResult, ResolvedResult};

// ----------------------------------------------------------------------------
// URL utilities
// ----------------------------------------------------------------------------

use url::Url;

/// Resolves a link against the location of the page it was found on.
///
/// A link that already carries a scheme is used as-is; anything else is
/// joined onto `base`. A link that cannot be resolved (unparseable base)
/// is returned unchanged so the caller can still report the bad location.
pub fn absolutize(base: &str, link: &str) -> String {
    if Url::parse(link).is_ok() {
        return link.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(link)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_passes_through_absolute_links() {
        assert_eq!(
            absolutize("http://x/y.html", "https://other.example/page"),
            "https://other.example/page"
        );
    }

    #[test]
    fn absolutize_joins_relative_links() {
        assert_eq!(absolutize("http://x/y.html", "a.html"), "http://x/a.html");
        assert_eq!(absolutize("http://x/y.html", "/b.html"), "http://x/b.html");
        assert_eq!(
            absolutize("http://x/sub/y.html", "../c.html"),
            "http://x/c.html"
        );
    }

    #[test]
    fn absolutize_returns_link_when_base_is_unusable() {
        assert_eq!(absolutize("not a url", "a.html"), "a.html");
    }
}
