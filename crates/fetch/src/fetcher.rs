// ABOUTME: The Fetcher engine and its top-level dispatcher.
// ABOUTME: run() resolves every configured source and assembles the name -> result mapping.

use std::collections::HashMap;

use tracing::error;

use crate::config::Config;
use crate::options::{FetcherBuilder, Options};
use crate::result::{ExtractionResult, ResolvedResult};

/// The fetch orchestration engine.
///
/// Owns one HTTP client for the duration of its life; every batch and
/// every recursive follow level fetches through it.
pub struct Fetcher {
    opts: Options,
    http_client: reqwest::Client,
}

impl Fetcher {
    /// Create a new FetcherBuilder for configuring the engine.
    pub fn builder() -> FetcherBuilder {
        FetcherBuilder::new()
    }

    /// Create a new Fetcher with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    pub(crate) fn options(&self) -> &Options {
        &self.opts
    }

    pub(crate) fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Resolve every configured source into the final name -> result mapping.
    ///
    /// A fault during one source's resolution (configuration error or an
    /// unexpected backend fault) is caught here, reported, and replaced by
    /// the empty result for that source's kind; one failing source never
    /// prevents the others from completing. The run always returns one
    /// entry per configured source name.
    pub async fn run(&self, config: &Config) -> HashMap<String, ResolvedResult> {
        let mut results = HashMap::new();

        for source in &config.sources {
            let resolved = match self.resolve_source(source).await {
                Ok(resolved) => resolved,
                Err(err) => {
                    error!(source = %source.name, error = %err, "source resolution failed");
                    ResolvedResult::from(ExtractionResult::empty(source.kind))
                }
            };
            results.insert(source.name.clone(), resolved);
        }

        results
    }
}
