// ABOUTME: Configuration options for the fetch engine and the FetcherBuilder fluent API.
// ABOUTME: Covers timeout, user agent, batch concurrency, and the optional follow depth limit.

use std::time::Duration;

use crate::fetcher::Fetcher;

/// Configuration options for a [`Fetcher`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Per-request timeout applied to every fetch.
    pub timeout: Duration,
    pub user_agent: String,
    /// Worker-pool bound for each batch; 1 degenerates to sequential execution.
    pub concurrency: usize,
    /// Maximum follow depth. `None` leaves recursion unbounded; depth is then
    /// limited only by how many levels the configuration nests.
    pub max_depth: Option<usize>,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Gleaner/0.1".to_string(),
            concurrency: 8,
            max_depth: None,
            http_client: None,
        }
    }
}

/// Builder for constructing [`Fetcher`] instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct FetcherBuilder {
    opts: Options,
}

impl FetcherBuilder {
    /// Create a new FetcherBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the per-batch concurrency limit.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.opts.concurrency = concurrency;
        self
    }

    /// Set or clear the maximum follow depth.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.opts.max_depth = max_depth;
        self
    }

    /// Use a custom HTTP client instead of the built-in one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Fetcher with the configured options.
    pub fn build(self) -> Fetcher {
        Fetcher::new(self.opts)
    }
}
