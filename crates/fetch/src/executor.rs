// ABOUTME: The batch executor: runs a homogeneous set of jobs under a bounded worker pool.
// ABOUTME: Per-job faults are converted to empty results; every job name appears in the output.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::backend::backend_for;
use crate::fetcher::Fetcher;
use crate::job::Job;
use crate::result::ExtractionResult;

impl Fetcher {
    /// Run a batch of fetch jobs concurrently and collect results by job name.
    ///
    /// Jobs run under a pool bounded by the configured concurrency limit;
    /// the pool lives only for this batch. A job whose backend call fails
    /// is recorded as the empty result for its kind without affecting its
    /// siblings, so the output holds exactly one entry per submitted job.
    /// Collecting by name keeps completion order from leaking to callers.
    pub async fn execute_batch(&self, jobs: &[Job]) -> HashMap<String, ExtractionResult> {
        if jobs.is_empty() {
            return HashMap::new();
        }

        let limit = self.options().concurrency.max(1);

        stream::iter(jobs.iter())
            .map(|job| async move {
                let result = match backend_for(job.kind).fetch(self.http_client(), job).await {
                    Ok(data) => data,
                    Err(err) => {
                        warn!(job = %job.name, url = %job.location, error = %err, "job failed; recording empty result");
                        ExtractionResult::empty(job.kind)
                    }
                };
                (job.name.clone(), result)
            })
            .buffer_unordered(limit)
            .collect()
            .await
    }
}
