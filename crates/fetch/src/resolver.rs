// ABOUTME: The recursive follow resolver: turns extracted links into sub-jobs and descends.
// ABOUTME: Preserves link order, drops failed links, and keeps the result tree shape per level.

use anyhow::anyhow;
use futures::future::{BoxFuture, FutureExt};
use tracing::warn;

use crate::absolutize;
use crate::backend::backend_for;
use crate::config::{follow_field, FieldSpec, Source};
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::job::Job;
use crate::result::{ExtractionResult, ResolvedResult};

impl Fetcher {
    /// Resolve one source into its final, possibly nested, result.
    ///
    /// Validates the source's follow-field invariants before any network
    /// activity, fetches the source's own location through its backend,
    /// and descends through follow fields from there.
    pub async fn resolve_source(&self, source: &Source) -> Result<ResolvedResult, FetchError> {
        source.validate()?;

        let job = Job::from_source(source);
        let data = backend_for(job.kind).fetch(self.http_client(), &job).await?;

        self.resolve_fetched(&source.name, data, &source.fields, &source.location, 0)
            .await
    }

    /// Fold already-fetched data into a resolved result, recursing through
    /// the follow field when one is present.
    ///
    /// With no follow field the data converts unchanged. Otherwise the
    /// link list is read from the follow field's name, absolutized against
    /// `location` (the page the links were found on), expanded into one
    /// sub-job per link, and the sibling batch runs through the executor.
    /// Each surviving sub-result recurses with its own location as the new
    /// base, so relative links on a followed page resolve against that
    /// page. Sub-jobs that came back empty are dropped, keeping the output
    /// an order-preserving subsequence of the link list.
    fn resolve_fetched<'a>(
        &'a self,
        name: &'a str,
        data: ExtractionResult,
        fields: &'a [FieldSpec],
        location: &'a str,
        depth: usize,
    ) -> BoxFuture<'a, Result<ResolvedResult, FetchError>> {
        async move {
            let Some(follow) = follow_field(fields, location)? else {
                return Ok(ResolvedResult::from(data));
            };

            let follow_cfg = follow.follow_config.as_ref().ok_or_else(|| {
                FetchError::config(
                    location,
                    "Resolve",
                    Some(anyhow!(
                        "follow field '{}' has no follow_config",
                        follow.name
                    )),
                )
            })?;

            let links = data.follow_links(&follow.name);
            if links.is_empty() {
                warn!(source = %name, field = %follow.name, "follow field produced no links");
                return Ok(ResolvedResult::followed(follow.name.clone(), Vec::new()));
            }

            if let Some(limit) = self.options().max_depth {
                if depth >= limit {
                    warn!(
                        source = %name,
                        field = %follow.name,
                        depth,
                        "follow depth limit reached; not descending"
                    );
                    return Ok(ResolvedResult::followed(follow.name.clone(), Vec::new()));
                }
            }

            let jobs: Vec<Job> = links
                .iter()
                .enumerate()
                .map(|(i, link)| {
                    Job::new(
                        format!("{name}_{i}"),
                        absolutize(location, link),
                        follow_cfg.kind,
                        &follow_cfg.fields,
                    )
                })
                .collect();

            let mut batch = self.execute_batch(&jobs).await;

            let mut children = Vec::with_capacity(jobs.len());
            for job in &jobs {
                let Some(data) = batch.remove(&job.name) else {
                    continue;
                };
                if data.is_empty() {
                    warn!(job = %job.name, url = %job.location, "followed link yielded nothing; dropping");
                    continue;
                }
                let child = self
                    .resolve_fetched(&job.name, data, &follow_cfg.fields, &job.location, depth + 1)
                    .await?;
                children.push(child);
            }

            Ok(ResolvedResult::followed(follow.name.clone(), children))
        }
        .boxed()
    }
}
