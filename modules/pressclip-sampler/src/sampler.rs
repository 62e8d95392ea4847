//! Stratified sampling of article UIDs for one keyword.
//!
//! The corpus is walked year by year, newspaper by newspaper, drawing one
//! article uniformly at random per (year, newspaper) cell. Cell order is
//! deterministic (buckets sorted ascending by value); the in-cell draw is
//! intentionally unseeded.

use std::time::Duration;

use rand::seq::IndexedRandom;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use impresso_client::{DateRange, FacetDimension, QueryError};

use crate::traits::SessionSource;

/// Bucket limit for facet queries — generous enough to cover every year and
/// newspaper the corpus holds for one keyword.
const FACET_LIMIT: u32 = 200;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Invalid limit_per_query: {got}. Must be between 1 and 100.")]
    InvalidLimitPerQuery { got: u32 },

    #[error("Year facet query failed: {0}")]
    YearFacet(#[from] QueryError),
}

/// Knobs for one sampling pass.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Hits requested per (year, newspaper) query. The API caps this at 100.
    pub limit_per_query: u32,
    /// Stop once this many UIDs have been collected for the keyword.
    pub max_hits: usize,
    /// Mandatory pause after every find request.
    pub delay: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            limit_per_query: 20,
            max_hits: 10_000,
            delay: Duration::from_secs(1),
        }
    }
}

impl SamplerConfig {
    /// Reject out-of-range `limit_per_query` before any network call.
    pub fn validate(&self) -> Result<(), SampleError> {
        if self.limit_per_query < 1 || self.limit_per_query > 100 {
            return Err(SampleError::InvalidLimitPerQuery {
                got: self.limit_per_query,
            });
        }
        Ok(())
    }
}

/// Sample article UIDs for one keyword across (year, newspaper) strata.
///
/// The session is fetched from `session` immediately before every remote
/// call, never cached across the loop, so a TTL-triggered swap takes effect
/// mid-keyword. Cell-level query failures are logged and treated as empty
/// cells; only the opening year-facet query aborts the keyword.
pub async fn sample_uids(
    session: &dyn SessionSource,
    keyword: &str,
    range: Option<&DateRange>,
    config: &SamplerConfig,
) -> Result<Vec<String>, SampleError> {
    config.validate()?;

    info!(keyword, "Starting sampling");
    debug!(
        limit_per_query = config.limit_per_query,
        max_hits = config.max_hits,
        delay_ms = config.delay.as_millis() as u64,
        "Sampler parameters"
    );
    match range {
        Some(range) => info!(%range, "Using date range"),
        None => info!("No date range specified, using all available data"),
    }

    let mut year_buckets = session
        .current()
        .await
        .facet(FacetDimension::Year, keyword, range, FACET_LIMIT)
        .await
        .inspect_err(|e| error!(keyword, error = %e, "Failed to fetch year facets"))?;

    if year_buckets.is_empty() {
        warn!(keyword, "No hits found for keyword");
        return Ok(Vec::new());
    }

    year_buckets.sort_by(|a, b| a.value.cmp(&b.value));
    info!(
        keyword,
        years = year_buckets.len(),
        first = year_buckets[0].value.as_str(),
        last = year_buckets[year_buckets.len() - 1].value.as_str(),
        "Years with mentions"
    );

    let mut sampled: Vec<String> = Vec::new();

    for year_bucket in &year_buckets {
        let parsed = year_bucket.value.parse::<i32>().ok().and_then(DateRange::year);
        let year_range = match parsed {
            Some(r) => r,
            None => {
                warn!(
                    keyword,
                    value = year_bucket.value.as_str(),
                    "Unusable year facet value, skipping bucket"
                );
                continue;
            }
        };
        let year = year_bucket.value.as_str();
        debug!(keyword, year, "Processing year");

        let mut papers = match session
            .current()
            .await
            .facet(
                FacetDimension::Newspaper,
                keyword,
                Some(&year_range),
                FACET_LIMIT,
            )
            .await
        {
            Ok(papers) => papers,
            Err(e) => {
                error!(keyword, year, error = %e, "Newspaper facet query failed, skipping year");
                continue;
            }
        };

        if papers.is_empty() {
            warn!(keyword, year, "No newspapers found for year");
            continue;
        }
        papers.sort_by(|a, b| a.value.cmp(&b.value));
        debug!(keyword, year, newspapers = papers.len(), "Newspapers for year");

        for paper in &papers {
            let newspaper = paper.value.as_str();
            let result = session
                .current()
                .await
                .find(
                    keyword,
                    Some(newspaper),
                    Some(&year_range),
                    config.limit_per_query,
                )
                .await;

            // Politeness contract: the pause follows every find request,
            // whether it succeeded, failed, or came back empty.
            sleep(config.delay).await;

            match result {
                Ok(hits) => {
                    if let Some(hit) = hits.choose(&mut rand::rng()) {
                        debug!(keyword, year, newspaper, uid = hit.uid.as_str(), "Selected UID");
                        sampled.push(hit.uid.clone());
                        info!(
                            keyword,
                            progress = sampled.len(),
                            max = config.max_hits,
                            "Articles sampled"
                        );
                        if sampled.len() >= config.max_hits {
                            info!(keyword, max = config.max_hits, "Reached maximum sample size");
                            return Ok(sampled);
                        }
                    } else {
                        debug!(keyword, year, newspaper, "No results for cell");
                    }
                }
                Err(e) => {
                    error!(keyword, year, newspaper, error = %e, "Cell query failed");
                }
            }
        }
    }

    info!(keyword, count = sampled.len(), "Sampling completed");
    Ok(sampled)
}
