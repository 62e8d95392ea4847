//! Drives the sampler over a keyword list with resumable checkpointing.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use impresso_client::DateRange;

use crate::checkpoint;
use crate::sampler::{sample_uids, SamplerConfig};
use crate::traits::SessionSource;

/// Stats from a campaign run.
#[derive(Debug, Default)]
pub struct CampaignStats {
    pub keywords_total: usize,
    pub keywords_skipped: usize,
    pub keywords_sampled: usize,
    pub keywords_failed: usize,
    pub uids_collected: usize,
}

impl fmt::Display for CampaignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Campaign Complete ===")?;
        writeln!(f, "Keywords total:     {}", self.keywords_total)?;
        writeln!(f, "Already sampled:    {}", self.keywords_skipped)?;
        writeln!(f, "Newly sampled:      {}", self.keywords_sampled)?;
        writeln!(f, "Failed:             {}", self.keywords_failed)?;
        writeln!(f, "UIDs collected:     {}", self.uids_collected)?;
        Ok(())
    }
}

pub struct Campaign {
    session: Arc<dyn SessionSource>,
    config: SamplerConfig,
    range: Option<DateRange>,
    checkpoint_path: PathBuf,
}

impl Campaign {
    pub fn new(
        session: Arc<dyn SessionSource>,
        config: SamplerConfig,
        range: Option<DateRange>,
        checkpoint_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session,
            config,
            range,
            checkpoint_path: checkpoint_path.into(),
        }
    }

    /// Process every keyword in input order, persisting the checkpoint after
    /// each one. Keywords already checkpointed with a non-empty UID list are
    /// skipped; a keyword whose sampling fails is recorded with an empty
    /// list ("attempted, found nothing") and the campaign moves on. The only
    /// fatal error is an invalid sampler configuration, raised up front.
    pub async fn run(&self, keywords: &[String]) -> Result<CampaignStats> {
        self.config.validate()?;

        let mut stats = CampaignStats {
            keywords_total: keywords.len(),
            ..Default::default()
        };
        let mut results = checkpoint::load(&self.checkpoint_path);

        info!(
            keywords = keywords.len(),
            checkpoint = %self.checkpoint_path.display(),
            "Campaign starting"
        );

        for (idx, keyword) in keywords.iter().enumerate() {
            if let Some(existing) = results.get(keyword.as_str()) {
                if !existing.is_empty() {
                    info!(
                        keyword = keyword.as_str(),
                        uids = existing.len(),
                        "Skipping keyword, already sampled"
                    );
                    stats.keywords_skipped += 1;
                    continue;
                }
            }

            info!(
                keyword = keyword.as_str(),
                index = idx + 1,
                total = keywords.len(),
                "Processing keyword"
            );

            match sample_uids(
                self.session.as_ref(),
                keyword,
                self.range.as_ref(),
                &self.config,
            )
            .await
            {
                Ok(uids) => {
                    info!(keyword = keyword.as_str(), count = uids.len(), "Collected UIDs");
                    stats.keywords_sampled += 1;
                    stats.uids_collected += uids.len();
                    results.insert(keyword.clone(), uids);
                }
                Err(e) => {
                    error!(
                        keyword = keyword.as_str(),
                        error = %e,
                        "Sampling failed, recording empty result"
                    );
                    stats.keywords_failed += 1;
                    results.insert(keyword.clone(), Vec::new());
                }
            }

            match checkpoint::save(&self.checkpoint_path, &results) {
                Ok(()) => info!(path = %self.checkpoint_path.display(), "Saved progress"),
                Err(e) => error!(
                    path = %self.checkpoint_path.display(),
                    error = %e,
                    "Checkpoint write failed, continuing in memory"
                ),
            }
        }

        info!("All keywords processed");
        Ok(stats)
    }
}
