use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use impresso_client::DateRange;
use pressclip_common::Config;
use pressclip_sampler::campaign::Campaign;
use pressclip_sampler::keywords::load_keywords;
use pressclip_sampler::sampler::SamplerConfig;
use pressclip_sampler::session::{RefreshingSession, StaticTokenProvider};

/// Stratified sampling of newspaper articles mentioning each keyword,
/// drawn across the corpus's year and newspaper facets.
#[derive(Parser, Debug)]
#[command(name = "pressclip-sampler")]
struct Args {
    /// Newline-delimited keyword list; blank lines and # comments ignored
    #[arg(long, default_value = "newsagencies.txt")]
    keywords: PathBuf,

    /// Checkpoint/output JSON file (keyword -> sampled article UIDs)
    #[arg(long, default_value = "agencies_by_article.json")]
    output: PathBuf,

    /// Hits requested per (year, newspaper) query (1-100)
    #[arg(long, default_value_t = 20)]
    limit_per_query: u32,

    /// Stop sampling a keyword once this many UIDs are collected
    #[arg(long, default_value_t = 10_000)]
    max_hits: usize,

    /// Pause between search requests, in seconds
    #[arg(long, default_value_t = 1.0)]
    delay_secs: f64,

    /// Inclusive lower date bound (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Inclusive upper date bound (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("pressclip_sampler=info".parse()?)
                .add_directive("impresso_client=info".parse()?),
        )
        .init();

    let args = Args::parse();
    ensure!(
        args.delay_secs >= 0.0 && args.delay_secs.is_finite(),
        "--delay-secs must be a non-negative number"
    );

    info!("Pressclip sampler starting...");

    let config = Config::from_env();
    config.log_redacted();

    let range = match (args.start_date, args.end_date) {
        (None, None) => None,
        (start, end) => Some(DateRange::new(start, end).context("Invalid date range")?),
    };

    let keywords = load_keywords(&args.keywords)?;
    if keywords.is_empty() {
        warn!(path = %args.keywords.display(), "No keywords found in the input file");
        return Ok(());
    }
    info!(count = keywords.len(), path = %args.keywords.display(), "Loaded keyword list");

    let provider = StaticTokenProvider::new(&config);
    let session = RefreshingSession::connect(provider).await?;

    let sampler_config = SamplerConfig {
        limit_per_query: args.limit_per_query,
        max_hits: args.max_hits,
        delay: Duration::from_secs_f64(args.delay_secs),
    };

    let campaign = Campaign::new(Arc::new(session), sampler_config, range, args.output);
    let stats = campaign.run(&keywords).await?;

    info!("{stats}");
    Ok(())
}
