pub mod error;
pub mod types;

pub use error::{InvalidDateRange, QueryError, Result};
pub use types::{ApiResponse, DateRange, DocumentHit, FacetBucket, FacetDimension};

use std::time::Duration;

/// Public search API of the Impresso historical newspaper corpus.
pub const DEFAULT_BASE_URL: &str = "https://impresso-project.ch/public-api/v1";

/// An authenticated handle on the search API. The token's validity window is
/// enforced server-side; holders that need long-lived access re-create the
/// client on a schedule rather than inspecting the token.
pub struct ImpressoClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ImpressoClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Aggregate hit counts along one facet dimension for a search term,
    /// optionally scoped to a date range.
    pub async fn facet(
        &self,
        dimension: FacetDimension,
        term: &str,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<FacetBucket>> {
        let url = format!("{}/search-facets/{}", self.base_url, dimension.as_str());
        let mut query: Vec<(&str, String)> = vec![
            ("term", term.to_string()),
            ("limit", limit.to_string()),
        ];
        push_range(&mut query, range);

        tracing::debug!(%dimension, term, limit, "Facet query");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(QueryError::from_status(status.as_u16(), message));
        }

        let body: ApiResponse<FacetBucket> = resp.json().await?;
        Ok(body.data)
    }

    /// Find documents matching a term, optionally narrowed to one newspaper
    /// and date range. Metadata only: article bodies are never requested.
    pub async fn find(
        &self,
        term: &str,
        newspaper: Option<&str>,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<DocumentHit>> {
        let url = format!("{}/search", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("term", term.to_string()),
            ("limit", limit.to_string()),
            ("with_text_contents", "false".to_string()),
        ];
        if let Some(id) = newspaper {
            query.push(("newspaper_id", id.to_string()));
        }
        push_range(&mut query, range);

        tracing::debug!(term, newspaper, limit, "Find query");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(QueryError::from_status(status.as_u16(), message));
        }

        let body: ApiResponse<DocumentHit> = resp.json().await?;
        Ok(body.data)
    }
}

fn push_range(query: &mut Vec<(&str, String)>, range: Option<&DateRange>) {
    if let Some(range) = range {
        if let Some(start) = range.start {
            query.push(("from", start.to_string()));
        }
        if let Some(end) = range.end {
            query.push(("to", end.to_string()));
        }
    }
}
