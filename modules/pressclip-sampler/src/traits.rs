// Trait abstractions for the sampling pipeline's dependencies.
//
// SearchGateway — all remote search traffic behind one trait.
// SessionProvider — the zero-argument factory that produces a fresh
//   authenticated gateway; how it authenticates is its own business.
// SessionSource — the one-method interface the sampler consumes; always
//   answers, worst case with a stale session.
//
// These enable deterministic testing with MockGateway and scripted
// providers: no network, no credentials.

use std::sync::Arc;

use async_trait::async_trait;

use impresso_client::{
    DateRange, DocumentHit, FacetBucket, FacetDimension, ImpressoClient, QueryError,
};

// ---------------------------------------------------------------------------
// SearchGateway
// ---------------------------------------------------------------------------

#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Aggregate hit counts along one facet dimension.
    async fn facet(
        &self,
        dimension: FacetDimension,
        term: &str,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<FacetBucket>, QueryError>;

    /// Find documents, optionally narrowed to one newspaper and date range.
    /// Metadata only — implementations must not request article bodies.
    async fn find(
        &self,
        term: &str,
        newspaper: Option<&str>,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<DocumentHit>, QueryError>;
}

#[async_trait]
impl SearchGateway for ImpressoClient {
    async fn facet(
        &self,
        dimension: FacetDimension,
        term: &str,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<FacetBucket>, QueryError> {
        self.facet(dimension, term, range, limit).await
    }

    async fn find(
        &self,
        term: &str,
        newspaper: Option<&str>,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<DocumentHit>, QueryError> {
        self.find(term, newspaper, range, limit).await
    }
}

// ---------------------------------------------------------------------------
// SessionProvider / SessionSource
// ---------------------------------------------------------------------------

/// Produces a fresh authenticated gateway on demand. Acquisition may be slow
/// (seconds) and may fail; callers decide what a failure means.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn acquire(&self) -> anyhow::Result<Arc<dyn SearchGateway>>;
}

#[async_trait]
impl<P: SessionProvider + ?Sized> SessionProvider for Arc<P> {
    async fn acquire(&self) -> anyhow::Result<Arc<dyn SearchGateway>> {
        (**self).acquire().await
    }
}

/// Hands out the current session. Must be consulted immediately before every
/// remote call — the handle may be swapped between calls, so holding one
/// across a sampling loop defeats the refresh.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn current(&self) -> Arc<dyn SearchGateway>;
}
