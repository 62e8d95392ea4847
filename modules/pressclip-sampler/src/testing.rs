// Test mocks for the sampling pipeline.
//
// Mocks matching the trait boundaries:
// - MockGateway (SearchGateway) — HashMap-based responses keyed by
//   (dimension, term, range) / (term, newspaper, range), with full call
//   recording so tests can assert exact call counts and ordering
// - StaticSession (SessionSource) — hands out one fixed gateway
// - CountingProvider (SessionProvider) — counts acquisitions, scriptable
//   to fail
//
// No network, no credentials. `cargo test` in seconds.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use async_trait::async_trait;

use impresso_client::{DateRange, DocumentHit, FacetBucket, FacetDimension, QueryError};

use crate::traits::{SearchGateway, SessionProvider, SessionSource};

// ---------------------------------------------------------------------------
// Call records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCall {
    pub dimension: FacetDimension,
    pub term: String,
    pub range: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCall {
    pub term: String,
    pub newspaper: Option<String>,
    pub range: Option<String>,
    pub limit: u32,
}

fn range_key(range: Option<&DateRange>) -> String {
    range.map(|r| r.to_string()).unwrap_or_else(|| "*".to_string())
}

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

/// HashMap-based search gateway. Unregistered queries return empty result
/// sets so fixtures only spell out what matters. Builder pattern:
/// `.on_facet()`, `.on_facet_err()`, `.on_find()`, `.on_find_err()`.
pub struct MockGateway {
    facets: HashMap<String, Result<Vec<FacetBucket>, QueryError>>,
    finds: HashMap<String, Result<Vec<DocumentHit>, QueryError>>,
    facet_calls: Mutex<Vec<FacetCall>>,
    find_calls: Mutex<Vec<FindCall>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            facets: HashMap::new(),
            finds: HashMap::new(),
            facet_calls: Mutex::new(Vec::new()),
            find_calls: Mutex::new(Vec::new()),
        }
    }

    fn facet_key(dimension: FacetDimension, term: &str, range: Option<&DateRange>) -> String {
        format!("{dimension}|{term}|{}", range_key(range))
    }

    fn find_key(term: &str, newspaper: Option<&str>, range: Option<&DateRange>) -> String {
        format!("{term}|{}|{}", newspaper.unwrap_or("*"), range_key(range))
    }

    pub fn on_facet(
        mut self,
        dimension: FacetDimension,
        term: &str,
        range: Option<&DateRange>,
        buckets: Vec<(&str, u64)>,
    ) -> Self {
        let buckets = buckets
            .into_iter()
            .map(|(value, count)| FacetBucket {
                value: value.to_string(),
                count,
            })
            .collect();
        self.facets
            .insert(Self::facet_key(dimension, term, range), Ok(buckets));
        self
    }

    pub fn on_facet_err(
        mut self,
        dimension: FacetDimension,
        term: &str,
        range: Option<&DateRange>,
        err: QueryError,
    ) -> Self {
        self.facets
            .insert(Self::facet_key(dimension, term, range), Err(err));
        self
    }

    pub fn on_find(
        mut self,
        term: &str,
        newspaper: Option<&str>,
        range: Option<&DateRange>,
        uids: Vec<&str>,
    ) -> Self {
        let hits = uids
            .into_iter()
            .map(|uid| DocumentHit {
                uid: uid.to_string(),
            })
            .collect();
        self.finds
            .insert(Self::find_key(term, newspaper, range), Ok(hits));
        self
    }

    pub fn on_find_err(
        mut self,
        term: &str,
        newspaper: Option<&str>,
        range: Option<&DateRange>,
        err: QueryError,
    ) -> Self {
        self.finds
            .insert(Self::find_key(term, newspaper, range), Err(err));
        self
    }

    pub fn facet_calls(&self) -> Vec<FacetCall> {
        self.facet_calls.lock().unwrap().clone()
    }

    pub fn find_calls(&self) -> Vec<FindCall> {
        self.find_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchGateway for MockGateway {
    async fn facet(
        &self,
        dimension: FacetDimension,
        term: &str,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<FacetBucket>, QueryError> {
        self.facet_calls.lock().unwrap().push(FacetCall {
            dimension,
            term: term.to_string(),
            range: range.map(|r| r.to_string()),
            limit,
        });
        match self.facets.get(&Self::facet_key(dimension, term, range)) {
            Some(response) => response.clone(),
            None => Ok(Vec::new()),
        }
    }

    async fn find(
        &self,
        term: &str,
        newspaper: Option<&str>,
        range: Option<&DateRange>,
        limit: u32,
    ) -> Result<Vec<DocumentHit>, QueryError> {
        self.find_calls.lock().unwrap().push(FindCall {
            term: term.to_string(),
            newspaper: newspaper.map(String::from),
            range: range.map(|r| r.to_string()),
            limit,
        });
        match self.finds.get(&Self::find_key(term, newspaper, range)) {
            Some(response) => response.clone(),
            None => Ok(Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// StaticSession
// ---------------------------------------------------------------------------

/// SessionSource that always hands out the same gateway.
pub struct StaticSession(Arc<dyn SearchGateway>);

impl StaticSession {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self(gateway)
    }
}

#[async_trait]
impl SessionSource for StaticSession {
    async fn current(&self) -> Arc<dyn SearchGateway> {
        self.0.clone()
    }
}

// ---------------------------------------------------------------------------
// CountingProvider
// ---------------------------------------------------------------------------

/// SessionProvider that counts acquisitions and can be scripted to fail.
pub struct CountingProvider {
    gateway: Arc<dyn SearchGateway>,
    acquisitions: AtomicU32,
    failing: AtomicBool,
}

impl CountingProvider {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self {
            gateway,
            acquisitions: AtomicU32::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Total successful `acquire` calls so far.
    pub fn acquisitions(&self) -> u32 {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Make subsequent `acquire` calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionProvider for CountingProvider {
    async fn acquire(&self) -> anyhow::Result<Arc<dyn SearchGateway>> {
        if self.failing.load(Ordering::SeqCst) {
            bail!("Scripted acquisition failure");
        }
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        Ok(self.gateway.clone())
    }
}
