//! Session lifetime management.
//!
//! The API token has an externally enforced expiry the core never inspects;
//! it only tracks how long ago the current session was created and
//! re-acquires once the TTL elapses. Refresh is opportunistic: a failed
//! re-acquisition keeps the stale session in use (it may still work, or its
//! rejection will surface as a query error downstream).

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{error, info};

use impresso_client::ImpressoClient;
use pressclip_common::Config;

use crate::traits::{SearchGateway, SessionProvider, SessionSource};

/// Assumed token validity window: 7.5 hours.
pub const SESSION_TTL: Duration = Duration::from_secs(27_000);

/// How often to log the time remaining until the next refresh.
pub const REFRESH_HINT_INTERVAL: Duration = Duration::from_secs(900);

// ---------------------------------------------------------------------------
// StaticTokenProvider
// ---------------------------------------------------------------------------

/// Builds gateway clients from a stored credential. The interactive
/// token-generation flow lives entirely behind the `SessionProvider` seam
/// and any implementation of it can stand in here.
pub struct StaticTokenProvider {
    token: String,
    base_url: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.api_token.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticTokenProvider {
    async fn acquire(&self) -> Result<Arc<dyn SearchGateway>> {
        let client = match self.base_url.as_deref() {
            Some(base_url) => ImpressoClient::with_base_url(&self.token, base_url),
            None => ImpressoClient::new(&self.token),
        };
        Ok(Arc::new(client))
    }
}

// ---------------------------------------------------------------------------
// RefreshingSession
// ---------------------------------------------------------------------------

struct SessionState {
    gateway: Arc<dyn SearchGateway>,
    acquired_at: Instant,
    last_hint: Instant,
}

/// Wraps a provider with a time-to-live policy: `current()` transparently
/// re-acquires the session once the TTL elapses. Performs no network I/O of
/// its own beyond delegating to the provider when a refresh is due.
pub struct RefreshingSession<P> {
    provider: P,
    ttl: Duration,
    hint_interval: Duration,
    state: Mutex<SessionState>,
}

impl<P: SessionProvider> RefreshingSession<P> {
    /// Acquire the initial session. Startup fails if the very first
    /// acquisition does; after that, refresh failures are non-fatal.
    pub async fn connect(provider: P) -> Result<Self> {
        Self::with_ttl(provider, SESSION_TTL, REFRESH_HINT_INTERVAL).await
    }

    pub async fn with_ttl(
        provider: P,
        ttl: Duration,
        hint_interval: Duration,
    ) -> Result<Self> {
        let gateway = provider
            .acquire()
            .await
            .context("Initial session acquisition failed")?;
        let now = Instant::now();
        Ok(Self {
            provider,
            ttl,
            hint_interval,
            state: Mutex::new(SessionState {
                gateway,
                acquired_at: now,
                last_hint: now,
            }),
        })
    }
}

#[async_trait]
impl<P: SessionProvider> SessionSource for RefreshingSession<P> {
    async fn current(&self) -> Arc<dyn SearchGateway> {
        let mut state = self.state.lock().await;

        if state.acquired_at.elapsed() >= self.ttl {
            info!("Session TTL elapsed, re-acquiring");
            match self.provider.acquire().await {
                Ok(gateway) => {
                    state.gateway = gateway;
                    info!("Session refreshed");
                }
                Err(e) => {
                    error!(error = %e, "Session refresh failed, keeping stale session");
                }
            }
            // Both outcomes reschedule: a failed refresh is retried one TTL
            // from now, not on every call.
            state.acquired_at = Instant::now();
        }

        if state.last_hint.elapsed() >= self.hint_interval {
            let left = self.ttl.saturating_sub(state.acquired_at.elapsed()).as_secs();
            info!(
                "Time to session refresh: {}h {}m {}s",
                left / 3600,
                (left % 3600) / 60,
                left % 60
            );
            state.last_hint = Instant::now();
        }

        state.gateway.clone()
    }
}
