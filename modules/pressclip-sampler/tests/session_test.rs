//! Session refresh policy under a simulated clock.

use std::sync::Arc;
use std::time::Duration;

use pressclip_sampler::session::RefreshingSession;
use pressclip_sampler::testing::{CountingProvider, MockGateway};
use pressclip_sampler::traits::SessionSource;

const TTL: Duration = Duration::from_secs(10);
const HINT: Duration = Duration::from_secs(900);

async fn session_with_provider() -> (RefreshingSession<Arc<CountingProvider>>, Arc<CountingProvider>)
{
    let gateway = Arc::new(MockGateway::new());
    let provider = Arc::new(CountingProvider::new(gateway));
    let session = RefreshingSession::with_ttl(provider.clone(), TTL, HINT)
        .await
        .expect("initial acquisition");
    (session, provider)
}

#[tokio::test(start_paused = true)]
async fn no_refresh_within_ttl() {
    let (session, provider) = session_with_provider().await;
    assert_eq!(provider.acquisitions(), 1, "initial connect only");

    tokio::time::advance(Duration::from_secs(9)).await;
    session.current().await;
    session.current().await;

    assert_eq!(provider.acquisitions(), 1);
}

#[tokio::test(start_paused = true)]
async fn exactly_one_refresh_after_ttl() {
    let (session, provider) = session_with_provider().await;

    tokio::time::advance(Duration::from_secs(10)).await;
    session.current().await;
    assert_eq!(provider.acquisitions(), 2);

    // the clock was reset; the very next call is within the new TTL
    session.current().await;
    assert_eq!(provider.acquisitions(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_stale_session_and_reschedules() {
    let (session, provider) = session_with_provider().await;

    provider.set_failing(true);
    tokio::time::advance(TTL).await;
    session.current().await; // refresh attempt fails, stale session served
    assert_eq!(provider.acquisitions(), 1);

    // not retried on every call — only after another full TTL
    session.current().await;
    assert_eq!(provider.acquisitions(), 1);

    provider.set_failing(false);
    tokio::time::advance(TTL).await;
    session.current().await;
    assert_eq!(provider.acquisitions(), 2);
}

#[tokio::test(start_paused = true)]
async fn hint_interval_does_not_trigger_refresh() {
    let gateway = Arc::new(MockGateway::new());
    let provider = Arc::new(CountingProvider::new(gateway));
    let session = RefreshingSession::with_ttl(
        provider.clone(),
        Duration::from_secs(1000),
        Duration::from_secs(10),
    )
    .await
    .expect("initial acquisition");

    tokio::time::advance(Duration::from_secs(11)).await;
    session.current().await; // hint due, refresh not

    assert_eq!(provider.acquisitions(), 1);
}
