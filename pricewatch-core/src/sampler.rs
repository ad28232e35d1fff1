//! Background sampling loop: fetch, append, prune, repeat.
//!
//! The sampler is the sole writer of the sample store. Every failure
//! inside a tick is logged and absorbed; only the shutdown signal stops
//! the loop.

use crate::source::PriceSource;
use crate::store::SampleStore;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Periodic price sampler.
pub struct Sampler {
    source: Arc<dyn PriceSource>,
    store: SampleStore,
    interval: Duration,
}

impl Sampler {
    /// Create a sampler ticking at the given interval.
    pub fn new(source: Arc<dyn PriceSource>, store: SampleStore, interval: Duration) -> Self {
        Self { source, store, interval }
    }

    /// Run until the shutdown signal fires.
    ///
    /// The first tick happens immediately; later ticks are spaced by the
    /// configured interval. Ticks that run long push the schedule back
    /// rather than bunching up, so drift across ticks is expected.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "Sampler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => self.tick().await,
                _ = shutdown.recv() => {
                    info!("Sampler received shutdown signal");
                    break;
                }
            }
        }
    }

    /// One fetch-append-prune cycle.
    pub async fn tick(&self) {
        let Some(price) = self.source.fetch().await else {
            warn!("Failed to fetch price");
            return;
        };

        match self.store.append_and_prune(price, unix_now()) {
            Ok(samples) => info!(price, retained = samples.len(), "Saved price sample"),
            Err(e) => warn!(error = %e, "Failed to persist price sample"),
        }
    }
}

/// Current time as unix seconds.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Yields the scripted outcomes in order, then `None` forever.
    struct ScriptedSource {
        outcomes: Mutex<Vec<Option<f64>>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Option<f64>>) -> Self {
            Self { outcomes: Mutex::new(outcomes) }
        }
    }

    #[async_trait]
    impl PriceSource for ScriptedSource {
        async fn fetch(&self) -> Option<f64> {
            let mut outcomes = self.outcomes.lock().expect("lock poisoned");
            if outcomes.is_empty() {
                None
            } else {
                outcomes.remove(0)
            }
        }
    }

    fn temp_store() -> (tempfile::TempDir, SampleStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SampleStore::new(dir.path().join("price_data.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_tick_appends_on_success() {
        let (_dir, store) = temp_store();
        let source = Arc::new(ScriptedSource::new(vec![Some(41.5)]));
        let sampler = Sampler::new(source, store.clone(), Duration::from_secs(600));

        sampler.tick().await;

        let samples = store.load();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].price, 41.5);
    }

    #[tokio::test]
    async fn test_tick_skips_store_on_fetch_failure() {
        let (_dir, store) = temp_store();
        let source = Arc::new(ScriptedSource::new(vec![None]));
        let sampler = Sampler::new(source, store.clone(), Duration::from_secs(600));

        sampler.tick().await;

        assert!(store.load().is_empty());
    }

    #[tokio::test]
    async fn test_failed_tick_does_not_stop_later_ticks() {
        let (_dir, store) = temp_store();
        let source = Arc::new(ScriptedSource::new(vec![Some(40.0), None, Some(42.0)]));
        let sampler = Sampler::new(source, store.clone(), Duration::from_secs(600));

        sampler.tick().await;
        sampler.tick().await;
        sampler.tick().await;

        let prices: Vec<f64> = store.load().iter().map(|s| s.price).collect();
        assert_eq!(prices, vec![40.0, 42.0]);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (_dir, store) = temp_store();
        let source = Arc::new(ScriptedSource::new(vec![Some(40.0)]));
        let sampler = Sampler::new(source, store.clone(), Duration::from_millis(10));

        let (tx, rx) = broadcast::channel(1);
        let handle = tokio::spawn(sampler.run(rx));

        // Let the immediate first tick land, then stop.
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(()).expect("Failed to send shutdown");

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("Sampler did not stop on shutdown")
            .expect("Sampler task panicked");

        assert!(!store.load().is_empty());
    }
}
