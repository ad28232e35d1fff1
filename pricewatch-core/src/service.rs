//! Gateway-facing service facade.
//!
//! The chat transport is handed exactly three operations: a direct price
//! read, an on-demand chart render, and the background sampler it starts
//! once at process startup.

use crate::config::Config;
use crate::error::Result;
use crate::render::SeriesRenderer;
use crate::sampler::Sampler;
use crate::source::{HttpPriceSource, PriceSource};
use crate::store::SampleStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::warn;

/// Shared entry point over the sampling pipeline.
#[derive(Clone)]
pub struct PriceService {
    source: Arc<dyn PriceSource>,
    store: SampleStore,
    config: Config,
}

impl PriceService {
    /// Build the service with an HTTP source from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(HttpPriceSource::new(&config.source_url, config.fetch_timeout())?);
        Ok(Self::with_source(source, config))
    }

    /// Build with a custom price source (tests, alternative extractors).
    pub fn with_source(source: Arc<dyn PriceSource>, config: Config) -> Self {
        let store = SampleStore::new(&config.data_file);
        Self { source, store, config }
    }

    /// The underlying sample store.
    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    /// Current value straight from the source; `None` when unavailable.
    pub async fn get_current_reading(&self) -> Option<f64> {
        self.source.fetch().await
    }

    /// Render the retained series to a PNG on a blocking worker.
    ///
    /// The caller owns the returned file and must delete it on every
    /// exit path after consumption.
    pub async fn render_series(&self) -> Option<PathBuf> {
        let renderer = SeriesRenderer::new(self.store.clone(), self.config.charts_dir.clone());
        match tokio::task::spawn_blocking(move || renderer.render()).await {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Render task failed");
                None
            }
        }
    }

    /// Start the background sampler.
    ///
    /// Called once at process startup; the task runs until the shutdown
    /// signal fires.
    pub fn spawn_sampler(&self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        let sampler =
            Sampler::new(self.source.clone(), self.store.clone(), self.config.fetch_interval());
        tokio::spawn(sampler.run(shutdown))
    }
}
