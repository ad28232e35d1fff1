//! Time-series chart rendering.
//!
//! Produces a transient PNG of the retained window. Ownership of the
//! artifact passes to the caller as soon as a path is returned; the
//! renderer never deletes anything it produced. A pure read over the
//! store, no effect on stored state.

use crate::error::{PricewatchError, Result};
use crate::store::{Sample, SampleStore};
use chrono::{DateTime, Duration, Local, TimeZone};
use plotters::prelude::*;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;
const CHART_TITLE: &str = "Polymarket Price - Last 6 Hours";

/// Renders the retained sample sequence to a line chart.
pub struct SeriesRenderer {
    store: SampleStore,
    out_dir: PathBuf,
}

impl SeriesRenderer {
    pub fn new(store: SampleStore, out_dir: impl Into<PathBuf>) -> Self {
        Self { store, out_dir: out_dir.into() }
    }

    /// Render the current series.
    ///
    /// Returns the artifact path, or `None` when there is no data or
    /// rendering fails. The caller owns the returned file and must
    /// delete it after consumption.
    pub fn render(&self) -> Option<PathBuf> {
        let samples = self.store.load();
        if samples.is_empty() {
            debug!("No samples to render");
            return None;
        }

        match self.render_samples(&samples) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(error = %e, "Chart rendering failed");
                None
            }
        }
    }

    fn render_samples(&self, samples: &[Sample]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.out_dir)
            .map_err(|e| PricewatchError::IoError { path: self.out_dir.clone(), source: e })?;

        let nanos =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let path = self.out_dir.join(format!("price_plot_{}.png", nanos));

        let points: Vec<(DateTime<Local>, f64)> = samples
            .iter()
            .filter_map(|s| Local.timestamp_opt(s.time, 0).single().map(|t| (t, s.price)))
            .collect();
        if points.is_empty() {
            return Err(PricewatchError::RenderFailed {
                reason: "no representable timestamps".to_string(),
            });
        }

        let t_min = points.iter().map(|(t, _)| *t).min().unwrap_or(points[0].0);
        let mut t_max = points.iter().map(|(t, _)| *t).max().unwrap_or(points[0].0);
        if t_min == t_max {
            // A single sample still gets a drawable axis span.
            t_max = t_max + Duration::minutes(5);
        }

        let y_min = points.iter().map(|(_, p)| *p).fold(f64::INFINITY, f64::min);
        let y_max = points.iter().map(|(_, p)| *p).fold(f64::NEG_INFINITY, f64::max);
        let pad = ((y_max - y_min) * 0.1).max(1.0);

        let backend_path = path.clone();
        let root = BitMapBackend::new(&backend_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(t_min..t_max, (y_min - pad)..(y_max + pad))
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("Price x 100")
            .x_label_formatter(&|t: &DateTime<Local>| t.format("%H:%M").to_string())
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(points.iter().cloned(), &BLUE))
            .map_err(draw_err)?;
        chart
            .draw_series(points.iter().map(|(t, p)| Circle::new((*t, *p), 3, BLUE.filled())))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        debug!(path = %path.display(), points = points.len(), "Rendered price chart");
        Ok(path)
    }
}

fn draw_err(e: impl std::fmt::Display) -> PricewatchError {
    PricewatchError::RenderFailed { reason: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_setup() -> (tempfile::TempDir, SampleStore, SeriesRenderer) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = SampleStore::new(dir.path().join("price_data.json"));
        let renderer = SeriesRenderer::new(store.clone(), dir.path().join("charts"));
        (dir, store, renderer)
    }

    #[test]
    fn test_render_empty_store_is_none() {
        let (_dir, _store, renderer) = temp_setup();
        assert!(renderer.render().is_none());
    }

    #[test]
    fn test_render_produces_artifact() {
        let (_dir, store, renderer) = temp_setup();
        let base = 1_700_000_000;
        store.append_and_prune(40.0, base).expect("append failed");
        store.append_and_prune(42.0, base + 600).expect("append failed");
        store.append_and_prune(38.5, base + 1200).expect("append failed");

        let artifact = renderer.render().expect("non-empty store should render");
        let meta = std::fs::metadata(&artifact).expect("artifact missing");
        assert!(meta.len() > 0);

        // Caller-owned cleanup.
        std::fs::remove_file(&artifact).expect("cleanup failed");
    }

    #[test]
    fn test_render_single_sample() {
        let (_dir, store, renderer) = temp_setup();
        store.append_and_prune(55.0, 1_700_000_000).expect("append failed");

        let artifact = renderer.render().expect("single sample should render");
        std::fs::remove_file(&artifact).expect("cleanup failed");
    }

    #[test]
    fn test_render_leaves_store_untouched() {
        let (_dir, store, renderer) = temp_setup();
        store.append_and_prune(40.0, 1_700_000_000).expect("append failed");
        let before = store.load();

        if let Some(artifact) = renderer.render() {
            std::fs::remove_file(&artifact).expect("cleanup failed");
        }

        assert_eq!(store.load(), before);
    }
}
