//! Pricewatch Core Library
//!
//! Sampling-and-retention pipeline for a scraped market price: fetch,
//! validate, append, prune, persist, plus on-demand chart rendering.
//! The chat transport is an external collaborator; it is handed exactly
//! the operations on [`PriceService`].

pub mod config;
pub mod error;
pub mod observability;
pub mod paths;
pub mod render;
pub mod sampler;
pub mod service;
pub mod source;
pub mod store;

// Re-export commonly used items
pub use config::Config;
pub use error::{PricewatchError, Result};
pub use render::SeriesRenderer;
pub use sampler::Sampler;
pub use service::PriceService;
pub use source::{HttpPriceSource, PriceSource};
pub use store::{Sample, SampleStore, RETENTION_SECS};
