use pricewatch_core::{observability, Config, PriceService};
use tracing::info;

mod shutdown;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize observability FIRST
    observability::init();

    info!("pricewatchd starting");

    let config = Config::from_env();
    info!(
        url = %config.source_url,
        data_file = %config.data_file.display(),
        interval_secs = config.fetch_interval_secs,
        "Configuration loaded"
    );

    let service = PriceService::new(config)?;

    let mut shutdown_rx = shutdown::shutdown_signal();
    let sampler_handle = service.spawn_sampler(shutdown_rx.resubscribe());

    info!("pricewatchd ready");

    // Wait for shutdown signal, then let the sampler finish its tick.
    let _ = shutdown_rx.recv().await;
    let _ = sampler_handle.await;

    info!("pricewatchd shutting down");
    Ok(())
}
