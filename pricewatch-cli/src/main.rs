use anyhow::Result;
use clap::{Parser, Subcommand};
use pricewatch_core::{Config, PriceService};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pricewatch")]
#[command(about = "Query the tracked market price", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current price
    Price,

    /// Render the 6-hour price chart to a PNG
    Graph {
        /// Output path for the chart image
        #[arg(short, long, default_value = "price_plot.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let service = PriceService::new(Config::from_env())?;

    match cli.command {
        Commands::Price => match service.get_current_reading().await {
            Some(price) => println!("Current price: {}", price),
            None => println!("Price not available."),
        },

        Commands::Graph { out } => match service.render_series().await {
            Some(artifact) => {
                // The rendered file is ours to delete, whether or not the copy works.
                let copied = std::fs::copy(&artifact, &out);
                let _ = std::fs::remove_file(&artifact);
                copied?;
                println!("Chart written to {}", out.display());
            }
            None => println!("No graph data available yet."),
        },
    }

    Ok(())
}
