//! Centralized path configuration for pricewatch.
//!
//! All data paths go through this module so the daemon and CLI agree on
//! where the sample file and rendered charts live.

use std::path::PathBuf;

/// Get the pricewatch data directory.
///
/// Resolution order:
/// 1. `PRICEWATCH_DATA_DIR` environment variable
/// 2. `~/.pricewatch`
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PRICEWATCH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    dirs::home_dir().map(|h| h.join(".pricewatch")).unwrap_or_else(|| PathBuf::from(".pricewatch"))
}

/// Get the sample file path.
pub fn data_file() -> PathBuf {
    data_dir().join("price_data.json")
}

/// Get the directory rendered charts are written to.
pub fn charts_dir() -> PathBuf {
    data_dir().join("charts")
}
