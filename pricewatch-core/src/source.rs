//! Price extraction from the scraped market page.
//!
//! The consumed contract with the remote page is narrow: somewhere in the
//! body appears the literal key `outcomePrices` followed by a JSON array
//! whose first string element parses as a decimal. Anything else is a
//! fetch failure, indistinguishable from a network error to the rest of
//! the system.

use crate::error::{PricewatchError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Matches the first outcome price literal in the page body.
static OUTCOME_PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""outcomePrices":\s*\[\s*"([^"]+)""#).expect("Invalid outcome price regex")
});

/// Source of the current market price.
///
/// Implementations must collapse every failure mode (transport error,
/// bad status, missing pattern, unparsable literal) into `None`; there
/// are no retries inside a call, the next tick or request is the retry.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current price, scaled to 0-100.
    async fn fetch(&self) -> Option<f64>;
}

/// Scrapes the configured market page over HTTP.
pub struct HttpPriceSource {
    client: Client,
    url: String,
}

impl HttpPriceSource {
    /// Create a source with a bounded request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PricewatchError::InvalidConfig {
                reason: format!("Failed to create HTTP client: {}", e),
            }
        })?;

        Ok(Self { client, url: url.into() })
    }

    async fn try_fetch(&self) -> Result<f64> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PricewatchError::FetchFailed { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PricewatchError::FetchFailed {
                reason: format!("HTTP status {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| PricewatchError::FetchFailed { reason: e.to_string() })?;

        extract_price(&body).ok_or(PricewatchError::PatternNotFound)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch(&self) -> Option<f64> {
        match self.try_fetch().await {
            Ok(price) => {
                debug!(price, "Fetched current price");
                Some(price)
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "Price fetch failed");
                None
            }
        }
    }
}

/// Extract the first outcome price from a page body.
///
/// The raw 0-1 probability is scaled to 0-100 and rounded to two decimal
/// places. A missing pattern or malformed literal yields `None`.
pub fn extract_price(body: &str) -> Option<f64> {
    let captures = OUTCOME_PRICE_REGEX.captures(body)?;
    let literal = captures.get(1)?.as_str();
    let raw: f64 = literal.parse().ok()?;
    Some((raw * 100.0 * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_price_from_outcome_array() {
        let body = r#"...page noise..."outcomePrices": ["0.37", "0.63"]...more noise..."#;
        assert_eq!(extract_price(body), Some(37.0));
    }

    #[test]
    fn test_extract_price_missing_key() {
        assert_eq!(extract_price("<html><body>nothing here</body></html>"), None);
    }

    #[test]
    fn test_extract_price_malformed_literal() {
        let body = r#""outcomePrices": ["not-a-number", "0.63"]"#;
        assert_eq!(extract_price(body), None);
    }

    #[test]
    fn test_extract_price_rounds_to_two_places() {
        let body = r#""outcomePrices": ["0.123456"]"#;
        assert_eq!(extract_price(body), Some(12.35));
    }

    #[test]
    fn test_extract_price_tolerates_whitespace() {
        let body = "\"outcomePrices\":   [\n  \"0.5\", \"0.5\" ]";
        assert_eq!(extract_price(body), Some(50.0));
    }

    #[test]
    fn test_extract_price_takes_first_element() {
        let body = r#""outcomePrices": ["0.8", "0.2"]"#;
        assert_eq!(extract_price(body), Some(80.0));
    }
}
