// =============================================================================
// Market Data REST Client — CoinGecko-style market_chart endpoint
// =============================================================================
//
// Fetches a daily close-price series for a coin id. The endpoint is public;
// no signing or API key is involved. Responses arrive as
// `{ "prices": [[timestampMs, price], ...] }` in ascending timestamp order.
// =============================================================================

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::types::{dedup_timestamps, PricePoint};

/// Request timeout for upstream calls (seconds).
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Wire format of the market_chart response. Only `prices` is consumed;
/// the endpoint also ships market caps and volumes we ignore.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

/// Public market-data REST client.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    base_url: String,
    client: reqwest::Client,
}

impl MarketDataClient {
    /// Create a new `MarketDataClient` against `base_url`
    /// (e.g. `https://api.coingecko.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build reqwest client");

        let base_url = base_url.into();
        debug!(base_url = %base_url, "MarketDataClient initialised");

        Self { base_url, client }
    }

    /// GET /api/v3/coins/{id}/market_chart — close prices for the last
    /// `days` days.
    ///
    /// Malformed entries (non-positive prices) are skipped with a warning;
    /// duplicate timestamps are dropped keeping the first occurrence, so
    /// the returned series satisfies the engine's ordering assumptions.
    #[instrument(skip(self), name = "market_data::get_market_chart")]
    pub async fn get_market_chart(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let url = format!(
            "{}/api/v3/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, coin_id, days
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET market_chart request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("market_chart for '{coin_id}' returned {status}: {body}");
        }

        let chart: MarketChartResponse = resp
            .json()
            .await
            .context("failed to parse market_chart response")?;

        Ok(Self::points_from_pairs(coin_id, chart.prices))
    }

    /// Convert raw `[timestamp, price]` pairs into a clean `PricePoint`
    /// series: non-positive or non-finite prices are skipped, duplicate
    /// timestamps dropped (first wins).
    fn points_from_pairs(coin_id: &str, pairs: Vec<(i64, f64)>) -> Vec<PricePoint> {
        let mut points = Vec::with_capacity(pairs.len());
        for (timestamp, price) in pairs {
            if !price.is_finite() || price <= 0.0 {
                warn!(coin_id, timestamp, price, "skipping malformed price entry");
                continue;
            }
            points.push(PricePoint::new(timestamp, price));
        }
        dedup_timestamps(&mut points);
        debug!(coin_id, count = points.len(), "market chart fetched");
        points
    }
}
