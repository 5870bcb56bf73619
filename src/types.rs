// =============================================================================
// Shared types used across the Pulsar analyzer
// =============================================================================

use serde::{Deserialize, Serialize};

/// A single observation in a close-price series: epoch-millisecond
/// timestamp plus a positive price. Upstream sources deliver these in
/// ascending timestamp order and they are never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Drop duplicate timestamps from an ascending series, keeping the first
/// occurrence of each. Both the upstream parser and the mock generator
/// run every series through this, so de-duplication is applied
/// consistently rather than depending on which path produced the data.
pub fn dedup_timestamps(points: &mut Vec<PricePoint>) {
    points.dedup_by_key(|p| p.timestamp);
}

/// Extract the bare close values from a series, preserving order.
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}

/// Where a price series came from. Surfaced in the analysis response so
/// consumers can tell real market data from the synthetic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Upstream,
    Mock,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upstream => write!(f, "upstream"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// A recorded error event for the dashboard error log.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    /// Human-readable error message.
    pub message: String,
    /// Symbol the error relates to, when applicable.
    pub symbol: Option<String>,
    /// ISO 8601 timestamp.
    pub at: String,
}
