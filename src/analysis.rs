// =============================================================================
// Analysis Report Assembly
// =============================================================================
//
// Glue between a fetched price series and the JSON response: runs the
// indicator engine over the closes and attaches latest price, change over
// the window, and a trailing slice of raw points for charting. Reports are
// derived values — recomputed on every request, never persisted.

use serde::Serialize;

use crate::indicators::{legacy_adx, returns_volatility};
use crate::types::{closes, DataSource, PricePoint};

/// Full analysis payload for one symbol.
///
/// `adx` (and, degenerately, `volatility`) may be NaN when the engine's
/// division-by-zero edge cases fire; serde_json renders non-finite floats
/// as `null`, which consumers must guard against before display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub symbol: String,
    pub volatility: f64,
    pub adx: f64,
    #[serde(rename = "plusDI")]
    pub plus_di: f64,
    #[serde(rename = "minusDI")]
    pub minus_di: f64,
    pub latest_price: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Trailing `[timestamp, price]` pairs for the dashboard chart.
    pub prices: Vec<(i64, f64)>,
    pub source: DataSource,
    /// Epoch milliseconds at which the report was computed.
    pub generated_at: i64,
}

/// Build an [`AnalysisReport`] from an ordered, de-duplicated price series.
///
/// `change` / `change_percent` compare the last price of the series to the
/// first. Returns `None` for an empty series — the handler always has at
/// least the mock fallback, so this only signals a programming error.
pub fn build_report(
    symbol: &str,
    points: &[PricePoint],
    period: usize,
    display_points: usize,
    source: DataSource,
    generated_at: i64,
) -> Option<AnalysisReport> {
    let first = points.first()?;
    let last = points.last()?;

    let close_values = closes(points);
    let volatility = returns_volatility(&close_values);
    let dmi = legacy_adx(&close_values, period);

    let change = last.price - first.price;
    let change_percent = change / first.price * 100.0;

    let tail_start = points.len().saturating_sub(display_points);
    let prices = points[tail_start..]
        .iter()
        .map(|p| (p.timestamp, p.price))
        .collect();

    Some(AnalysisReport {
        symbol: symbol.to_string(),
        volatility,
        adx: dmi.adx,
        plus_di: dmi.plus_di,
        minus_di: dmi.minus_di,
        latest_price: last.price,
        change,
        change_percent,
        prices,
        source,
        generated_at,
    })
}
