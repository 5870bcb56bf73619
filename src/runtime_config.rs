// =============================================================================
// Runtime Configuration — analyzer settings
// =============================================================================
//
// Every tunable parameter of the analyzer lives here, loaded once at
// startup. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file. The analyzer has no mutation
// endpoints, so the config is read-only after load.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::DEFAULT_PERIOD;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_symbols() -> Vec<String> {
    vec![
        "bitcoin".to_string(),
        "ethereum".to_string(),
        "solana".to_string(),
        "cardano".to_string(),
        "dogecoin".to_string(),
    ]
}

fn default_days() -> u32 {
    30
}

fn default_period() -> usize {
    DEFAULT_PERIOD
}

fn default_display_points() -> usize {
    48
}

fn default_base_url() -> String {
    "https://api.coingecko.com".to_string()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the Pulsar analyzer.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Coin ids the analyzer serves (market-data provider naming, e.g.
    /// "bitcoin"). Requests for anything else get a 404.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Day range requested from the upstream market chart.
    #[serde(default = "default_days")]
    pub days: u32,

    /// Look-back period for the directional movement calculation.
    #[serde(default = "default_period")]
    pub period: usize,

    /// Number of trailing price points included in responses for charting.
    #[serde(default = "default_display_points")]
    pub display_points: usize,

    /// Base URL of the market-data provider.
    #[serde(default = "default_base_url")]
    pub market_data_base_url: String,

    /// Substitute a synthetic price walk when the upstream fetch fails.
    /// When disabled, upstream failures surface as 502 responses.
    #[serde(default = "default_true")]
    pub enable_mock_fallback: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            days: default_days(),
            period: default_period(),
            display_points: default_display_points(),
            market_data_base_url: default_base_url(),
            enable_mock_fallback: true,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = ?config.symbols,
            days = config.days,
            "runtime config loaded"
        );

        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.symbols.len(), 5);
        assert_eq!(cfg.symbols[0], "bitcoin");
        assert_eq!(cfg.days, 30);
        assert_eq!(cfg.period, 14);
        assert_eq!(cfg.display_points, 48);
        assert_eq!(cfg.market_data_base_url, "https://api.coingecko.com");
        assert!(cfg.enable_mock_fallback);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.period, 14);
        assert_eq!(cfg.days, 30);
        assert!(cfg.enable_mock_fallback);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "symbols": ["ethereum"], "days": 7 }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.symbols, vec!["ethereum"]);
        assert_eq!(cfg.days, 7);
        assert_eq!(cfg.period, 14);
        assert_eq!(cfg.display_points, 48);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(RuntimeConfig::load("/nonexistent/pulsar_config.json").is_err());
    }

    #[test]
    fn load_reads_json_from_disk() {
        let path = std::env::temp_dir().join("pulsar_runtime_config_test.json");
        std::fs::write(&path, r#"{ "symbols": ["bitcoin"], "days": 14 }"#).unwrap();
        let cfg = RuntimeConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.symbols, vec!["bitcoin"]);
        assert_eq!(cfg.days, 14);
        assert_eq!(cfg.period, 14);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = RuntimeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.symbols, cfg2.symbols);
        assert_eq!(cfg.days, cfg2.days);
        assert_eq!(cfg.period, cfg2.period);
        assert_eq!(cfg.enable_mock_fallback, cfg2.enable_mock_fallback);
    }
}
