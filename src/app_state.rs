// =============================================================================
// Central Application State — Pulsar Analyzer
// =============================================================================
//
// All request handlers hold an Arc reference to this state. Analysis results
// themselves are derived per request and never stored here; the state only
// carries configuration, the upstream client, and operational bookkeeping.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for all mutable shared collections.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::market_data::MarketDataClient;
use crate::runtime_config::RuntimeConfig;
use crate::types::ErrorRecord;

/// Maximum number of recent errors to retain.
const MAX_RECENT_ERRORS: usize = 50;

/// Central application state shared across all tasks via `Arc<AppState>`.
pub struct AppState {
    /// Monotonically increasing version counter. Incremented on every
    /// meaningful state mutation so dashboards can detect changes cheaply.
    pub state_version: AtomicU64,

    // ── Configuration ───────────────────────────────────────────────────
    pub runtime_config: Arc<RwLock<RuntimeConfig>>,

    // ── Upstream ────────────────────────────────────────────────────────
    pub market_client: Arc<MarketDataClient>,

    // ── Error Log ───────────────────────────────────────────────────────
    pub recent_errors: RwLock<Vec<ErrorRecord>>,

    // ── Timing ──────────────────────────────────────────────────────────
    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Construct a new `AppState` from the given runtime configuration.
    /// The returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: RuntimeConfig) -> Self {
        let market_client = Arc::new(MarketDataClient::new(config.market_data_base_url.clone()));

        Self {
            state_version: AtomicU64::new(0),
            runtime_config: Arc::new(RwLock::new(config)),
            market_client,
            recent_errors: RwLock::new(Vec::new()),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn increment_version(&self) {
        self.state_version.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    /// Append an error to the capped error log and bump the state version.
    pub fn push_error(&self, message: impl Into<String>, symbol: Option<&str>) {
        let record = ErrorRecord {
            message: message.into(),
            symbol: symbol.map(str::to_string),
            at: Utc::now().to_rfc3339(),
        };

        let mut errors = self.recent_errors.write();
        errors.push(record);
        let len = errors.len();
        if len > MAX_RECENT_ERRORS {
            errors.drain(..len - MAX_RECENT_ERRORS);
        }
        drop(errors);

        self.increment_version();
    }
}
