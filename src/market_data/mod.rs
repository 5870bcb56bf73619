pub mod client;
pub mod mock;

// Re-export for convenient access (e.g. `use crate::market_data::MarketDataClient`).
pub use client::MarketDataClient;
pub use mock::mock_price_walk;
