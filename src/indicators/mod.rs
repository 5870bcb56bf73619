// =============================================================================
// Indicator Engine
// =============================================================================
//
// Pure, side-effect-free computations over an ordered close-price series.
// No state is carried between calls: every result is a function of the
// input slice and the period alone. Insufficient data yields documented
// fallback values rather than errors; NaN from degenerate arithmetic is
// allowed to propagate to the caller unmasked.

pub mod legacy_adx;
pub mod volatility;

pub use legacy_adx::{legacy_adx, LegacyAdx, DEFAULT_PERIOD};
pub use volatility::returns_volatility;
