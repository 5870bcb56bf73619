// =============================================================================
// Legacy Directional Movement Index (ADX / +DI / -DI)
// =============================================================================
//
// This is NOT textbook Wilder ADX. It reproduces, bit for bit, the reference
// analyzer's calculation, which differs from the standard formulation in four
// load-bearing ways:
//
//   1. Synthetic bars: only closes are available, so per-bar high/low are
//      derived as high_i = max(close_i, close_{i-1}) and
//      low_i = min(close_i, close_{i-1}); bar 0 has high = low = close.
//   2. True Range is taken against the *previous* synthetic bar:
//      TR_i = max(|close_i - low_{i-1}|, |close_i - high_{i-1}|,
//                 |high_{i-1} - low_{i-1}|).
//   3. ATR uses the unnormalized recursion atr = atr - atr/period + tr,
//      which yields a smoothed *sum*, not a moving average.
//   4. The final ADX is the simple mean of the FIRST `period` DX values,
//      not a trailing window.
//
// Downstream consumers depend on numeric parity with the reference output.
// Any "correction" toward the textbook formulas is a breaking change.

/// Default look-back period for the directional movement calculation.
pub const DEFAULT_PERIOD: usize = 14;

/// Result triple of the legacy directional movement calculation.
///
/// `adx` is in `[0, 100]` when defined; a flat window can drive the DX
/// denominator to zero, in which case NaN flows through unmasked. The
/// all-zero value means "insufficient data", which callers must
/// distinguish from a genuine zero-trend reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyAdx {
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,
}

impl LegacyAdx {
    /// The insufficient-data sentinel.
    pub const fn zero() -> Self {
        Self {
            adx: 0.0,
            plus_di: 0.0,
            minus_di: 0.0,
        }
    }
}

/// Compute the legacy ADX / +DI / -DI triple from a close-price series.
///
/// Requires `closes.len() >= 2 * period` for a non-degenerate result;
/// below that threshold (or for `period == 0`) the zero triple is
/// returned instead of an error. Pure and deterministic: identical input
/// yields bit-identical output.
pub fn legacy_adx(closes: &[f64], period: usize) -> LegacyAdx {
    if period == 0 || closes.len() < 2 * period {
        return LegacyAdx::zero();
    }

    let n = closes.len();
    let period_f = period as f64;

    // --- Step 1: Synthetic high/low bars from consecutive closes -------------
    let mut highs = Vec::with_capacity(n);
    let mut lows = Vec::with_capacity(n);
    highs.push(closes[0]);
    lows.push(closes[0]);
    for i in 1..n {
        highs.push(closes[i].max(closes[i - 1]));
        lows.push(closes[i].min(closes[i - 1]));
    }

    // --- Step 2: Raw directional movement and true range ---------------------
    // Index 0 has no predecessor; all three series hold 0.0 there.
    let mut dm_plus = vec![0.0; n];
    let mut dm_minus = vec![0.0; n];
    let mut tr = vec![0.0; n];
    for i in 1..n {
        dm_plus[i] = (highs[i] - highs[i - 1]).max(0.0);
        dm_minus[i] = (lows[i - 1] - lows[i]).max(0.0);
        tr[i] = (closes[i] - lows[i - 1])
            .abs()
            .max((closes[i] - highs[i - 1]).abs())
            .max((highs[i - 1] - lows[i - 1]).abs());
    }

    // --- Step 3: ATR — seed with SMA, then the unnormalized recursion --------
    let mut atr = Vec::with_capacity(n - period + 1);
    atr.push(tr[..period].iter().sum::<f64>() / period_f);
    for i in period..n {
        let prev = atr[atr.len() - 1];
        atr.push(prev - prev / period_f + tr[i]);
    }

    // --- Step 4: Directional indicators ---------------------------------------
    // Trailing `period`-wide DM sums ending at bar i, divided by the ATR
    // entry aligned at offset i - period.
    let mut di_plus = Vec::with_capacity(n - period);
    let mut di_minus = Vec::with_capacity(n - period);
    for i in period..n {
        let window = (i + 1 - period)..=i;
        let sum_plus: f64 = dm_plus[window.clone()].iter().sum();
        let sum_minus: f64 = dm_minus[window].iter().sum();
        let atr_entry = atr[i - period];
        di_plus.push(sum_plus / atr_entry * 100.0);
        di_minus.push(sum_minus / atr_entry * 100.0);
    }

    // --- Step 5: DX and the first-window ADX average --------------------------
    // A zero +DI + -DI sum makes DX NaN, which intentionally propagates.
    let dx: Vec<f64> = di_plus
        .iter()
        .zip(&di_minus)
        .map(|(p, m)| (p - m).abs() / (p + m) * 100.0)
        .collect();

    // closes.len() >= 2 * period guarantees dx.len() >= period.
    let adx = dx[..period].iter().sum::<f64>() / period_f;

    LegacyAdx {
        adx,
        plus_di: di_plus[di_plus.len() - 1],
        minus_di: di_minus[di_minus.len() - 1],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Reference series from the analyzer fixtures: 28 closes, period 14,
    /// exactly at the 2*period threshold.
    const REFERENCE_CLOSES: [f64; 28] = [
        100.0, 102.0, 101.0, 105.0, 103.0, 107.0, 110.0, 108.0, 112.0, 115.0, 113.0, 117.0, 120.0,
        118.0, 122.0, 125.0, 123.0, 127.0, 130.0, 128.0, 132.0, 135.0, 133.0, 137.0, 140.0, 138.0,
        142.0, 145.0,
    ];

    #[test]
    fn adx_period_zero_returns_zero_triple() {
        let closes = vec![100.0; 50];
        assert_eq!(legacy_adx(&closes, 0), LegacyAdx::zero());
    }

    #[test]
    fn adx_insufficient_data_returns_exact_zero_triple() {
        // 27 closes is one short of 2 * 14.
        let result = legacy_adx(&REFERENCE_CLOSES[..27], 14);
        assert_eq!(result.adx, 0.0);
        assert_eq!(result.plus_di, 0.0);
        assert_eq!(result.minus_di, 0.0);
    }

    #[test]
    fn adx_threshold_is_exactly_twice_period() {
        let period = 5;
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        assert_ne!(legacy_adx(&closes, period), LegacyAdx::zero());
        assert_eq!(legacy_adx(&closes[..9], period), LegacyAdx::zero());
    }

    #[test]
    fn adx_reference_series_is_finite_and_in_range() {
        let result = legacy_adx(&REFERENCE_CLOSES, 14);
        assert!(result.adx.is_finite(), "adx must be finite, got {}", result.adx);
        assert!(
            (0.0..=100.0).contains(&result.adx),
            "adx {} out of [0,100]",
            result.adx
        );
        assert!(result.plus_di > 0.0, "+DI must be positive, got {}", result.plus_di);
        assert!(result.minus_di > 0.0, "-DI must be positive, got {}", result.minus_di);
    }

    #[test]
    fn adx_strict_uptrend_favors_plus_di() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let result = legacy_adx(&closes, 14);
        assert!(
            result.plus_di > result.minus_di,
            "uptrend must give +DI ({}) > -DI ({})",
            result.plus_di,
            result.minus_di
        );
        // No down moves at all: -DI is exactly zero and DX pins at 100.
        assert_eq!(result.minus_di, 0.0);
        assert!((result.adx - 100.0).abs() < 1e-9);
    }

    #[test]
    fn adx_strict_downtrend_favors_minus_di() {
        let closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64 * 2.0).collect();
        let result = legacy_adx(&closes, 14);
        assert!(
            result.minus_di > result.plus_di,
            "downtrend must give -DI ({}) > +DI ({})",
            result.minus_di,
            result.plus_di
        );
        assert_eq!(result.plus_di, 0.0);
    }

    #[test]
    fn adx_flat_series_propagates_nan() {
        // Identical closes: every DM and TR is zero, so DX is 0/0. The
        // division-by-zero policy is to let NaN flow through, not mask it.
        let closes = vec![100.0; 40];
        let result = legacy_adx(&closes, 14);
        assert!(result.adx.is_nan(), "flat series must yield NaN adx");
    }

    #[test]
    fn adx_is_bit_identical_across_runs() {
        let first = legacy_adx(&REFERENCE_CLOSES, 14);
        let second = legacy_adx(&REFERENCE_CLOSES, 14);
        assert_eq!(first.adx.to_bits(), second.adx.to_bits());
        assert_eq!(first.plus_di.to_bits(), second.plus_di.to_bits());
        assert_eq!(first.minus_di.to_bits(), second.minus_di.to_bits());
    }

    #[test]
    fn adx_first_window_average_not_trailing() {
        // The legacy ADX averages the FIRST `period` DX values. Appending a
        // strongly trending tail changes the DI endpoints but leaves those
        // early DX values untouched, so adx must be unchanged.
        let base: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.9).sin() * 4.0).collect();
        let baseline = legacy_adx(&base, 14);

        let mut extended = base.clone();
        let last = extended[extended.len() - 1];
        extended.extend((1..=20).map(|i| last + i as f64 * 3.0));
        let after = legacy_adx(&extended, 14);

        assert_eq!(
            baseline.adx.to_bits(),
            after.adx.to_bits(),
            "adx must depend only on the first period of DX values"
        );
        assert_ne!(baseline.plus_di.to_bits(), after.plus_di.to_bits());
    }
}
